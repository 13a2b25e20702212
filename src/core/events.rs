//! Global events used for cross-system communication.
//!
//! Gameplay systems report what happened through these events so that hosts
//! (HUD, audio, logging, tests) can react without reaching into the systems
//! that produced them.

use bevy::prelude::*;

use crate::enemies::EnemyKind;
use crate::magic::{CastError, SpellKind};

/// Element imbued into the player's sword.
///
/// Purely cosmetic at the moment: it is carried by projectiles and reported
/// in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwordElement {
    #[default]
    Wind,
    Fire,
    Water,
    Thunder,
}

/// Sent when the player takes damage.
#[derive(Event, Debug, Clone)]
pub struct PlayerDamagedEvent {
    pub amount: i32,
    /// HP remaining after the hit (before any respawn refill).
    pub remaining: i32,
    /// The hit was lethal and the player was sent back to the respawn point.
    pub respawned: bool,
}

/// Sent when an enemy is removed after its health reached zero.
#[derive(Event, Debug, Clone)]
pub struct EnemyDefeatedEvent {
    pub kind: EnemyKind,
    pub position: Vec2,
    pub exp_value: u32,
}

/// Sent when the player collects an experience orb.
#[derive(Event, Debug, Clone)]
pub struct ItemPickupEvent {
    pub value: u32,
}

/// Sent when the player levels up.
#[derive(Event, Debug, Clone)]
pub struct LevelUpEvent {
    /// New level
    pub new_level: u32,
}

/// Sent when a dash charge finishes regenerating.
#[derive(Event, Debug, Clone)]
pub struct DashChargeEvent {
    pub charges: u32,
}

/// Sent after a level has been built into the world.
#[derive(Event, Debug, Clone)]
pub struct LevelLoadedEvent {
    /// Id that was asked for.
    pub requested: u32,
    /// Id that was actually loaded (differs when the fallback kicked in).
    pub id: u32,
}

/// Sent for every spell cast attempt, successful or not.
#[derive(Event, Debug, Clone)]
pub struct SpellCastEvent {
    pub outcome: Result<SpellKind, CastError>,
}
