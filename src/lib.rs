//! Crystalis Sim - the headless simulation core of a top-down action RPG.
//!
//! One [`Simulation::step`] advances the world by exactly 1/60 s: player
//! input, movement with axis-separated collision retry, dashing, melee and
//! charged attacks, spells, enemy pursuit, pickups, effects and level
//! transitions through entries and portals.
//!
//! # Architecture
//!
//! The simulation is organized into plugins, each handling one domain:
//!
//! - **Core**: Frame clock, system ordering, events, configuration, camera
//! - **World**: Level data, obstacles, level loading and transitions
//! - **Player**: Input commands, movement, dash, timers and stats
//! - **Enemies**: Kinds, chase AI, knockback and reaping
//! - **Combat**: Melee swings, projectiles, contact damage
//! - **Magic**: Spell catalog, casting and cooldowns
//! - **Items**: Experience orbs
//! - **Effects**: Hit, heal and slash effects
//! - **UI**: Frame snapshots for presenters

pub mod combat;
pub mod core;
pub mod effects;
pub mod enemies;
pub mod items;
pub mod magic;
pub mod player;
pub mod simulation;
pub mod ui;
pub mod world;

use bevy::prelude::*;

pub use simulation::Simulation;

/// Main plugin that adds all sub-plugins.
///
/// The host provides a [`world::LevelRegistry`] resource; without one the
/// world stays empty.
pub struct CrystalisPlugin;

impl Plugin for CrystalisPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Level data and transitions
            .add_plugins(world::WorldPlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin)

            // Spellcasting
            .add_plugins(magic::MagicPlugin)

            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)

            // Pickups and effects
            .add_plugins((items::ItemPlugin, effects::EffectsPlugin));
    }
}
