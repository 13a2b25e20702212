//! Per-frame system ordering.

use bevy::prelude::*;

use super::clock::FrameClock;
use super::states::{frame_active, simulation_playing, FrameFlow};

/// Stages of one simulation step, run in declaration order.
///
/// `Begin` always runs. Everything after it is skipped while editing, and
/// everything after `Triggers` is skipped on a frame that changed level.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Clock advance and raw input mapping.
    Begin,
    /// Player commands: attack, movement, dash, spells, debug.
    Input,
    /// Player timers and regeneration.
    Player,
    /// Entry and portal checks, level transition.
    Triggers,
    /// Enemy chase and reaping.
    Enemies,
    Projectiles,
    Items,
    Effects,
    /// Contact damage and projectile hits.
    Collisions,
    Camera,
    /// Spell cooldown tick.
    Cooldowns,
}

const GAMEPLAY: [SimSet; 10] = [
    SimSet::Input,
    SimSet::Player,
    SimSet::Triggers,
    SimSet::Enemies,
    SimSet::Projectiles,
    SimSet::Items,
    SimSet::Effects,
    SimSet::Collisions,
    SimSet::Camera,
    SimSet::Cooldowns,
];

/// Configure the set chain and the systems that open every frame.
pub fn setup_frame_schedule(app: &mut App) {
    app.configure_sets(
        Update,
        (
            SimSet::Begin,
            SimSet::Input,
            SimSet::Player,
            SimSet::Triggers,
            SimSet::Enemies,
            SimSet::Projectiles,
            SimSet::Items,
            SimSet::Effects,
            SimSet::Collisions,
            SimSet::Camera,
            SimSet::Cooldowns,
        )
            .chain(),
    );

    // Conditions are attached per set so each one is evaluated when that set
    // is reached, after earlier sets had a chance to queue a transition.
    for set in GAMEPLAY {
        app.configure_sets(Update, set.run_if(simulation_playing));
        if !matches!(set, SimSet::Input | SimSet::Triggers) {
            app.configure_sets(Update, set.run_if(frame_active));
        }
    }

    app.add_systems(Update, begin_frame.in_set(SimSet::Begin));
}

/// Advance the clock and clear last frame's flow state.
fn begin_frame(mut clock: ResMut<FrameClock>, mut flow: ResMut<FrameFlow>) {
    clock.advance();
    *flow = FrameFlow::default();
}
