//! Core plugin that sets up the frame clock, events and system ordering.

use bevy::prelude::*;

use super::camera::{frame_camera, CameraFraming};
use super::clock::FrameClock;
use super::config::SimulationConfig;
use super::events::*;
use super::rng::SimRng;
use super::schedule::{setup_frame_schedule, SimSet};
use super::states::{FrameFlow, SimulationMode};

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - The fixed-step frame clock and the [`SimSet`] chain
/// - Simulation mode and frame flow resources
/// - Global events (damage, level-up, pickups, spell casts, ...)
/// - The seeded RNG, from [`SimulationConfig::seed`] unless one was inserted
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationConfig>();
        if !app.world().contains_resource::<SimRng>() {
            let seed = app.world().resource::<SimulationConfig>().seed;
            app.insert_resource(SimRng::seeded(seed));
        }

        app
            .init_resource::<FrameClock>()
            .init_resource::<SimulationMode>()
            .init_resource::<FrameFlow>()
            .init_resource::<CameraFraming>()

            // Register global events
            .add_event::<PlayerDamagedEvent>()
            .add_event::<EnemyDefeatedEvent>()
            .add_event::<ItemPickupEvent>()
            .add_event::<LevelUpEvent>()
            .add_event::<DashChargeEvent>()
            .add_event::<LevelLoadedEvent>()
            .add_event::<SpellCastEvent>();

        setup_frame_schedule(app);

        app.add_systems(Update, frame_camera.in_set(SimSet::Camera));
    }
}
