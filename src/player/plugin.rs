//! Player plugin - input, movement and player upkeep systems.

use bevy::prelude::*;

use super::input::{map_keyboard_input, InputState, PlayerCommand};
use super::movement;
use crate::core::SimSet;

/// Player plugin - handles player input, movement, dashing and timers.
///
/// The player entity itself is spawned by the level builder on first load.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputState>().add_event::<PlayerCommand>();

        // Set up movement systems
        movement::setup_movement_systems(app);

        // Keyboard mapping only runs when the host has an input plugin.
        app.add_systems(
            Update,
            map_keyboard_input
                .in_set(SimSet::Begin)
                .run_if(resource_exists::<ButtonInput<KeyCode>>),
        );
    }
}
