//! World plugin - level registry, obstacles and level transitions.

use bevy::prelude::*;

use super::data::{CurrentLevel, LevelDimensions, LevelRegistry};
use super::obstacles::Obstacles;
use super::transition::{
    apply_level_transition, check_level_triggers, handle_debug_commands, load_starting_level, LevelTriggers,
};
use crate::core::{frame_active, SimSet};
use crate::magic::handle_spell_commands;

/// World plugin - handles level loading and transitions.
///
/// Hosts insert a populated [`LevelRegistry`] before the first update; the
/// starting level is loaded at startup unless a level is already present.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelRegistry>()
            .init_resource::<Obstacles>()
            .init_resource::<LevelDimensions>()
            .init_resource::<CurrentLevel>()
            .init_resource::<LevelTriggers>()
            .add_systems(Startup, load_starting_level)
            // Debug navigation is the last command handled each frame
            .add_systems(
                Update,
                handle_debug_commands
                    .in_set(SimSet::Input)
                    .after(handle_spell_commands),
            )
            .add_systems(
                Update,
                (
                    check_level_triggers.run_if(frame_active),
                    apply_level_transition,
                )
                    .chain()
                    .in_set(SimSet::Triggers),
            );
    }
}
