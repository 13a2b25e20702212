//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use super::components::EnemyFreeze;
use crate::core::SimSet;

/// Enemy plugin - handles enemy chasing and death.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemyFreeze>().add_systems(
            Update,
            (ai::chase_player, ai::reap_dead_enemies)
                .chain()
                .in_set(SimSet::Enemies),
        );
    }
}
