//! Enemy construction from level data.

use bevy::prelude::*;

use super::components::{AiState, Enemy, EnemyAnimation};
use super::data::EnemyKind;
use crate::combat::Health;
use crate::world::{Body, LevelEntity};

/// All enemies share one box size.
pub const ENEMY_SIZE: Vec2 = Vec2::new(16.0, 16.0);

/// Components of an enemy of `kind` with its corner at `position`.
pub fn enemy_bundle(kind: EnemyKind, position: Vec2, spawn_order: u32) -> impl Bundle {
    let definition = kind.definition();
    (
        Enemy { kind, spawn_order },
        definition.to_stats(),
        Health::new(definition.max_health),
        Body::new(position, ENEMY_SIZE),
        AiState::default(),
        EnemyAnimation::default(),
        LevelEntity,
    )
}
