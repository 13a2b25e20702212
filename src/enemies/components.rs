//! Enemy-related components.

use bevy::prelude::*;

use super::data::EnemyKind;

/// Marks an enemy and records its kind and spawn order.
///
/// Projectiles hit the first enemy in spawn order, so systems that need a
/// deterministic visiting order sort by `spawn_order`.
#[derive(Component, Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub spawn_order: u32,
}

/// Whether the enemy is currently chasing the player.
#[derive(Component, Default, PartialEq, Clone, Copy, Debug)]
pub enum AiState {
    #[default]
    Idle,
    Chasing,
}

/// Per-enemy combat stats copied from its kind.
#[derive(Component, Clone, Debug)]
pub struct EnemyStats {
    pub damage: i32,
    pub move_speed: f32,
    pub exp_value: u32,
}

/// Two-frame idle/walk cycle that keeps running while enemies are frozen.
#[derive(Component, Default, Clone, Debug)]
pub struct EnemyAnimation {
    pub frame: u8,
    pub timer: f32,
}

/// Seconds between animation frame toggles.
pub const ENEMY_FRAME_TIME: f32 = 0.3;

impl EnemyAnimation {
    pub fn advance(&mut self, dt: f32) {
        self.timer += dt;
        if self.timer > ENEMY_FRAME_TIME {
            self.frame = (self.frame + 1) % 2;
            self.timer = 0.0;
        }
    }
}

/// Debug toggle that stops every enemy from moving.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyFreeze(pub bool);
