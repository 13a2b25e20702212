//! Enemies module - enemy kinds, AI and spawning.

mod ai;
mod components;
mod data;
mod plugin;
mod spawning;

pub use ai::{chase_player, enemy_bounds, knock_back, reap_dead_enemies};
pub use components::*;
pub use data::{EnemyDefinition, EnemyKind};
pub use plugin::EnemyPlugin;
pub use spawning::{enemy_bundle, ENEMY_SIZE};
