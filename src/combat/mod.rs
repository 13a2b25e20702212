//! Combat module - melee swings, charged shots and collision damage.

mod components;
mod plugin;
mod systems;

pub use components::*;
pub use plugin::CombatPlugin;
pub use systems::{
    advance_projectiles, enemy_contact_damage, handle_attack_commands, melee_swing, projectile_hits,
};
