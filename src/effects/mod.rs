//! Effects module - hit sparks, heal sparkles and melee slashes.

mod components;
mod plugin;

pub use components::*;
pub use plugin::{expire_effects, EffectsPlugin};
