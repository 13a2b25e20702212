//! Items module - experience orbs.

mod components;
mod plugin;

pub use components::*;
pub use plugin::{collect_orbs, ItemPlugin};
