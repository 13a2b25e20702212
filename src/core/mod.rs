//! Core module - frame clock, ordering, events and configuration.
//!
//! This module provides the foundation that all other game systems build upon.

mod camera;
mod clock;
mod config;
mod events;
mod plugin;
mod rng;
mod schedule;
mod states;

pub use camera::*;
pub use clock::*;
pub use config::SimulationConfig;
pub use events::*;
pub use plugin::CorePlugin;
pub use rng::SimRng;
pub use schedule::SimSet;
pub use states::*;
