//! World module - level data, static obstacles and level transitions.

mod builder;
mod data;
mod error;
mod geometry;
mod obstacles;
mod plugin;
mod transition;

pub use builder::{build_obstacles, load_level, LevelEntity};
pub use data::{
    CurrentLevel, EnemySpawnDef, EntryDef, HouseDef, ItemDef, LevelDefinition, LevelDimensions, LevelRegistry,
    MountainDef, Placement, StalactiteDef, WallDef, FALLBACK_LEVEL,
};
pub use error::DataLoadError;
pub use geometry::{distance, resolve_movement, Aabb, Body, Bounds};
pub use obstacles::{Obstacle, ObstacleCategory, Obstacles, Portal};
pub use plugin::WorldPlugin;
pub use transition::{
    apply_level_transition, check_level_triggers, handle_debug_commands, load_starting_level, EntryTrigger,
    LevelTriggers,
};
