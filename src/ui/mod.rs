//! UI module - the read-only frame snapshot handed to presenters.

mod snapshot;

pub use snapshot::{
    capture, EffectView, EnemyView, ItemView, ObstacleView, PlayerView, ProjectileView, Snapshot,
};
