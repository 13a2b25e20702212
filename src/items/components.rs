//! Experience orbs dropped by enemies or placed by level data.

use bevy::prelude::*;

use crate::world::{Body, LevelEntity};

pub const ORB_SIZE: Vec2 = Vec2::new(8.0, 8.0);

/// Vertical bob amplitude in units.
const BOB_HEIGHT: f32 = 3.0;
/// Bob phase advance per millisecond of game time.
const BOB_RATE: f64 = 0.1;

#[derive(Component, Debug, Clone)]
pub struct ExperienceOrb {
    pub value: u32,
    /// Current vertical bob offset, cosmetic only.
    pub bob: f32,
}

impl ExperienceOrb {
    pub fn new(value: u32) -> Self {
        Self { value, bob: 0.0 }
    }

    pub fn update_bob(&mut self, elapsed_seconds: f64) {
        self.bob = ((elapsed_seconds * 1000.0 * BOB_RATE).sin() as f32) * BOB_HEIGHT;
    }
}

pub fn orb_bundle(position: Vec2, value: u32) -> impl Bundle {
    (ExperienceOrb::new(value), Body::new(position, ORB_SIZE), LevelEntity)
}
