//! Short-lived visual effects.

use bevy::prelude::*;

use crate::core::Countdown;
use crate::world::LevelEntity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Spark where damage landed.
    Hit,
    /// Sparkle around a healed player.
    Heal,
    /// Arc drawn at the melee strike point.
    MeleeSlash,
}

impl EffectKind {
    /// Lifetime in seconds.
    pub fn duration(self) -> f32 {
        match self {
            EffectKind::Hit => 0.3,
            EffectKind::Heal => 1.0,
            EffectKind::MeleeSlash => 0.2,
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct Effect {
    pub kind: EffectKind,
    pub position: Vec2,
    /// Orientation for directional effects (the slash), radians.
    pub angle: f32,
    life: Countdown,
}

impl Effect {
    pub fn new(kind: EffectKind, position: Vec2) -> Self {
        Self {
            kind,
            position,
            angle: 0.0,
            life: Countdown::new(kind.duration()),
        }
    }

    pub fn slash(position: Vec2, angle: f32) -> Self {
        Self {
            angle,
            ..Self::new(EffectKind::MeleeSlash, position)
        }
    }

    pub fn remaining(&self) -> f32 {
        self.life.remaining()
    }

    /// 0 when spawned, 1 when expired.
    pub fn progress(&self) -> f32 {
        1.0 - self.remaining() / self.kind.duration()
    }

    /// Returns `true` once the effect has run its course.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.life.tick(dt);
        !self.life.is_running()
    }
}

pub fn spawn_effect(commands: &mut Commands, effect: Effect) {
    commands.spawn((effect, LevelEntity));
}
