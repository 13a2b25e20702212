//! Combat-related components.

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::{Countdown, SwordElement};
use crate::world::{Body, LevelEntity};

/// Combat ranges and projectile tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Distance from the player centre to the strike point, and hit radius around it
    pub melee_range: f32,
    pub melee_knockback: f32,
    /// Projectile speed in units per frame
    pub projectile_speed: f32,
    pub projectile_damage: i32,
    /// Projectile lifetime in seconds
    pub projectile_lifetime: f32,
    pub projectile_size: f32,
    /// Projectile centre to enemy corner distance that counts as a hit
    pub projectile_hit_radius: f32,
    pub projectile_knockback: f32,
    /// Player to enemy distance that deals contact damage
    pub contact_radius: f32,
    /// Enemies chase the player inside this distance
    pub aggro_radius: f32,
    /// Player to orb distance that collects it
    pub pickup_radius: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            melee_range: 14.0,
            melee_knockback: 50.0,
            projectile_speed: 4.0,
            projectile_damage: 4,
            projectile_lifetime: 0.5,
            projectile_size: 8.0,
            projectile_hit_radius: 20.0,
            projectile_knockback: 35.0,
            contact_radius: 24.0,
            aggro_radius: 100.0,
            pickup_radius: 20.0,
        }
    }
}

/// Component for entities that can take damage.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Health {
    pub current: i32,
    pub maximum: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self {
            current: max,
            maximum: max,
        }
    }

    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }
}

/// A charged sword shot travelling in a straight line.
#[derive(Component, Debug, Clone)]
pub struct Projectile {
    /// Travel direction in radians.
    pub angle: f32,
    pub speed: f32,
    pub damage: i32,
    /// Fired by the player. Only friendly projectiles hit enemies.
    pub friendly: bool,
    pub element: SwordElement,
    /// Set after the first hit; the projectile is removed on its next update.
    pub spent: bool,
    life: Countdown,
}

impl Projectile {
    pub fn new(angle: f32, config: &CombatConfig, element: SwordElement) -> Self {
        Self {
            angle,
            speed: config.projectile_speed,
            damage: config.projectile_damage,
            friendly: true,
            element,
            spent: false,
            life: Countdown::new(config.projectile_lifetime),
        }
    }

    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    pub fn remaining_life(&self) -> f32 {
        self.life.remaining()
    }

    /// Age by one step. Returns `true` once the lifetime is used up.
    pub fn age(&mut self, dt: f32) -> bool {
        self.life.tick(dt);
        !self.life.is_running()
    }
}

/// Components of a projectile centred on `center`.
pub fn projectile_bundle(center: Vec2, angle: f32, config: &CombatConfig, element: SwordElement) -> impl Bundle {
    let size = Vec2::splat(config.projectile_size);
    (
        Projectile::new(angle, config, element),
        Body::new(center - size / 2.0, size),
        LevelEntity,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FRAME_DT;

    #[test]
    fn health_never_goes_negative() {
        let mut health = Health::new(6);
        assert_eq!(health.take_damage(4), 4);
        assert!(!health.is_dead());
        assert_eq!(health.take_damage(4), 2);
        assert!(health.is_dead());
        assert_eq!(health.current, 0);
    }

    #[test]
    fn projectile_expires_after_thirty_steps() {
        let config = CombatConfig::default();
        let mut projectile = Projectile::new(0.0, &config, SwordElement::Wind);
        for step in 1..30 {
            assert!(!projectile.age(FRAME_DT), "expired at step {step}");
        }
        assert!(projectile.age(FRAME_DT));
    }
}
