//! Player-related components.

use bevy::prelude::*;
use serde::Deserialize;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::core::{Countdown, SwordElement};
use crate::world::Body;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Tuning for the player character.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Collision box width and height
    pub size: (f32, f32),
    /// Walking speed in units per frame
    pub move_speed: f32,
    /// Applied to both axes when moving diagonally
    pub diagonal_factor: f32,
    /// Speed multiplier inside mountain and cave zones
    pub slowdown_factor: f32,
    /// Distance kept from the world edge
    pub bounds_margin: f32,
    pub max_health: i32,
    pub max_mana: i32,
    pub attack_power: i32,
    /// Experience needed for the first level-up
    pub exp_to_next: u32,
    /// `exp_to_next` becomes `level * exp_per_level` after a level-up
    pub exp_per_level: u32,
    pub health_per_level: i32,
    pub mana_per_level: i32,
    pub attack_per_level: i32,
    /// Grace period after taking damage, in seconds
    pub invulnerability_time: f32,
    /// Where the player reappears after dying
    pub respawn_point: (f32, f32),
    /// Dash speed in units per frame
    pub dash_speed: f32,
    pub dash_duration: f32,
    pub dash_charges: u32,
    /// Seconds to regenerate one dash charge
    pub dash_regen_time: f32,
    pub dash_flash_time: f32,
    pub attack_duration: f32,
    /// Hold time that turns a swing into a projectile
    pub charge_time: f32,
    /// Hold time before charge progress is reported
    pub charge_indicator_delay: f32,
    /// Per-frame chance to regenerate one MP
    pub mana_regen_chance: f64,
    /// Frames per walk animation frame
    pub walk_frame_interval: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            size: (14.0, 33.0),
            move_speed: 2.0,
            diagonal_factor: 0.707,
            slowdown_factor: 0.4,
            bounds_margin: 8.0,
            max_health: 16,
            max_mana: 4,
            attack_power: 4,
            exp_to_next: 20,
            exp_per_level: 20,
            health_per_level: 4,
            mana_per_level: 2,
            attack_per_level: 1,
            invulnerability_time: 1.0,
            respawn_point: (256.0, 400.0),
            dash_speed: 8.0,
            dash_duration: 0.2,
            dash_charges: 2,
            dash_regen_time: 1.0,
            dash_flash_time: 0.5,
            attack_duration: 0.3,
            charge_time: 1.5,
            charge_indicator_delay: 0.5,
            mana_regen_chance: 0.01,
            walk_frame_interval: 10,
        }
    }
}

impl PlayerConfig {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.size.0, self.size.1)
    }

    pub fn respawn_point(&self) -> Vec2 {
        Vec2::new(self.respawn_point.0, self.respawn_point.1)
    }
}

/// Player's progression and resource pools.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PlayerStats {
    pub level: u32,
    pub health: i32,
    pub max_health: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub exp: u32,
    pub exp_to_next: u32,
    pub attack_power: i32,
    pub sword: SwordElement,
}

impl PlayerStats {
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self {
            level: 1,
            health: config.max_health,
            max_health: config.max_health,
            mana: config.max_mana,
            max_mana: config.max_mana,
            exp: 0,
            exp_to_next: config.exp_to_next,
            attack_power: config.attack_power,
            sword: SwordElement::default(),
        }
    }

    /// Restore HP up to the maximum. Returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = (self.health + amount).min(self.max_health);
        self.health - before
    }

    pub fn restore_mana(&mut self, amount: i32) {
        self.mana = (self.mana + amount).min(self.max_mana);
    }

    /// HP never drops below zero.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Add experience. Returns `true` if this gain caused a level-up.
    ///
    /// At most one level is gained per call; surplus experience is dropped.
    pub fn gain_exp(&mut self, amount: u32, config: &PlayerConfig) -> bool {
        self.exp += amount;
        if self.exp < self.exp_to_next {
            return false;
        }
        self.level += 1;
        self.exp = 0;
        self.exp_to_next = self.level * config.exp_per_level;
        self.max_health += config.health_per_level;
        self.max_mana += config.mana_per_level;
        self.attack_power += config.attack_per_level;
        self.health = self.max_health;
        self.mana = self.max_mana;
        true
    }
}

/// One of eight directions, clockwise from up (0 = up, 2 = right, 4 = down).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Facing(pub u8);

/// Sprite sheet row for each facing.
const SPRITE_ROWS: [u8; 8] = [4, 4, 1, 2, 0, 0, 5, 5];

impl Facing {
    /// Direction implied by a movement delta, or `None` when not moving.
    pub fn from_delta(delta: Vec2) -> Option<Facing> {
        let horizontal = |right: u8, centre: u8, left: u8| {
            if delta.x > 0.0 {
                right
            } else if delta.x < 0.0 {
                left
            } else {
                centre
            }
        };
        let direction = if delta.y < 0.0 {
            horizontal(1, 0, 7)
        } else if delta.y > 0.0 {
            horizontal(3, 4, 5)
        } else if delta.x != 0.0 {
            horizontal(2, 0, 6)
        } else {
            return None;
        };
        Some(Facing(direction))
    }

    /// Radians with 0 pointing right and +y down, so facing 0 is `-PI/2`.
    pub fn angle(self) -> f32 {
        f32::from(self.0) * FRAC_PI_4 - FRAC_PI_2
    }

    pub fn direction(self) -> Vec2 {
        Vec2::from_angle(self.angle())
    }

    pub fn sprite_row(self) -> u8 {
        SPRITE_ROWS[usize::from(self.0 % 8)]
    }
}

/// Dash charges, the active dash and charge regeneration.
#[derive(Component, Debug, Clone)]
pub struct Dash {
    pub charges: u32,
    pub max_charges: u32,
    pub direction: Vec2,
    active: Countdown,
    regen: Countdown,
    flash: Countdown,
}

impl Dash {
    pub fn new(max_charges: u32) -> Self {
        Self {
            charges: max_charges,
            max_charges,
            direction: Vec2::ZERO,
            active: Countdown::default(),
            regen: Countdown::default(),
            flash: Countdown::default(),
        }
    }

    pub fn is_dashing(&self) -> bool {
        self.active.is_running()
    }

    /// Dashing grants its own invulnerability, independent of the damage grace.
    pub fn is_invulnerable(&self) -> bool {
        self.is_dashing()
    }

    /// Raised for a moment after a charge regenerates.
    pub fn is_flashing(&self) -> bool {
        self.flash.is_running()
    }

    /// Start a dash along `facing`. Fails while dashing or without charges.
    pub fn try_start(&mut self, facing: Facing, config: &PlayerConfig) -> bool {
        if self.is_dashing() || self.charges == 0 {
            return false;
        }
        self.charges -= 1;
        self.direction = facing.direction();
        self.active.start(config.dash_duration);
        if !self.regen.is_running() {
            self.regen.start(config.dash_regen_time);
        }
        true
    }

    /// Advance the dash and regeneration timers. Returns `true` when a charge
    /// was restored on this tick.
    pub fn tick(&mut self, dt: f32, config: &PlayerConfig) -> bool {
        self.active.tick(dt);
        self.flash.tick(dt);

        if self.charges >= self.max_charges {
            self.regen.clear();
            return false;
        }
        if !self.regen.tick(dt) {
            return false;
        }
        self.charges += 1;
        self.flash.start(config.dash_flash_time);
        if self.charges < self.max_charges {
            self.regen.start(config.dash_regen_time);
        }
        true
    }
}

/// Damage grace period.
#[derive(Component, Debug, Default, Clone)]
pub struct Invulnerability {
    timer: Countdown,
}

impl Invulnerability {
    pub fn is_active(&self) -> bool {
        self.timer.is_running()
    }

    pub fn remaining(&self) -> f32 {
        self.timer.remaining()
    }

    /// Ensure at least `seconds` of invulnerability remain.
    pub fn grant(&mut self, seconds: f32) {
        self.timer.extend_to(seconds);
    }

    pub fn tick(&mut self, dt: f32) {
        self.timer.tick(dt);
    }
}

/// Attack animation and charge-up tracking.
#[derive(Component, Debug, Default, Clone)]
pub struct AttackState {
    animation: Countdown,
    charge_started: Option<f64>,
}

impl AttackState {
    pub fn is_attacking(&self) -> bool {
        self.animation.is_running()
    }

    pub fn begin_animation(&mut self, seconds: f32) {
        self.animation.start(seconds);
    }

    /// Stamp the start of a charge. Repeated presses keep the first stamp.
    pub fn begin_charge(&mut self, now: f64) {
        self.charge_started.get_or_insert(now);
    }

    /// End the charge, returning how long it was held.
    pub fn release(&mut self, now: f64) -> Option<f32> {
        self.charge_started.take().map(|start| (now - start) as f32)
    }

    /// Fraction of a full charge, reported once the indicator delay has passed.
    pub fn charge_progress(&self, now: f64, config: &PlayerConfig) -> f32 {
        let Some(start) = self.charge_started else {
            return 0.0;
        };
        let held = (now - start) as f32;
        if held < config.charge_indicator_delay {
            return 0.0;
        }
        (held / config.charge_time).min(1.0)
    }

    pub fn tick(&mut self, dt: f32) {
        self.animation.tick(dt);
    }
}

/// Two-frame walk cycle.
#[derive(Component, Debug, Clone)]
pub struct WalkAnimation {
    pub moving: bool,
    pub frame: u8,
    timer: u32,
}

impl Default for WalkAnimation {
    fn default() -> Self {
        Self {
            moving: false,
            frame: 1,
            timer: 0,
        }
    }
}

impl WalkAnimation {
    pub fn advance(&mut self, interval: u32) {
        if !self.moving {
            self.frame = 1;
            self.timer = 0;
            return;
        }
        self.timer += 1;
        if self.timer >= interval {
            self.frame = (self.frame + 1) % 2;
            self.timer = 0;
        }
    }
}

/// Components of a freshly spawned player.
pub fn player_bundle(position: Vec2, config: &PlayerConfig) -> impl Bundle {
    (
        Player,
        Body::new(position, config.size()),
        PlayerStats::from_config(config),
        Facing::default(),
        Dash::new(config.dash_charges),
        Invulnerability::default(),
        AttackState::default(),
        WalkAnimation::default(),
    )
}

/// Result of a hit that got through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageTaken {
    pub remaining: i32,
    pub respawned: bool,
}

/// Apply damage to the player unless either invulnerability is active.
///
/// A lethal hit refills HP and moves the player to the respawn point.
pub fn damage_player(
    stats: &mut PlayerStats,
    body: &mut Body,
    invulnerability: &mut Invulnerability,
    dash: &Dash,
    amount: i32,
    config: &PlayerConfig,
) -> Option<DamageTaken> {
    if invulnerability.is_active() || dash.is_invulnerable() {
        return None;
    }
    stats.take_damage(amount);
    invulnerability.grant(config.invulnerability_time);

    let remaining = stats.health;
    let respawned = stats.is_dead();
    if respawned {
        stats.health = stats.max_health;
        body.position = config.respawn_point();
    }
    Some(DamageTaken { remaining, respawned })
}
