//! Spell catalog, cast rules and cooldown bookkeeping.

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::core::Countdown;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpellKind {
    Heal,
    Teleport,
    Barrier,
    Thunder,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpellDefinition {
    pub kind: SpellKind,
    pub name: &'static str,
    pub mana_cost: i32,
    /// Seconds before the spell can be cast again.
    pub cooldown: f32,
}

/// Every spell in selection order.
pub const SPELLS: [SpellDefinition; 4] = [
    SpellDefinition {
        kind: SpellKind::Heal,
        name: "Heal",
        mana_cost: 2,
        cooldown: 1.0,
    },
    SpellDefinition {
        kind: SpellKind::Teleport,
        name: "Teleport",
        mana_cost: 4,
        cooldown: 3.0,
    },
    SpellDefinition {
        kind: SpellKind::Barrier,
        name: "Barrier",
        mana_cost: 3,
        cooldown: 5.0,
    },
    SpellDefinition {
        kind: SpellKind::Thunder,
        name: "Thunder",
        mana_cost: 5,
        cooldown: 2.0,
    },
];

impl SpellKind {
    fn index(self) -> usize {
        match self {
            SpellKind::Heal => 0,
            SpellKind::Teleport => 1,
            SpellKind::Barrier => 2,
            SpellKind::Thunder => 3,
        }
    }

    pub fn definition(self) -> &'static SpellDefinition {
        &SPELLS[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.definition().name
    }

    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<SpellKind> {
        SPELLS
            .iter()
            .find(|spell| spell.name.eq_ignore_ascii_case(name.trim()))
            .map(|spell| spell.kind)
    }
}

/// Why a cast was refused.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CastError {
    #[error("Unknown spell '{0}'")]
    UnknownSpell(String),

    #[error("Not enough MP for {spell}: need {cost}, have {available}")]
    NotEnoughMp {
        spell: &'static str,
        cost: i32,
        available: i32,
    },

    #[error("{spell} is on cooldown ({remaining:.2}s left)")]
    OnCooldown { spell: &'static str, remaining: f32 },
}

/// Effect strengths for the spells.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MagicConfig {
    pub heal_amount: i32,
    pub teleport_distance: f32,
    /// Invulnerability granted by Barrier, in seconds
    pub barrier_duration: f32,
    pub thunder_radius: f32,
    pub thunder_damage: i32,
    /// Minimum seconds between cast attempts from held input
    pub cast_interval: f32,
}

impl Default for MagicConfig {
    fn default() -> Self {
        Self {
            heal_amount: 5,
            teleport_distance: 64.0,
            barrier_duration: 3.0,
            thunder_radius: 80.0,
            thunder_damage: 15,
            cast_interval: 0.5,
        }
    }
}

/// Selected spell, per-spell cooldowns and the cast input throttle.
#[derive(Resource, Debug, Clone, Default)]
pub struct Spellbook {
    selected: usize,
    cooldowns: [Countdown; SPELLS.len()],
    last_attempt: Option<f64>,
}

impl Spellbook {
    pub fn selected(&self) -> SpellKind {
        SPELLS[self.selected].kind
    }

    /// Select the next spell, wrapping around. MP and cooldowns are ignored.
    pub fn cycle(&mut self) -> SpellKind {
        self.selected = (self.selected + 1) % SPELLS.len();
        self.selected()
    }

    pub fn cooldown(&self, kind: SpellKind) -> f32 {
        self.cooldowns[kind.index()].remaining()
    }

    /// Validate a cast against `mana`, then debit it and start the cooldown.
    pub fn begin_cast(&mut self, kind: SpellKind, mana: &mut i32) -> Result<&'static SpellDefinition, CastError> {
        let spell = kind.definition();
        if *mana < spell.mana_cost {
            return Err(CastError::NotEnoughMp {
                spell: spell.name,
                cost: spell.mana_cost,
                available: *mana,
            });
        }
        let cooldown = &mut self.cooldowns[kind.index()];
        if cooldown.is_running() {
            return Err(CastError::OnCooldown {
                spell: spell.name,
                remaining: cooldown.remaining(),
            });
        }
        *mana -= spell.mana_cost;
        cooldown.start(spell.cooldown);
        Ok(spell)
    }

    /// Allow at most one attempt per `interval` seconds of game time.
    pub fn throttle(&mut self, now: f64, interval: f32) -> bool {
        if self
            .last_attempt
            .is_some_and(|last| ((now - last) as f32) < interval - crate::core::TIMER_EPSILON)
        {
            return false;
        }
        self.last_attempt = Some(now);
        true
    }

    pub fn tick(&mut self, dt: f32) {
        for cooldown in &mut self.cooldowns {
            cooldown.tick(dt);
        }
    }
}
