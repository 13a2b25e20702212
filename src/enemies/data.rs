//! Enemy kind descriptors.

use serde::Deserialize;

use super::components::EnemyStats;

/// Every enemy in the game is one of these kinds.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Slime,
    Ant,
}

/// Fixed stats for an enemy kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyDefinition {
    pub name: &'static str,
    pub max_health: i32,
    /// Contact damage dealt to the player.
    pub damage: i32,
    /// Chase speed in units per frame.
    pub move_speed: f32,
    /// Experience dropped on death.
    pub exp_value: u32,
    pub color: &'static str,
}

const SLIME: EnemyDefinition = EnemyDefinition {
    name: "Slime",
    max_health: 8,
    damage: 2,
    move_speed: 0.5,
    exp_value: 3,
    color: "#90EE90",
};

const ANT: EnemyDefinition = EnemyDefinition {
    name: "Ant",
    max_health: 6,
    damage: 1,
    move_speed: 1.5,
    exp_value: 2,
    color: "#8B4513",
};

impl EnemyKind {
    pub fn definition(self) -> &'static EnemyDefinition {
        match self {
            EnemyKind::Slime => &SLIME,
            EnemyKind::Ant => &ANT,
        }
    }
}

impl EnemyDefinition {
    /// Convert to EnemyStats component.
    pub fn to_stats(&self) -> EnemyStats {
        EnemyStats {
            damage: self.damage,
            move_speed: self.move_speed,
            exp_value: self.exp_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ants_are_faster_but_weaker_than_slimes() {
        let slime = EnemyKind::Slime.definition();
        let ant = EnemyKind::Ant.definition();
        assert!(ant.move_speed > slime.move_speed);
        assert!(ant.max_health < slime.max_health);
        assert_eq!((slime.damage, slime.exp_value), (2, 3));
        assert_eq!((ant.damage, ant.exp_value), (1, 2));
    }

    #[test]
    fn kinds_parse_from_ron() {
        let kinds: Vec<EnemyKind> = ron::from_str("[Slime, Ant]").expect("valid RON");
        assert_eq!(kinds, vec![EnemyKind::Slime, EnemyKind::Ant]);
    }
}
