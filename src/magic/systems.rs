//! Spell casting and cooldown systems.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::spells::{CastError, MagicConfig, SpellKind, Spellbook};
use crate::combat::Health;
use crate::core::{FrameClock, SimulationConfig, SpellCastEvent, FRAME_DT};
use crate::effects::{spawn_effect, Effect, EffectKind};
use crate::enemies::Enemy;
use crate::player::{Facing, Invulnerability, Player, PlayerCommand, PlayerStats};
use crate::world::{distance, Body, Bounds, LevelDimensions, Obstacles};

/// Everything a spell can touch.
#[derive(SystemParam)]
pub struct SpellContext<'w, 's> {
    commands: Commands<'w, 's>,
    spellbook: ResMut<'w, Spellbook>,
    config: Res<'w, SimulationConfig>,
    obstacles: Res<'w, Obstacles>,
    dimensions: Res<'w, LevelDimensions>,
    cast_events: EventWriter<'w, SpellCastEvent>,
    player: Query<
        'w,
        's,
        (&'static mut Body, &'static mut PlayerStats, &'static mut Invulnerability, &'static Facing),
        (With<Player>, Without<Enemy>),
    >,
    enemies: Query<'w, 's, (&'static Body, &'static mut Health), (With<Enemy>, Without<Player>)>,
}

impl SpellContext<'_, '_> {
    pub fn spellbook(&mut self) -> &mut Spellbook {
        &mut self.spellbook
    }

    /// Cast the currently selected spell.
    pub fn cast_selected(&mut self) -> bool {
        let kind = self.spellbook.selected();
        self.cast(Ok(kind))
    }

    /// Cast a spell by display name, case-insensitively.
    pub fn cast_named(&mut self, name: &str) -> bool {
        let kind = SpellKind::from_name(name).ok_or_else(|| CastError::UnknownSpell(name.to_string()));
        self.cast(kind)
    }

    fn cast(&mut self, kind: Result<SpellKind, CastError>) -> bool {
        if self.player.is_empty() {
            warn!("No player to cast with");
            return false;
        }
        let outcome = kind.and_then(|kind| self.try_cast(kind));
        match &outcome {
            Ok(kind) => info!("Cast {}", kind.name()),
            Err(err) => info!("Cast refused: {}", err),
        }
        let success = outcome.is_ok();
        self.cast_events.send(SpellCastEvent { outcome });
        success
    }

    fn try_cast(&mut self, kind: SpellKind) -> Result<SpellKind, CastError> {
        let Ok((mut body, mut stats, mut invulnerability, facing)) = self.player.get_single_mut() else {
            return Err(CastError::UnknownSpell(kind.name().to_string()));
        };
        self.spellbook.begin_cast(kind, &mut stats.mana)?;

        let magic: &MagicConfig = &self.config.magic;
        match kind {
            SpellKind::Heal => {
                stats.heal(magic.heal_amount);
                spawn_effect(&mut self.commands, Effect::new(EffectKind::Heal, body.position));
            }
            SpellKind::Teleport => {
                let target = body.position + facing.direction() * magic.teleport_distance;
                let bounds = Bounds {
                    min: Vec2::ZERO,
                    max: self.dimensions.world - body.size,
                };
                if !bounds.contains(target) {
                    debug!("Teleport refused: destination outside the world");
                } else if self.obstacles.blocks_player(&body.aabb_at(target)) {
                    debug!("Teleport blocked by obstacle");
                } else {
                    body.position = target;
                }
            }
            SpellKind::Barrier => invulnerability.grant(magic.barrier_duration),
            SpellKind::Thunder => {
                for (enemy_body, mut health) in self.enemies.iter_mut() {
                    if !health.is_dead() && distance(body.position, enemy_body.position) <= magic.thunder_radius {
                        health.take_damage(magic.thunder_damage);
                        spawn_effect(&mut self.commands, Effect::new(EffectKind::Hit, enemy_body.position));
                    }
                }
            }
        }
        Ok(kind)
    }
}

/// Handle cast and cycle commands. Cast attempts are throttled.
pub fn handle_spell_commands(
    mut commands: EventReader<PlayerCommand>,
    clock: Res<FrameClock>,
    mut spells: SpellContext,
) {
    for command in commands.read() {
        match command {
            PlayerCommand::CastSpell => {
                let interval = spells.config.magic.cast_interval;
                if spells.spellbook().throttle(clock.elapsed, interval) {
                    spells.cast_selected();
                }
            }
            PlayerCommand::CycleSpell => {
                let selected = spells.spellbook().cycle();
                info!("Selected {}", selected.name());
            }
            _ => {}
        }
    }
}

pub fn tick_spell_cooldowns(mut spellbook: ResMut<Spellbook>) {
    spellbook.tick(FRAME_DT);
}
