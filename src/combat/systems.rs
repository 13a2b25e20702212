//! Combat systems: attacks, projectiles and collision damage.

use bevy::prelude::*;

use super::components::*;
use crate::core::{FrameClock, PlayerDamagedEvent, SimSet, SimulationConfig, FRAME_DT, TIMER_EPSILON};
use crate::effects::{spawn_effect, Effect, EffectKind};
use crate::enemies::{knock_back, reap_dead_enemies, Enemy, EnemyStats};
use crate::player::{damage_player, AttackState, Dash, Facing, Invulnerability, Player, PlayerCommand, PlayerStats};
use crate::world::{distance, Body, LevelDimensions, Obstacles};

/// Enemies the player's sword can reach.
type EnemyTargets<'w, 's> = Query<'w, 's, (&'static mut Body, &'static mut Health), (With<Enemy>, Without<Player>)>;

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app
        // Attacks resolve first in the input phase
        .add_systems(Update, handle_attack_commands.in_set(SimSet::Input))
        .add_systems(Update, advance_projectiles.in_set(SimSet::Projectiles))
        // Shots can kill; reap again so the orb drops on the same frame
        .add_systems(
            Update,
            (enemy_contact_damage, projectile_hits, reap_dead_enemies)
                .chain()
                .in_set(SimSet::Collisions),
        );
}

/// Charge on press; on release fire a projectile if held long enough,
/// otherwise swing.
pub fn handle_attack_commands(
    mut commands: Commands,
    mut player_commands: EventReader<PlayerCommand>,
    clock: Res<FrameClock>,
    config: Res<SimulationConfig>,
    obstacles: Res<Obstacles>,
    dimensions: Res<LevelDimensions>,
    mut player_query: Query<(&Body, &Facing, &PlayerStats, &mut AttackState), (With<Player>, Without<Enemy>)>,
    mut enemy_query: EnemyTargets,
) {
    let Ok((body, facing, stats, mut attack)) = player_query.get_single_mut() else {
        player_commands.clear();
        return;
    };

    for command in player_commands.read() {
        match command {
            PlayerCommand::AttackPress => attack.begin_charge(clock.elapsed),
            PlayerCommand::AttackRelease => {
                let Some(held) = attack.release(clock.elapsed) else {
                    continue;
                };
                attack.begin_animation(config.player.attack_duration);
                if held + TIMER_EPSILON >= config.player.charge_time {
                    commands.spawn(projectile_bundle(body.center(), facing.angle(), &config.combat, stats.sword));
                    debug!("Charged shot after {:.2}s", held);
                } else {
                    melee_swing(
                        &mut commands,
                        body,
                        *facing,
                        stats.attack_power,
                        &config.combat,
                        &mut enemy_query,
                        &obstacles,
                        &dimensions,
                    );
                }
            }
            _ => {}
        }
    }
}

/// Strike every enemy whose centre is within range of the strike point.
///
/// Emits a hit effect per enemy struck and exactly one slash effect.
#[allow(clippy::too_many_arguments)]
pub fn melee_swing(
    commands: &mut Commands,
    player: &Body,
    facing: Facing,
    damage: i32,
    config: &CombatConfig,
    enemies: &mut EnemyTargets,
    obstacles: &Obstacles,
    dimensions: &LevelDimensions,
) {
    let origin = player.center();
    let strike = origin + facing.direction() * config.melee_range;

    for (mut body, mut health) in enemies.iter_mut() {
        if health.is_dead() || distance(strike, body.center()) > config.melee_range {
            continue;
        }
        health.take_damage(damage);
        let push = (body.center() - origin).normalize_or_zero() * config.melee_knockback;
        knock_back(&mut body, push, dimensions, obstacles);
        spawn_effect(commands, Effect::new(EffectKind::Hit, body.center()));
    }

    spawn_effect(commands, Effect::slash(strike, facing.angle()));
}

/// Move projectiles and remove the expired or spent ones.
pub fn advance_projectiles(mut commands: Commands, mut projectiles: Query<(Entity, &mut Body, &mut Projectile)>) {
    for (entity, mut body, mut projectile) in &mut projectiles {
        if projectile.spent {
            commands.entity(entity).despawn();
            continue;
        }
        body.position += projectile.direction() * projectile.speed;
        if projectile.age(FRAME_DT) {
            commands.entity(entity).despawn();
        }
    }
}

/// Damage the player for every enemy touching them, subject to the grace
/// period the first hit starts.
pub fn enemy_contact_damage(
    mut commands: Commands,
    config: Res<SimulationConfig>,
    mut damaged: EventWriter<PlayerDamagedEvent>,
    mut player_query: Query<(&mut Body, &mut PlayerStats, &mut Invulnerability, &Dash), (With<Player>, Without<Enemy>)>,
    enemy_query: Query<(&Body, &EnemyStats, &Enemy), Without<Player>>,
) {
    let Ok((mut body, mut stats, mut invulnerability, dash)) = player_query.get_single_mut() else {
        return;
    };

    let mut enemies: Vec<_> = enemy_query.iter().collect();
    enemies.sort_by_key(|(_, _, enemy)| enemy.spawn_order);

    for (enemy_body, enemy_stats, enemy) in enemies {
        if distance(body.position, enemy_body.position) >= config.combat.contact_radius {
            continue;
        }
        let hit_point = body.center();
        let Some(taken) = damage_player(
            &mut stats,
            &mut body,
            &mut invulnerability,
            dash,
            enemy_stats.damage,
            &config.player,
        ) else {
            continue;
        };

        spawn_effect(&mut commands, Effect::new(EffectKind::Hit, hit_point));
        if taken.respawned {
            info!("Player defeated by {:?}, respawning", enemy.kind);
        }
        damaged.send(PlayerDamagedEvent {
            amount: enemy_stats.damage,
            remaining: taken.remaining,
            respawned: taken.respawned,
        });
    }
}

/// Each live friendly projectile hits the first enemy, in spawn order,
/// within its hit radius and is then spent.
pub fn projectile_hits(
    mut commands: Commands,
    config: Res<SimulationConfig>,
    obstacles: Res<Obstacles>,
    dimensions: Res<LevelDimensions>,
    mut projectiles: Query<(&Body, &mut Projectile), Without<Enemy>>,
    mut enemies: Query<(&mut Body, &mut Health, &Enemy), With<Enemy>>,
) {
    let mut targets: Vec<_> = enemies.iter_mut().collect();
    targets.sort_by_key(|(_, _, enemy)| enemy.spawn_order);

    for (projectile_body, mut projectile) in &mut projectiles {
        if !projectile.friendly || projectile.spent {
            continue;
        }
        let center = projectile_body.center();
        let Some((body, health, _)) = targets.iter_mut().find(|(body, health, _)| {
            !health.is_dead() && distance(center, body.position) < config.combat.projectile_hit_radius
        }) else {
            continue;
        };

        health.take_damage(projectile.damage);
        let push = projectile.direction() * config.combat.projectile_knockback;
        knock_back(body, push, &dimensions, &obstacles);
        spawn_effect(&mut commands, Effect::new(EffectKind::Hit, body.position));
        projectile.spent = true;
    }
}
