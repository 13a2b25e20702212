//! Timing and resource properties of the player and projectiles.

mod common;

use bevy::prelude::*;

use common::*;
use crystalis_sim::combat::Health;
use crystalis_sim::core::{DashChargeEvent, EnemyDefeatedEvent, LevelUpEvent, SpellCastEvent};
use crystalis_sim::effects::EffectKind;
use crystalis_sim::enemies::EnemyKind;
use crystalis_sim::magic::CastError;
use crystalis_sim::player::{Dash, MoveDirection};
use crystalis_sim::world::{ItemDef, MountainDef, WallDef};
use crystalis_sim::Simulation;

fn dash_charges(sim: &Simulation) -> u32 {
    sim.world().get::<Dash>(sim.player()).expect("player dash").charges
}

#[test]
fn projectile_lives_exactly_thirty_steps() {
    let mut sim = simulation(vec![arena(1)]);
    sim.attack_press();
    step_n(&mut sim, 90);
    sim.attack_release();
    sim.step();

    let first = sim.snapshot().projectiles[0].position;
    for step in 2..30 {
        sim.step();
        assert_eq!(sim.snapshot().projectiles.len(), 1, "missing at step {step}");
    }
    // Facing up: four units per step.
    let last = sim.snapshot().projectiles[0].position;
    assert!(last.abs_diff_eq(first - Vec2::new(0.0, 4.0 * 28.0), 1e-3));

    sim.step();
    assert!(sim.snapshot().projectiles.is_empty());
}

#[test]
fn dash_charges_regenerate_one_at_a_time() {
    let mut sim = simulation(vec![arena(1)]);

    sim.dash();
    sim.step();
    assert_eq!(dash_charges(&sim), 1);
    step_n(&mut sim, 12);
    sim.dash();
    sim.step();
    assert_eq!(dash_charges(&sim), 0);

    // The regeneration timer started with the first dash on frame 1.
    step_n(&mut sim, 59 - 14);
    assert_eq!(dash_charges(&sim), 0);
    sim.step();
    assert_eq!(dash_charges(&sim), 1);
    assert!(sim.snapshot().player.expect("player").dash_flash);
    let events = sim.world().resource::<Events<DashChargeEvent>>();
    assert_eq!(events.iter_current_update_events().map(|e| e.charges).collect::<Vec<_>>(), vec![1]);

    step_n(&mut sim, 59);
    assert_eq!(dash_charges(&sim), 1);
    sim.step();
    assert_eq!(dash_charges(&sim), 2);
}

#[test]
fn dash_request_mid_dash_is_ignored() {
    let mut sim = simulation(vec![arena(1)]);
    sim.dash();
    sim.step();
    // A second request mid-dash does nothing.
    sim.dash();
    sim.step();
    assert_eq!(dash_charges(&sim), 1);
}

#[test]
fn contact_damage_respects_grace_period() {
    let mut sim = simulation(vec![arena(1)]);
    freeze_enemies(&mut sim);
    let spawn = player_body(&sim).position;
    spawn_enemy(&mut sim, EnemyKind::Slime, spawn + Vec2::new(5.0, 0.0), 0);
    spawn_enemy(&mut sim, EnemyKind::Ant, spawn + Vec2::new(-5.0, 0.0), 1);

    sim.step();
    // Slime comes first in spawn order; the ant's hit is suppressed.
    assert_eq!(player_stats(&sim).health, 14);
    step_n(&mut sim, 59);
    assert_eq!(player_stats(&sim).health, 14);
    sim.step();
    assert_eq!(player_stats(&sim).health, 12);
}

#[test]
fn dashing_player_takes_no_contact_damage() {
    let mut sim = simulation(vec![arena(1)]);
    freeze_enemies(&mut sim);
    sim.dash();
    sim.step();
    // Drop a slime on the player mid-dash.
    let position = player_body(&sim).position;
    spawn_enemy(&mut sim, EnemyKind::Slime, position, 0);
    sim.step();
    assert_eq!(player_stats(&sim).health, 16);
}

#[test]
fn lethal_hit_respawns_with_full_health() {
    let mut sim = simulation(vec![arena(1)]);
    freeze_enemies(&mut sim);
    edit_stats(&mut sim, |stats| stats.health = 2);
    place_player(&mut sim, Vec2::new(600.0, 200.0));
    spawn_enemy(&mut sim, EnemyKind::Slime, Vec2::new(605.0, 200.0), 0);

    sim.step();
    let stats = player_stats(&sim);
    assert_eq!(stats.health, stats.max_health);
    assert_eq!(player_body(&sim).position, Vec2::new(256.0, 400.0));
}

#[test]
fn pickup_levels_up_at_threshold() {
    let mut level = arena(1);
    level.items = vec![ItemDef {
        x: 256.0,
        y: 400.0,
        value: 5,
    }];
    let mut sim = simulation(vec![level]);
    edit_stats(&mut sim, |stats| {
        stats.exp = 15;
        stats.health = 3;
    });

    sim.step();
    let stats = player_stats(&sim);
    assert_eq!(stats.level, 2);
    assert_eq!(stats.exp, 0);
    assert_eq!(stats.exp_to_next, 40);
    assert_eq!((stats.health, stats.max_health), (20, 20));
    assert_eq!((stats.mana, stats.max_mana), (6, 6));
    assert_eq!(stats.attack_power, 5);
    assert!(sim.snapshot().items.is_empty());

    let events = sim.world().resource::<Events<LevelUpEvent>>();
    assert_eq!(events.iter_current_update_events().map(|e| e.new_level).collect::<Vec<_>>(), vec![2]);
}

#[test]
fn blocked_diagonal_slides_along_wall() {
    let mut level = arena(1);
    level.walls = vec![WallDef {
        x: 100.0,
        y: 100.0,
        width: 200.0,
        height: 16.0,
        opening: false,
    }];
    let mut sim = simulation(vec![level]);
    place_player(&mut sim, Vec2::new(150.0, 117.0));
    sim.set_movement(MoveDirection::Up, true);
    sim.set_movement(MoveDirection::Right, true);

    sim.step();
    let position = player_body(&sim).position;
    assert!((position.x - (150.0 + 2.0 * 0.707)).abs() < 1e-4);
    assert_eq!(position.y, 117.0);
    assert_eq!(sim.snapshot().player.expect("player").facing, 1);
}

#[test]
fn teleport_refused_at_world_edge_still_costs_mp() {
    let mut sim = simulation(vec![arena(1)]);
    place_player(&mut sim, Vec2::new(600.0, 20.0));
    // Facing up: 64 units would leave the world.
    assert!(sim.cast_spell_named("teleport"));
    assert_eq!(player_body(&sim).position, Vec2::new(600.0, 20.0));
    assert_eq!(player_stats(&sim).mana, 0);

    set_facing(&mut sim, 4);
    edit_stats(&mut sim, |stats| stats.mana = 4);
    assert!(!sim.cast_spell_named("teleport"), "still cooling down");
    step_n(&mut sim, 180);
    assert!(sim.cast_spell_named("teleport"));
    assert!(player_body(&sim).position.abs_diff_eq(Vec2::new(600.0, 84.0), 1e-3));
}

#[test]
fn thunder_hits_every_enemy_in_radius() {
    let mut sim = simulation(vec![arena(1)]);
    freeze_enemies(&mut sim);
    edit_stats(&mut sim, |stats| stats.mana = 5);
    let origin = Vec2::new(600.0, 300.0);
    place_player(&mut sim, origin);
    let near = spawn_enemy(&mut sim, EnemyKind::Slime, origin + Vec2::new(70.0, 0.0), 0);
    let far = spawn_enemy(&mut sim, EnemyKind::Slime, origin + Vec2::new(0.0, 90.0), 1);

    assert!(sim.cast_spell_named("thunder"));
    sim.step();

    assert!(enemy_body(&sim, near).is_none(), "15 damage kills a slime");
    assert!(enemy_body(&sim, far).is_some());
    assert_eq!(sim.snapshot().items.len(), 1);
}

#[test]
fn barrier_extends_invulnerability() {
    let mut sim = simulation(vec![arena(1)]);
    freeze_enemies(&mut sim);
    assert!(sim.cast_spell_named("barrier"));
    let position = player_body(&sim).position;
    spawn_enemy(&mut sim, EnemyKind::Slime, position, 0);

    step_n(&mut sim, 179);
    assert_eq!(player_stats(&sim).health, 16);
    sim.step();
    assert_eq!(player_stats(&sim).health, 14);
}

fn enemy_health(sim: &Simulation, enemy: Entity) -> Option<i32> {
    sim.world().get::<Health>(enemy).map(|health| health.current)
}

/// Hold attack long enough for a charged shot, facing right from (600, 300).
fn charge_shot_right(sim: &mut Simulation) {
    place_player(sim, Vec2::new(600.0, 300.0));
    set_facing(sim, 2);
    sim.attack_press();
    step_n(sim, 90);
}

#[test]
fn projectile_hits_first_enemy_in_spawn_order_once() {
    let mut sim = simulation(vec![arena(1)]);
    freeze_enemies(&mut sim);
    charge_shot_right(&mut sim);

    // Both corners come within 20 of the shot on the same frame; the later
    // spawn is the nearer one.
    let first = spawn_enemy(&mut sim, EnemyKind::Slime, Vec2::new(662.0, 318.0), 0);
    let second = spawn_enemy(&mut sim, EnemyKind::Slime, Vec2::new(660.0, 316.0), 1);
    sim.attack_release();
    for _ in 0..20 {
        sim.step();
        if enemy_health(&sim, first) != Some(8) || enemy_health(&sim, second) != Some(8) {
            break;
        }
    }

    assert_eq!(enemy_health(&sim, first), Some(4));
    assert_eq!(enemy_health(&sim, second), Some(8));
    // Knocked back 35 along the shot.
    assert_eq!(enemy_body(&sim, first).expect("still alive").position, Vec2::new(697.0, 318.0));
    let snapshot = sim.snapshot();
    assert_eq!(snapshot.effect_count(EffectKind::Hit), 1);
    assert_eq!(snapshot.projectiles.len(), 1, "spent shot lingers until its next update");

    sim.step();
    assert!(sim.snapshot().projectiles.is_empty());
    step_n(&mut sim, 10);
    assert_eq!(enemy_health(&sim, second), Some(8));
}

#[test]
fn killing_shot_drops_orb_on_the_same_step() {
    let mut sim = simulation(vec![arena(1)]);
    freeze_enemies(&mut sim);
    charge_shot_right(&mut sim);

    let ant = spawn_enemy(&mut sim, EnemyKind::Ant, Vec2::new(660.0, 316.0), 0);
    sim.world_mut().get_mut::<Health>(ant).expect("ant health").current = 4;
    sim.attack_release();
    for _ in 0..20 {
        sim.step();
        if enemy_health(&sim, ant).map_or(true, |hp| hp < 4) {
            break;
        }
    }

    assert!(enemy_body(&sim, ant).is_none(), "dead ant is removed on the hit frame");
    let snapshot = sim.snapshot();
    assert!(snapshot.enemies.is_empty());
    assert_eq!(snapshot.projectiles.len(), 1);
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.items[0].position, Vec2::new(695.0, 316.0));
    let defeated = sim.world().resource::<Events<EnemyDefeatedEvent>>();
    assert_eq!(defeated.iter_current_update_events().count(), 1);
}

#[test]
fn held_cast_input_is_throttled() {
    let mut sim = simulation(vec![arena(1)]);
    edit_stats(&mut sim, |stats| stats.health = 5);

    for frame in 1..=60 {
        sim.cast_spell();
        sim.step();
        let events = sim.world().resource::<Events<SpellCastEvent>>();
        let outcomes: Vec<_> = events.iter_current_update_events().map(|e| e.outcome.clone()).collect();
        match frame {
            1 => assert_eq!(outcomes.len(), 1),
            31 => assert!(matches!(
                outcomes[..],
                [Err(CastError::OnCooldown { spell: "Heal", .. })]
            )),
            _ => assert!(outcomes.is_empty(), "attempt on frame {frame} was not throttled"),
        }
    }
    let stats = player_stats(&sim);
    assert_eq!((stats.health, stats.mana), (10, 2));

    sim.cast_spell();
    sim.step();
    let stats = player_stats(&sim);
    assert_eq!((stats.health, stats.mana), (15, 0));
}

#[test]
fn cycling_wraps_and_queued_cast_uses_selection() {
    let mut sim = simulation(vec![arena(1)]);
    edit_stats(&mut sim, |stats| stats.mana = 0);

    let mut names = Vec::new();
    for _ in 0..4 {
        sim.cycle_spell();
        sim.step();
        names.push(sim.snapshot().player.expect("player").spell);
    }
    assert_eq!(names, vec!["Teleport", "Barrier", "Thunder", "Heal"]);

    edit_stats(&mut sim, |stats| stats.mana = 3);
    sim.cycle_spell();
    sim.cycle_spell();
    sim.cast_spell();
    sim.step();
    let player = sim.snapshot().player.expect("player");
    assert_eq!(player.spell, "Barrier");
    assert_eq!(player.mana, 0);
    assert!(player.invulnerable);
}

#[test]
fn mountain_slope_stops_chasing_enemy() {
    let mut level = arena(1);
    level.mountains = vec![MountainDef {
        x: 100.0,
        y: 100.0,
        portal: None,
    }];
    let mut sim = simulation(vec![level]);
    // Slope spans (110..170, 130..160); the player stands past it.
    place_player(&mut sim, Vec2::new(180.0, 137.0));
    let ant = spawn_enemy(&mut sim, EnemyKind::Ant, Vec2::new(90.0, 137.0), 0);

    step_n(&mut sim, 20);
    assert_eq!(enemy_body(&sim, ant).expect("ant").position, Vec2::new(93.0, 137.0));
    assert!(sim.snapshot().enemies[0].chasing);
}

#[test]
fn chasing_enemy_slides_along_wall() {
    let mut level = arena(1);
    level.walls = vec![WallDef {
        x: 100.0,
        y: 100.0,
        width: 200.0,
        height: 16.0,
        opening: false,
    }];
    let mut sim = simulation(vec![level]);
    place_player(&mut sim, Vec2::new(200.0, 60.0));
    let ant = spawn_enemy(&mut sim, EnemyKind::Ant, Vec2::new(150.0, 117.0), 0);

    step_n(&mut sim, 10);
    let position = enemy_body(&sim, ant).expect("ant").position;
    assert_eq!(position.y, 117.0);
    assert!(position.x > 155.0, "slid to {position}");
}
