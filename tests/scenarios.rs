//! End-to-end scenarios driven through the `Simulation` facade.

mod common;

use bevy::prelude::*;

use common::*;
use crystalis_sim::combat::Health;
use crystalis_sim::core::{EnemyDefeatedEvent, SpellCastEvent};
use crystalis_sim::effects::EffectKind;
use crystalis_sim::enemies::EnemyKind;
use crystalis_sim::magic::{CastError, SpellKind};
use crystalis_sim::player::MoveDirection;
use crystalis_sim::world::{EnemySpawnDef, EntryDef, MountainDef};

#[test]
fn heal_restores_hp_and_costs_mp() {
    let mut sim = simulation(vec![arena(1)]);
    edit_stats(&mut sim, |stats| stats.health = 10);

    assert!(sim.cast_spell_named("heal"));

    let stats = player_stats(&sim);
    assert_eq!(stats.health, 15);
    assert_eq!(stats.mana, 2);
    assert_eq!(sim.snapshot().effect_count(EffectKind::Heal), 1);

    let events = sim.world().resource::<Events<SpellCastEvent>>();
    let outcomes: Vec<_> = events.iter_current_update_events().map(|e| e.outcome.clone()).collect();
    assert_eq!(outcomes, vec![Ok(SpellKind::Heal)]);
}

#[test]
fn heal_is_capped_and_refusals_are_typed() {
    let mut sim = simulation(vec![arena(1)]);
    edit_stats(&mut sim, |stats| stats.health = 14);

    assert!(sim.cast_spell_named("Heal"));
    assert_eq!(player_stats(&sim).health, 16);

    // Cooldown, then an unknown name, then too little MP.
    assert!(!sim.cast_spell_named("heal"));
    assert!(!sim.cast_spell_named("fireball"));
    assert!(!sim.cast_spell_named("thunder"));
    assert_eq!(player_stats(&sim).mana, 2);

    let events = sim.world().resource::<Events<SpellCastEvent>>();
    let errors: Vec<_> = events
        .iter_current_update_events()
        .filter_map(|e| e.outcome.clone().err())
        .collect();
    assert!(matches!(errors[0], CastError::OnCooldown { spell: "Heal", .. }));
    assert_eq!(errors[1], CastError::UnknownSpell("fireball".to_string()));
    assert!(matches!(errors[2], CastError::NotEnoughMp { cost: 5, available: 2, .. }));
}

#[test]
fn two_melee_hits_kill_an_ant_and_drop_one_orb() {
    let mut sim = simulation(vec![arena(1)]);
    place_player(&mut sim, Vec2::new(100.0, 100.0));
    set_facing(&mut sim, 2);
    freeze_enemies(&mut sim);
    let start = Vec2::new(115.0, 108.0);
    let ant = spawn_enemy(&mut sim, EnemyKind::Ant, start, 0);

    sim.attack_press();
    sim.step();
    sim.attack_release();
    sim.step();

    assert_eq!(sim.world().get::<Health>(ant).map(|h| h.current), Some(2));
    assert_eq!(sim.snapshot().effect_count(EffectKind::MeleeSlash), 1);

    // Put the ant back where the first swing found it.
    sim.world_mut().get_mut::<crystalis_sim::world::Body>(ant).expect("ant alive").position = start;
    sim.attack_press();
    sim.step();
    sim.attack_release();
    sim.step();

    assert!(enemy_body(&sim, ant).is_none(), "dead ant is removed");
    let snapshot = sim.snapshot();
    assert!(snapshot.enemies.is_empty());
    assert_eq!(snapshot.items.len(), 1);

    let player_center = Vec2::new(107.0, 116.5);
    let ant_center = start + Vec2::splat(8.0);
    let expected = start + (ant_center - player_center).normalize() * 50.0;
    assert!(snapshot.items[0].position.abs_diff_eq(expected, 1e-3));
    assert_eq!(snapshot.items[0].value, 2);

    let defeated = sim.world().resource::<Events<EnemyDefeatedEvent>>();
    assert_eq!(defeated.iter_current_update_events().count(), 1);
}

#[test]
fn long_hold_fires_projectile_short_hold_swings() {
    let mut sim = simulation(vec![arena(1)]);

    sim.attack_press();
    step_n(&mut sim, 120);
    assert!(sim.snapshot().player.expect("player").charge_progress >= 1.0 - 1e-4);
    sim.attack_release();
    sim.step();
    let snapshot = sim.snapshot();
    assert_eq!(snapshot.projectiles.len(), 1);
    assert_eq!(snapshot.effect_count(EffectKind::MeleeSlash), 0);

    // Let the shot expire before the short press.
    step_n(&mut sim, 40);
    sim.attack_press();
    step_n(&mut sim, 30);
    sim.attack_release();
    sim.step();
    let snapshot = sim.snapshot();
    assert!(snapshot.projectiles.is_empty());
    assert_eq!(snapshot.effect_count(EffectKind::MeleeSlash), 1);
}

#[test]
fn entry_moves_player_to_destination_level() {
    let mut village = arena(1);
    village.trees = vec![(600.0, 100.0), (700.0, 100.0)];
    village.entries = vec![EntryDef {
        x: 300.0,
        y: 380.0,
        width: 40.0,
        height: 60.0,
        destination: 2,
        destination_position: None,
    }];
    let mut forest = arena(2);
    forest.spawn = (500.0, 300.0);
    forest.trees = vec![(50.0, 50.0)];
    forest.enemies = vec![EnemySpawnDef {
        kind: EnemyKind::Slime,
        x: 800.0,
        y: 600.0,
    }];

    let mut sim = simulation(vec![village, forest]);
    assert_eq!(sim.active_level(), Some(1));
    place_player(&mut sim, Vec2::new(305.0, 390.0));
    sim.step();

    assert_eq!(sim.active_level(), Some(2));
    assert_eq!(player_body(&sim).position, Vec2::new(500.0, 300.0));

    let obstacles = sim.obstacles();
    assert_eq!(obstacles.len(), 1);
    assert_eq!(obstacles.trees[0].visual.position(), Vec2::new(50.0, 50.0));

    let snapshot = sim.snapshot();
    assert_eq!(snapshot.enemies.len(), 1);
    assert_eq!(snapshot.enemies[0].position, Vec2::new(800.0, 600.0));
}

#[test]
fn mountain_zone_slows_until_left() {
    let mut level = arena(1);
    level.mountains = vec![MountainDef {
        x: 200.0,
        y: 200.0,
        portal: None,
    }];
    let mut sim = simulation(vec![level]);

    // Bottom edge at 200.5 is inside the 200..260 zone, well above the slope.
    place_player(&mut sim, Vec2::new(215.0, 167.5));
    sim.set_movement(MoveDirection::Up, true);

    sim.step();
    let y = player_body(&sim).position.y;
    assert!((y - (167.5 - 0.8)).abs() < 1e-4, "slowed to 0.8, got {y}");

    sim.step();
    let next = player_body(&sim).position.y;
    assert!((y - next - 2.0).abs() < 1e-4, "full speed after leaving the zone");
}
