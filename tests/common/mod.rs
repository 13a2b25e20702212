//! Shared setup for the integration tests.
#![allow(dead_code)]

use bevy::prelude::*;

use crystalis_sim::core::SimulationConfig;
use crystalis_sim::enemies::{enemy_bundle, EnemyFreeze, EnemyKind};
use crystalis_sim::player::{Facing, PlayerStats};
use crystalis_sim::world::{Body, LevelDefinition, LevelRegistry};
use crystalis_sim::Simulation;

/// An empty 1024x768 level with the default spawn at (256, 400).
pub fn arena(id: u32) -> LevelDefinition {
    let mut level = LevelDefinition::new(id);
    level.name = format!("Arena {id}");
    level
}

/// Default tuning without random MP regeneration.
pub fn quiet_config() -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.player.mana_regen_chance = 0.0;
    config
}

pub fn simulation(levels: Vec<LevelDefinition>) -> Simulation {
    let registry = LevelRegistry::new(levels).expect("level ids are unique");
    Simulation::with_config(registry, quiet_config()).expect("simulation starts")
}

pub fn step_n(sim: &mut Simulation, frames: usize) {
    for _ in 0..frames {
        sim.step();
    }
}

pub fn player_body(sim: &Simulation) -> Body {
    *sim.world().get::<Body>(sim.player()).expect("player has a body")
}

pub fn player_stats(sim: &Simulation) -> PlayerStats {
    sim.world().get::<PlayerStats>(sim.player()).expect("player has stats").clone()
}

pub fn place_player(sim: &mut Simulation, position: Vec2) {
    let player = sim.player();
    sim.world_mut().get_mut::<Body>(player).expect("player has a body").position = position;
}

pub fn set_facing(sim: &mut Simulation, facing: u8) {
    let player = sim.player();
    *sim.world_mut().get_mut::<Facing>(player).expect("player has a facing") = Facing(facing);
}

pub fn edit_stats(sim: &mut Simulation, edit: impl FnOnce(&mut PlayerStats)) {
    let player = sim.player();
    let mut stats = sim.world_mut().get_mut::<PlayerStats>(player).expect("player has stats");
    edit(&mut *stats);
}

pub fn spawn_enemy(sim: &mut Simulation, kind: EnemyKind, position: Vec2, spawn_order: u32) -> Entity {
    sim.world_mut().spawn(enemy_bundle(kind, position, spawn_order)).id()
}

pub fn freeze_enemies(sim: &mut Simulation) {
    sim.world_mut().resource_mut::<EnemyFreeze>().0 = true;
}

pub fn enemy_body(sim: &Simulation, enemy: Entity) -> Option<Body> {
    sim.world().get::<Body>(enemy).copied()
}
