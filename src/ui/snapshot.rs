//! Read-only view of the simulation for whatever draws it.

use bevy::prelude::*;

use crate::combat::{Health, Projectile};
use crate::core::{CameraFraming, FrameClock, SimulationConfig, SimulationMode, SwordElement};
use crate::effects::{Effect, EffectKind};
use crate::enemies::{AiState, Enemy, EnemyAnimation, EnemyFreeze, EnemyKind};
use crate::items::ExperienceOrb;
use crate::magic::Spellbook;
use crate::player::{AttackState, Dash, Facing, Invulnerability, Player, PlayerStats, WalkAnimation};
use crate::world::{Aabb, Body, CurrentLevel, LevelDimensions, ObstacleCategory, Obstacles};

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub position: Vec2,
    pub size: Vec2,
    pub facing: u8,
    pub sprite_row: u8,
    pub walk_frame: u8,
    pub level: u32,
    pub health: i32,
    pub max_health: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub exp: u32,
    pub exp_to_next: u32,
    pub attack_power: i32,
    pub spell: &'static str,
    pub spell_cooldown: f32,
    pub sword: SwordElement,
    pub dash_charges: u32,
    pub max_dash_charges: u32,
    /// Raised briefly after a dash charge comes back.
    pub dash_flash: bool,
    pub dashing: bool,
    pub invulnerable: bool,
    pub attacking: bool,
    /// 0 until the charge indicator shows, then up to 1 at full charge.
    pub charge_progress: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyView {
    pub kind: EnemyKind,
    pub position: Vec2,
    pub size: Vec2,
    pub health: i32,
    pub max_health: i32,
    pub chasing: bool,
    pub frame: u8,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileView {
    pub position: Vec2,
    pub size: Vec2,
    pub angle: f32,
    pub element: SwordElement,
    pub remaining_life: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemView {
    pub position: Vec2,
    pub value: u32,
    pub bob: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EffectView {
    pub kind: EffectKind,
    pub position: Vec2,
    pub angle: f32,
    pub progress: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleView {
    pub category: ObstacleCategory,
    pub visual: Aabb,
    pub variant: Option<String>,
}

/// Everything observable about one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub frame: u64,
    pub mode: SimulationMode,
    pub level: Option<u32>,
    pub level_name: String,
    pub theme: Option<String>,
    pub background_color: String,
    pub accent_color: String,
    pub dimensions: LevelDimensions,
    pub camera: Vec2,
    pub enemies_frozen: bool,
    pub player: Option<PlayerView>,
    /// In spawn order.
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub items: Vec<ItemView>,
    pub effects: Vec<EffectView>,
    pub obstacles: Vec<ObstacleView>,
}

impl Snapshot {
    pub fn effect_count(&self, kind: EffectKind) -> usize {
        self.effects.iter().filter(|effect| effect.kind == kind).count()
    }
}

fn capture_player(world: &mut World) -> Option<PlayerView> {
    let now = world.resource::<FrameClock>().elapsed;
    let config = world.resource::<SimulationConfig>().player.clone();
    let spellbook = world.get_resource::<Spellbook>().cloned().unwrap_or_default();

    let mut query = world.query_filtered::<(
        &Body,
        &PlayerStats,
        &Facing,
        &Dash,
        &Invulnerability,
        &AttackState,
        &WalkAnimation,
    ), With<Player>>();
    let (body, stats, facing, dash, invulnerability, attack, walk) = query.get_single(world).ok()?;

    let spell = spellbook.selected();
    Some(PlayerView {
        position: body.position,
        size: body.size,
        facing: facing.0,
        sprite_row: facing.sprite_row(),
        walk_frame: walk.frame,
        level: stats.level,
        health: stats.health,
        max_health: stats.max_health,
        mana: stats.mana,
        max_mana: stats.max_mana,
        exp: stats.exp,
        exp_to_next: stats.exp_to_next,
        attack_power: stats.attack_power,
        spell: spell.name(),
        spell_cooldown: spellbook.cooldown(spell),
        sword: stats.sword,
        dash_charges: dash.charges,
        max_dash_charges: dash.max_charges,
        dash_flash: dash.is_flashing(),
        dashing: dash.is_dashing(),
        invulnerable: invulnerability.is_active() || dash.is_invulnerable(),
        attacking: attack.is_attacking(),
        charge_progress: attack.charge_progress(now, &config),
    })
}

/// Copy the observable state out of `world`.
pub fn capture(world: &mut World) -> Snapshot {
    let player = capture_player(world);

    let mut enemies: Vec<(u32, EnemyView)> = world
        .query::<(&Enemy, &Body, &Health, &AiState, &EnemyAnimation)>()
        .iter(world)
        .map(|(enemy, body, health, ai_state, animation)| {
            (
                enemy.spawn_order,
                EnemyView {
                    kind: enemy.kind,
                    position: body.position,
                    size: body.size,
                    health: health.current,
                    max_health: health.maximum,
                    chasing: *ai_state == AiState::Chasing,
                    frame: animation.frame,
                    color: enemy.kind.definition().color,
                },
            )
        })
        .collect();
    enemies.sort_by_key(|(order, _)| *order);

    let projectiles = world
        .query::<(&Body, &Projectile)>()
        .iter(world)
        .map(|(body, projectile)| ProjectileView {
            position: body.position,
            size: body.size,
            angle: projectile.angle,
            element: projectile.element,
            remaining_life: projectile.remaining_life(),
        })
        .collect();

    let items = world
        .query::<(&Body, &ExperienceOrb)>()
        .iter(world)
        .map(|(body, orb)| ItemView {
            position: body.position,
            value: orb.value,
            bob: orb.bob,
        })
        .collect();

    let effects = world
        .query::<&Effect>()
        .iter(world)
        .map(|effect| EffectView {
            kind: effect.kind,
            position: effect.position,
            angle: effect.angle,
            progress: effect.progress(),
        })
        .collect();

    let obstacles = world
        .resource::<Obstacles>()
        .iter()
        .map(|obstacle| ObstacleView {
            category: obstacle.category,
            visual: obstacle.visual,
            variant: obstacle.variant.clone(),
        })
        .collect();

    let current = world.resource::<CurrentLevel>();
    Snapshot {
        frame: world.resource::<FrameClock>().frame,
        mode: *world.resource::<SimulationMode>(),
        level: current.id,
        level_name: current.name.clone(),
        theme: current.theme.clone(),
        background_color: current.background_color.clone(),
        accent_color: current.accent_color.clone(),
        dimensions: *world.resource::<LevelDimensions>(),
        camera: world.resource::<CameraFraming>().offset,
        enemies_frozen: world.get_resource::<EnemyFreeze>().is_some_and(|freeze| freeze.0),
        player,
        enemies: enemies.into_iter().map(|(_, view)| view).collect(),
        projectiles,
        items,
        effects,
        obstacles,
    }
}
