//! Player movement, dashing and per-frame player upkeep.

use bevy::prelude::*;
use rand::Rng;

use super::components::*;
use super::input::{InputState, PlayerCommand};
use crate::core::{DashChargeEvent, SimRng, SimSet, SimulationConfig, FRAME_DT};
use crate::enemies::Enemy;
use crate::world::{resolve_movement, Body, Bounds, LevelDimensions, Obstacles};

/// Set up player movement systems.
pub fn setup_movement_systems(app: &mut App) {
    app.add_systems(
        Update,
        (move_player, handle_dash_commands)
            .chain()
            .in_set(SimSet::Input)
            .after(crate::combat::handle_attack_commands),
    )
    .add_systems(Update, update_player.in_set(SimSet::Player));
}

/// Corner positions the player may occupy: a margin in from every world edge.
pub fn player_bounds(dimensions: &LevelDimensions, size: Vec2, margin: f32) -> Bounds {
    Bounds {
        min: Vec2::splat(margin),
        max: dimensions.world - size - Vec2::splat(margin),
    }
}

/// Desired movement for this frame before collision.
///
/// Dash motion replaces directional input and ignores terrain slowdown.
pub fn desired_delta(axis: Vec2, dash: &Dash, slowed: bool, config: &PlayerConfig) -> Vec2 {
    if dash.is_dashing() {
        return dash.direction * config.dash_speed;
    }
    let mut speed = config.move_speed;
    if slowed {
        speed *= config.slowdown_factor;
    }
    let mut delta = axis * speed;
    if delta.x != 0.0 && delta.y != 0.0 {
        delta *= config.diagonal_factor;
    }
    delta
}

/// Move the player from held input or an active dash.
pub fn move_player(
    input: Res<InputState>,
    config: Res<SimulationConfig>,
    obstacles: Res<Obstacles>,
    dimensions: Res<LevelDimensions>,
    mut player_query: Query<(&mut Body, &mut Facing, &Dash, &mut WalkAnimation), (With<Player>, Without<Enemy>)>,
) {
    let Ok((mut body, mut facing, dash, mut walk)) = player_query.get_single_mut() else {
        return;
    };
    let config = &config.player;

    let slowed = obstacles.in_slowdown_zone(&body.aabb());
    let delta = desired_delta(input.axis(), dash, slowed, config);

    if !dash.is_dashing() {
        walk.moving = delta != Vec2::ZERO;
        if let Some(new_facing) = Facing::from_delta(delta) {
            *facing = new_facing;
        }
    }

    if delta == Vec2::ZERO {
        return;
    }
    let bounds = player_bounds(&dimensions, body.size, config.bounds_margin);
    body.position = resolve_movement(body.position, body.size, delta, &bounds, |aabb| {
        obstacles.blocks_player(aabb)
    });
}

/// Start a dash on request. Ignored without charges or mid-dash.
pub fn handle_dash_commands(
    mut commands: EventReader<PlayerCommand>,
    config: Res<SimulationConfig>,
    mut player_query: Query<(&mut Dash, &Facing), With<Player>>,
) {
    let Ok((mut dash, facing)) = player_query.get_single_mut() else {
        commands.clear();
        return;
    };
    for command in commands.read() {
        if *command == PlayerCommand::Dash && dash.try_start(*facing, &config.player) {
            debug!("Dash started ({} charge(s) left)", dash.charges);
        }
    }
}

/// Tick the player's timers, regenerate dash charges and MP, animate.
pub fn update_player(
    config: Res<SimulationConfig>,
    mut rng: ResMut<SimRng>,
    mut charge_events: EventWriter<DashChargeEvent>,
    mut player_query: Query<
        (
            &mut Dash,
            &mut AttackState,
            &mut Invulnerability,
            &mut WalkAnimation,
            &mut PlayerStats,
        ),
        With<Player>,
    >,
) {
    let Ok((mut dash, mut attack, mut invulnerability, mut walk, mut stats)) = player_query.get_single_mut() else {
        return;
    };
    let config = &config.player;

    if dash.tick(FRAME_DT, config) {
        charge_events.send(DashChargeEvent { charges: dash.charges });
    }
    attack.tick(FRAME_DT);
    invulnerability.tick(FRAME_DT);

    if stats.mana < stats.max_mana && rng.0.gen_bool(config.mana_regen_chance.clamp(0.0, 1.0)) {
        stats.restore_mana(1);
    }

    walk.advance(config.walk_frame_interval);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_input_is_scaled() {
        let config = PlayerConfig::default();
        let delta = desired_delta(Vec2::new(1.0, 1.0), &Dash::new(2), false, &config);
        assert!((delta.x - 2.0 * 0.707).abs() < 1e-6);
        assert!((delta.y - 2.0 * 0.707).abs() < 1e-6);
    }

    #[test]
    fn slowdown_applies_to_walking_only() {
        let config = PlayerConfig::default();
        let walking = desired_delta(Vec2::new(-1.0, 0.0), &Dash::new(2), true, &config);
        assert!((walking.x + 0.8).abs() < 1e-6);

        let mut dash = Dash::new(2);
        dash.try_start(Facing(2), &config);
        let dashing = desired_delta(Vec2::new(-1.0, 0.0), &dash, true, &config);
        assert!(dashing.abs_diff_eq(Vec2::new(8.0, 0.0), 1e-5));
    }

    #[test]
    fn bounds_keep_a_margin() {
        let dimensions = LevelDimensions {
            canvas: Vec2::new(512.0, 480.0),
            viewport: Vec2::new(512.0, 480.0),
            world: Vec2::new(1024.0, 768.0),
        };
        let bounds = player_bounds(&dimensions, Vec2::new(14.0, 33.0), 8.0);
        assert_eq!(bounds.min, Vec2::splat(8.0));
        assert_eq!(bounds.max, Vec2::new(1002.0, 727.0));
    }
}
