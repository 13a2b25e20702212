//! Enemy AI behavior systems.

use bevy::prelude::*;

use super::components::{AiState, Enemy, EnemyAnimation, EnemyFreeze, EnemyStats};
use crate::combat::Health;
use crate::core::{EnemyDefeatedEvent, SimulationConfig, FRAME_DT};
use crate::items::orb_bundle;
use crate::player::Player;
use crate::world::{distance, resolve_movement, Body, Bounds, LevelDimensions, Obstacles};

/// Corner positions an enemy may occupy: the whole world.
pub fn enemy_bounds(dimensions: &LevelDimensions, size: Vec2) -> Bounds {
    Bounds {
        min: Vec2::ZERO,
        max: dimensions.world - size,
    }
}

/// Push an enemy by `offset`, clamped to the world.
///
/// The push is discarded entirely if the enemy would end up inside an
/// enemy-blocking obstacle.
pub fn knock_back(body: &mut Body, offset: Vec2, dimensions: &LevelDimensions, obstacles: &Obstacles) {
    let target = enemy_bounds(dimensions, body.size).clamp(body.position + offset);
    if !obstacles.blocks_enemy(&body.aabb_at(target)) {
        body.position = target;
    }
}

/// Chase the player when in aggro range and animate every enemy.
pub fn chase_player(
    config: Res<SimulationConfig>,
    freeze: Res<EnemyFreeze>,
    obstacles: Res<Obstacles>,
    dimensions: Res<LevelDimensions>,
    player_query: Query<&Body, (With<Player>, Without<Enemy>)>,
    mut enemy_query: Query<
        (&mut Body, &EnemyStats, &Health, &mut AiState, &mut EnemyAnimation),
        (With<Enemy>, Without<Player>),
    >,
) {
    let player_position = player_query.get_single().ok().map(|body| body.position);

    for (mut body, stats, health, mut ai_state, mut animation) in enemy_query.iter_mut() {
        animation.advance(FRAME_DT);

        // Dead enemies wait for reaping where they fell.
        let Some(target) = player_position.filter(|_| !freeze.0 && !health.is_dead()) else {
            *ai_state = AiState::Idle;
            continue;
        };

        let offset = target - body.position;
        let gap = distance(target, body.position);
        if gap <= 0.0 || gap >= config.combat.aggro_radius {
            *ai_state = AiState::Idle;
            continue;
        }

        *ai_state = AiState::Chasing;
        let delta = offset / gap * stats.move_speed;
        let bounds = enemy_bounds(&dimensions, body.size);
        body.position = resolve_movement(body.position, body.size, delta, &bounds, |aabb| {
            obstacles.blocks_enemy(aabb)
        });
    }
}

/// Remove dead enemies and drop an experience orb where each one fell.
pub fn reap_dead_enemies(
    mut commands: Commands,
    mut defeated: EventWriter<EnemyDefeatedEvent>,
    enemy_query: Query<(Entity, &Body, &Health, &Enemy, &EnemyStats)>,
) {
    for (entity, body, health, enemy, stats) in enemy_query.iter() {
        if !health.is_dead() {
            continue;
        }
        commands.entity(entity).despawn();
        commands.spawn(orb_bundle(body.position, stats.exp_value));
        defeated.send(EnemyDefeatedEvent {
            kind: enemy.kind,
            position: body.position,
            exp_value: stats.exp_value,
        });
        info!("{:?} defeated, dropped {} EXP", enemy.kind, stats.exp_value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Obstacle;

    fn dimensions() -> LevelDimensions {
        LevelDimensions {
            canvas: Vec2::new(512.0, 480.0),
            viewport: Vec2::new(512.0, 480.0),
            world: Vec2::new(1024.0, 768.0),
        }
    }

    #[test]
    fn knockback_is_clamped_to_world() {
        let mut body = Body::new(Vec2::new(10.0, 100.0), Vec2::splat(16.0));
        knock_back(&mut body, Vec2::new(-50.0, 0.0), &dimensions(), &Obstacles::default());
        assert_eq!(body.position, Vec2::new(0.0, 100.0));
    }

    #[test]
    fn knockback_into_mountain_is_reverted() {
        let mut obstacles = Obstacles::default();
        obstacles.insert(Obstacle::mountain(100.0, 100.0, None));
        // Slope occupies (110..170, 130..160).
        let mut body = Body::new(Vec2::new(120.0, 180.0), Vec2::splat(16.0));
        knock_back(&mut body, Vec2::new(0.0, -35.0), &dimensions(), &obstacles);
        assert_eq!(body.position, Vec2::new(120.0, 180.0));
    }
}
