//! Level construction from data definitions.

use bevy::prelude::*;

use super::data::{CurrentLevel, LevelDefinition, LevelRegistry};
use super::geometry::{Aabb, Body};
use super::obstacles::{Obstacle, Obstacles};
use super::transition::{EntryTrigger, LevelTriggers};
use crate::core::{camera_offset, CameraFraming, LevelLoadedEvent, SimulationConfig};
use crate::enemies::enemy_bundle;
use crate::items::orb_bundle;
use crate::player::{player_bundle, Player};

/// Marker for everything that belongs to the loaded level and is removed on
/// the next load.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct LevelEntity;

/// Build the static obstacle registry of a level.
///
/// Walls marked as openings are passable and never built.
pub fn build_obstacles(level: &LevelDefinition) -> Obstacles {
    let mut obstacles = Obstacles::default();

    for &(x, y) in &level.trees {
        obstacles.insert(Obstacle::tree(x, y));
    }
    for mountain in &level.mountains {
        obstacles.insert(Obstacle::mountain(mountain.x, mountain.y, mountain.portal));
    }
    for &(x, y) in &level.caves {
        obstacles.insert(Obstacle::cave(x, y));
    }
    for stalactite in &level.stalactites {
        obstacles.insert(Obstacle::stalactite(stalactite.x, stalactite.y, stalactite.hanging));
    }
    for house in &level.houses {
        obstacles.insert(Obstacle::house(house.x, house.y, house.style.clone()));
    }
    for wall in level.walls.iter().filter(|wall| !wall.opening) {
        obstacles.insert(Obstacle::wall(wall.x, wall.y, wall.width, wall.height));
    }

    obstacles
}

/// Replace the active level with `requested`, or the fallback level when it
/// does not exist.
///
/// The player is placed at `position` if given, else at the level's spawn
/// point, and is spawned on first load. Returns the id actually loaded.
pub fn load_level(world: &mut World, requested: u32, position: Option<Vec2>) -> Option<u32> {
    let Some(level) = world.resource::<LevelRegistry>().resolve(requested).cloned() else {
        error!("Cannot load level {}: no levels registered", requested);
        return None;
    };

    let stale: Vec<Entity> = world
        .query_filtered::<Entity, With<LevelEntity>>()
        .iter(world)
        .collect();
    for entity in stale {
        world.despawn(entity);
    }

    let obstacles = build_obstacles(&level);
    let dimensions = level.dimensions();

    for (order, spawn) in level.enemies.iter().enumerate() {
        world.spawn(enemy_bundle(spawn.kind, Vec2::new(spawn.x, spawn.y), order as u32));
    }
    for item in &level.items {
        world.spawn(orb_bundle(Vec2::new(item.x, item.y), item.value));
    }

    // Place the player
    let arrival = position.unwrap_or_else(|| level.spawn_point());
    let existing = world
        .query_filtered::<Entity, With<Player>>()
        .iter(world)
        .next();
    let player = match existing {
        Some(entity) => {
            if let Some(mut body) = world.get_mut::<Body>(entity) {
                body.position = arrival;
            }
            entity
        }
        None => {
            let config = world.resource::<SimulationConfig>().player.clone();
            world.spawn(player_bundle(arrival, &config)).id()
        }
    };
    let player_body = world
        .get::<Body>(player)
        .copied()
        .unwrap_or_else(|| Body::new(arrival, world.resource::<SimulationConfig>().player.size()));
    let player_box = player_body.aabb();

    // Triggers the player arrives on stay disarmed until left
    let entries = level
        .entries
        .iter()
        .map(|entry| {
            let zone = Aabb::new(entry.x, entry.y, entry.width, entry.height);
            EntryTrigger {
                zone,
                destination: entry.destination,
                position: entry.destination_position.map(|(x, y)| Vec2::new(x, y)),
                armed: !zone.overlaps(&player_box),
            }
        })
        .collect();
    let triggers = LevelTriggers {
        entries,
        portal_armed: obstacles.portal_at(&player_box).is_none(),
    };

    world.resource_mut::<CameraFraming>().offset = camera_offset(&dimensions, &player_body);
    world.insert_resource(triggers);
    world.insert_resource(obstacles);
    world.insert_resource(dimensions);
    world.insert_resource(CurrentLevel {
        id: Some(level.id),
        name: level.name.clone(),
        theme: level.theme.clone(),
        background_color: level.background_color.clone(),
        accent_color: level.accent_color.clone(),
    });
    world.send_event(LevelLoadedEvent {
        requested,
        id: level.id,
    });

    info!(
        "Loaded level {} ({}): {} enemies, {} items",
        level.id,
        level.name,
        level.enemies.len(),
        level.items.len()
    );
    Some(level.id)
}
