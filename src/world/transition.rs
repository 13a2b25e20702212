//! Entry and portal triggers, debug level navigation and the transition
//! itself.

use bevy::prelude::*;

use super::builder::load_level;
use super::data::{CurrentLevel, LevelRegistry, FALLBACK_LEVEL};
use super::geometry::{Aabb, Body};
use super::obstacles::Obstacles;
use crate::core::{FrameFlow, SimulationConfig, TransitionCause, TransitionRequest};
use crate::enemies::EnemyFreeze;
use crate::player::{Player, PlayerCommand};

/// An explicit level exit.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryTrigger {
    pub zone: Aabb,
    pub destination: u32,
    /// Arrival position, or the destination's default spawn.
    pub position: Option<Vec2>,
    /// Cleared while the player stands in a zone it arrived on.
    pub armed: bool,
}

/// Entry triggers of the loaded level and the shared portal latch.
#[derive(Resource, Debug, Default, Clone)]
pub struct LevelTriggers {
    pub entries: Vec<EntryTrigger>,
    pub portal_armed: bool,
}

/// Queue a transition when the player steps onto an armed portal or entry.
///
/// Portals are checked before entries. A trigger re-arms once the player is
/// no longer touching it.
pub fn check_level_triggers(
    obstacles: Res<Obstacles>,
    mut triggers: ResMut<LevelTriggers>,
    mut flow: ResMut<FrameFlow>,
    player_query: Query<&Body, With<Player>>,
) {
    let Ok(body) = player_query.get_single() else {
        return;
    };
    let player_box = body.aabb();

    match obstacles.portal_at(&player_box) {
        Some(destination) if triggers.portal_armed => {
            triggers.portal_armed = false;
            flow.request(TransitionRequest {
                destination,
                position: None,
                cause: TransitionCause::Portal,
            });
            return;
        }
        Some(_) => {}
        None => triggers.portal_armed = true,
    }

    for entry in triggers.entries.iter_mut() {
        if !entry.zone.overlaps(&player_box) {
            entry.armed = true;
            continue;
        }
        if entry.armed {
            entry.armed = false;
            flow.request(TransitionRequest {
                destination: entry.destination,
                position: entry.position,
                cause: TransitionCause::Entry,
            });
            return;
        }
    }
}

/// Apply the queued transition, if any, and end the frame's gameplay.
pub fn apply_level_transition(world: &mut World) {
    let Some(request) = world.resource_mut::<FrameFlow>().pending.take() else {
        return;
    };
    info!(
        "{:?} transition to level {}",
        request.cause, request.destination
    );
    load_level(world, request.destination, request.position);
    world.resource_mut::<FrameFlow>().aborted = true;
}

/// Debug navigation between levels and the enemy freeze toggle.
pub fn handle_debug_commands(
    mut commands: EventReader<PlayerCommand>,
    registry: Res<LevelRegistry>,
    current: Res<CurrentLevel>,
    mut freeze: ResMut<EnemyFreeze>,
    mut flow: ResMut<FrameFlow>,
) {
    for command in commands.read() {
        match *command {
            PlayerCommand::SwitchLevel(step) => {
                let Some(id) = current.id else {
                    continue;
                };
                // Step to the neighbouring registered id, stopping at either end
                let target = if step > 0 {
                    registry.ids().find(|&other| other > id)
                } else {
                    registry.ids().filter(|&other| other < id).last()
                };
                let Some(destination) = target else {
                    debug!("No level beyond {} in that direction", id);
                    continue;
                };
                flow.request(TransitionRequest {
                    destination,
                    position: None,
                    cause: TransitionCause::Debug,
                });
            }
            PlayerCommand::ToggleEnemyFreeze => {
                freeze.0 = !freeze.0;
                info!("Enemies {}", if freeze.0 { "frozen" } else { "unfrozen" });
            }
            _ => {}
        }
    }
}

/// Load the configured starting level unless one is already loaded.
pub fn load_starting_level(world: &mut World) {
    if world.resource::<CurrentLevel>().id.is_some() {
        return;
    }
    let starting = world
        .get_resource::<SimulationConfig>()
        .map_or(FALLBACK_LEVEL, |config| config.starting_level);
    load_level(world, starting, None);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with_player(at: Vec2, obstacles: Obstacles, entries: Vec<EntryTrigger>) -> (App, Entity) {
        let mut app = App::new();
        app.insert_resource(obstacles)
            .insert_resource(LevelTriggers {
                entries,
                portal_armed: true,
            })
            .init_resource::<FrameFlow>()
            .add_systems(Update, check_level_triggers);
        let player = app
            .world_mut()
            .spawn((Player, Body::new(at, Vec2::new(14.0, 33.0))))
            .id();
        (app, player)
    }

    fn entry(destination: u32, armed: bool) -> EntryTrigger {
        EntryTrigger {
            zone: Aabb::new(0.0, 0.0, 50.0, 50.0),
            destination,
            position: Some(Vec2::new(10.0, 10.0)),
            armed,
        }
    }

    #[test]
    fn armed_entry_requests_transition() {
        let (mut app, _) = app_with_player(Vec2::new(10.0, 10.0), Obstacles::default(), vec![entry(2, true)]);
        app.update();
        let pending = app.world().resource::<FrameFlow>().pending;
        assert_eq!(
            pending,
            Some(TransitionRequest {
                destination: 2,
                position: Some(Vec2::new(10.0, 10.0)),
                cause: TransitionCause::Entry,
            })
        );
    }

    #[test]
    fn disarmed_entry_rearms_after_leaving() {
        let (mut app, player) = app_with_player(Vec2::new(10.0, 10.0), Obstacles::default(), vec![entry(2, false)]);
        app.update();
        assert!(app.world().resource::<FrameFlow>().pending.is_none());

        if let Some(mut body) = app.world_mut().get_mut::<Body>(player) {
            body.position = Vec2::new(200.0, 200.0);
        }
        app.update();
        assert!(app.world().resource::<LevelTriggers>().entries[0].armed);
    }

    #[test]
    fn portal_wins_over_entry() {
        let mut obstacles = Obstacles::default();
        obstacles.insert(crate::world::Obstacle::mountain(0.0, 0.0, Some(3)));
        // Portal zone is (30..50, 35..60).
        let (mut app, _) = app_with_player(Vec2::new(32.0, 30.0), obstacles, vec![entry(2, true)]);
        app.update();
        let pending = app.world().resource::<FrameFlow>().pending;
        assert_eq!(pending.map(|r| (r.destination, r.cause)), Some((3, TransitionCause::Portal)));
    }
}
