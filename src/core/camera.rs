//! Camera framing for whatever presents the simulation.

use bevy::prelude::*;

use crate::player::Player;
use crate::world::{Body, LevelDimensions};

/// Top-left corner of the visible region in world coordinates.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct CameraFraming {
    pub offset: Vec2,
}

/// Where the camera sits for a player at `player`.
///
/// A level whose world fits the canvas exactly is shown with a fixed camera;
/// otherwise the player is centred and the view is clamped to the world.
pub fn camera_offset(dimensions: &LevelDimensions, player: &Body) -> Vec2 {
    if dimensions.canvas == dimensions.world {
        return Vec2::ZERO;
    }
    let viewport = dimensions.viewport;
    let centred = player.position - viewport / 2.0;
    centred.min(dimensions.world - viewport).max(Vec2::ZERO)
}

pub fn frame_camera(
    dimensions: Res<LevelDimensions>,
    player_query: Query<&Body, With<Player>>,
    mut camera: ResMut<CameraFraming>,
) {
    let Ok(body) = player_query.get_single() else {
        return;
    };
    camera.offset = camera_offset(&dimensions, body);
}
