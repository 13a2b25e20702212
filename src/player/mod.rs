//! Player module - the player entity, its input and its movement.

mod components;
mod input;
mod movement;
mod plugin;

pub use components::*;
pub use input::{map_keyboard_input, InputState, MoveDirection, PlayerCommand};
pub use movement::{desired_delta, handle_dash_commands, move_player, player_bounds, update_player};
pub use plugin::PlayerPlugin;
