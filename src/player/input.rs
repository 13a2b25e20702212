//! Held movement keys and one-shot player commands.
//!
//! Hosts drive the player either through the [`Simulation`](crate::Simulation)
//! facade or, inside a windowed app, through [`map_keyboard_input`].

use bevy::prelude::*;

/// One of the four movement keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Discrete input delivered to the simulation.
///
/// Commands are consumed during the next step. Commands sent while editing
/// expire unread.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum PlayerCommand {
    Dash,
    AttackPress,
    AttackRelease,
    CastSpell,
    CycleSpell,
    /// Move to the next (`+1`) or previous (`-1`) level.
    SwitchLevel(i32),
    ToggleEnemyFreeze,
}

/// Movement keys currently held.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    pub fn set(&mut self, direction: MoveDirection, pressed: bool) {
        match direction {
            MoveDirection::Up => self.up = pressed,
            MoveDirection::Down => self.down = pressed,
            MoveDirection::Left => self.left = pressed,
            MoveDirection::Right => self.right = pressed,
        }
    }

    /// Each component is -1, 0 or 1. Opposite keys cancel out.
    pub fn axis(&self) -> Vec2 {
        let signed = |positive: bool, negative: bool| f32::from(u8::from(positive)) - f32::from(u8::from(negative));
        Vec2::new(signed(self.right, self.left), signed(self.down, self.up))
    }
}

/// Translate keyboard state into [`InputState`] and [`PlayerCommand`]s.
///
/// WASD or arrows move, Space attacks (hold to charge), Z dashes, Q casts
/// (while held), E cycles spells, T freezes enemies, `]`/`[` switch levels.
pub fn map_keyboard_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<InputState>,
    mut commands: EventWriter<PlayerCommand>,
) {
    input.up = keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]);
    input.down = keys.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]);
    input.left = keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]);
    input.right = keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]);

    if keys.just_pressed(KeyCode::Space) {
        commands.send(PlayerCommand::AttackPress);
    }
    if keys.just_released(KeyCode::Space) {
        commands.send(PlayerCommand::AttackRelease);
    }
    if keys.just_pressed(KeyCode::KeyZ) {
        commands.send(PlayerCommand::Dash);
    }
    // Held: the spell handler throttles repeats.
    if keys.pressed(KeyCode::KeyQ) {
        commands.send(PlayerCommand::CastSpell);
    }
    if keys.just_pressed(KeyCode::KeyE) {
        commands.send(PlayerCommand::CycleSpell);
    }
    if keys.just_pressed(KeyCode::KeyT) {
        commands.send(PlayerCommand::ToggleEnemyFreeze);
    }
    if keys.just_pressed(KeyCode::BracketRight) {
        commands.send(PlayerCommand::SwitchLevel(1));
    }
    if keys.just_pressed(KeyCode::BracketLeft) {
        commands.send(PlayerCommand::SwitchLevel(-1));
    }
}
