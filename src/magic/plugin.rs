//! Magic plugin - spell selection, casting and cooldowns.

use bevy::prelude::*;

use super::spells::Spellbook;
use super::systems::{handle_spell_commands, tick_spell_cooldowns};
use crate::core::SimSet;
use crate::player::handle_dash_commands;

pub struct MagicPlugin;

impl Plugin for MagicPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Spellbook>()
            .add_systems(
                Update,
                handle_spell_commands
                    .in_set(SimSet::Input)
                    .after(handle_dash_commands),
            )
            .add_systems(Update, tick_spell_cooldowns.in_set(SimSet::Cooldowns));
    }
}
