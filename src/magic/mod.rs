//! Magic module - the spell catalog and the casting rules.

mod plugin;
mod spells;
mod systems;

pub use plugin::MagicPlugin;
pub use spells::{CastError, MagicConfig, SpellDefinition, SpellKind, Spellbook, SPELLS};
pub use systems::{handle_spell_commands, tick_spell_cooldowns, SpellContext};
