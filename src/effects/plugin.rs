//! Effects plugin - ages and removes effects.

use bevy::prelude::*;

use super::components::Effect;
use crate::core::{SimSet, FRAME_DT};

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, expire_effects.in_set(SimSet::Effects));
    }
}

pub fn expire_effects(mut commands: Commands, mut effects: Query<(Entity, &mut Effect)>) {
    for (entity, mut effect) in &mut effects {
        if effect.tick(FRAME_DT) {
            commands.entity(entity).despawn();
        }
    }
}
