//! Item plugin - orb bobbing and pickup.

use bevy::prelude::*;

use super::components::ExperienceOrb;
use crate::core::{FrameClock, ItemPickupEvent, LevelUpEvent, SimSet, SimulationConfig};
use crate::player::{Player, PlayerStats};
use crate::world::{distance, Body};

pub struct ItemPlugin;

impl Plugin for ItemPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, collect_orbs.in_set(SimSet::Items));
    }
}

/// Animate orbs and hand any within reach of the player to them.
pub fn collect_orbs(
    mut commands: Commands,
    clock: Res<FrameClock>,
    config: Res<SimulationConfig>,
    mut pickups: EventWriter<ItemPickupEvent>,
    mut level_ups: EventWriter<LevelUpEvent>,
    mut player_query: Query<(&Body, &mut PlayerStats), With<Player>>,
    mut orbs: Query<(Entity, &Body, &mut ExperienceOrb), Without<Player>>,
) {
    let Ok((player, mut stats)) = player_query.get_single_mut() else {
        return;
    };

    for (entity, body, mut orb) in &mut orbs {
        orb.update_bob(clock.elapsed);
        if distance(player.position, body.position) >= config.combat.pickup_radius {
            continue;
        }

        commands.entity(entity).despawn();
        pickups.send(ItemPickupEvent { value: orb.value });
        if stats.gain_exp(orb.value, &config.player) {
            info!("Level up! Now level {}", stats.level);
            level_ups.send(LevelUpEvent { new_level: stats.level });
        }
    }
}
