//! Crystalis Sim - headless runner.
//!
//! Runs the simulation at 60 Hz for a number of frames and logs the final
//! state.
//!
//! Usage: `crystalis-sim [frames]` (default 600)

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use crystalis_sim::core::{FrameClock, SimSet, SimulationConfig, FRAME_DT};
use crystalis_sim::ui::capture;
use crystalis_sim::world::LevelRegistry;
use crystalis_sim::CrystalisPlugin;

const LEVEL_DIR: &str = "assets/data/levels";
const CONFIG_PATH: &str = "assets/data/config.ron";
const DEFAULT_FRAMES: u64 = 600;

/// Frame after which the runner exits.
#[derive(Resource)]
struct FrameLimit(u64);

fn main() -> AppExit {
    let frames = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f32(FRAME_DT))),
        LogPlugin::default(),
    ));

    let levels = match LevelRegistry::load_dir(LEVEL_DIR) {
        Ok(levels) => levels,
        Err(e) => {
            warn!("Could not load levels from {}: {}. Using built-in levels.", LEVEL_DIR, e);
            match LevelRegistry::builtin() {
                Ok(levels) => levels,
                Err(e) => {
                    error!("Built-in levels are invalid: {}", e);
                    return AppExit::error();
                }
            }
        }
    };
    let config = SimulationConfig::load(CONFIG_PATH).unwrap_or_else(|e| {
        warn!("Using default configuration: {}", e);
        SimulationConfig::default()
    });

    app.insert_resource(levels)
        .insert_resource(config)
        .insert_resource(FrameLimit(frames))
        .add_plugins(CrystalisPlugin)
        .add_systems(Update, stop_after_frame_limit.after(SimSet::Cooldowns));

    info!("Running {} frames", frames);
    app.run()
}

fn stop_after_frame_limit(world: &mut World) {
    let frame = world.resource::<FrameClock>().frame;
    if frame < world.resource::<FrameLimit>().0 {
        return;
    }

    let snapshot = capture(world);
    info!(
        "Stopped after {} frames on level {:?} ({} enemies, {} items)",
        snapshot.frame,
        snapshot.level,
        snapshot.enemies.len(),
        snapshot.items.len()
    );
    if let Some(player) = &snapshot.player {
        info!(
            "Player at ({:.1}, {:.1}): level {}, HP {}/{}, MP {}/{}, EXP {}/{}",
            player.position.x,
            player.position.y,
            player.level,
            player.health,
            player.max_health,
            player.mana,
            player.max_mana,
            player.exp,
            player.exp_to_next
        );
    }
    world.send_event(AppExit::Success);
}
