//! Step-driven facade over the simulation app.

use bevy::ecs::schedule::ExecutorKind;
use bevy::ecs::system::SystemState;
use bevy::prelude::*;

use crate::core::{SimulationConfig, SimulationMode};
use crate::magic::SpellContext;
use crate::player::{InputState, MoveDirection, Player, PlayerCommand};
use crate::ui::{capture, Snapshot};
use crate::world::{load_level, CurrentLevel, DataLoadError, LevelRegistry, Obstacles};
use crate::CrystalisPlugin;

/// A headless simulation advanced one fixed frame at a time.
///
/// ```no_run
/// use crystalis_sim::player::MoveDirection;
/// use crystalis_sim::world::LevelRegistry;
/// use crystalis_sim::Simulation;
///
/// let mut sim = Simulation::new(LevelRegistry::builtin()?)?;
/// sim.set_movement(MoveDirection::Right, true);
/// for _ in 0..60 {
///     sim.step();
/// }
/// println!("{:?}", sim.snapshot().player);
/// # Ok::<(), crystalis_sim::world::DataLoadError>(())
/// ```
pub struct Simulation {
    app: App,
    player: Entity,
}

impl Simulation {
    pub fn new(levels: LevelRegistry) -> Result<Self, DataLoadError> {
        Self::with_config(levels, SimulationConfig::default())
    }

    /// Build the app and load the configured starting level.
    pub fn with_config(levels: LevelRegistry, config: SimulationConfig) -> Result<Self, DataLoadError> {
        if levels.is_empty() {
            return Err(DataLoadError::EmptyRegistry("simulation".to_string()));
        }
        let starting_level = config.starting_level;

        let mut app = App::new();
        app.edit_schedule(Update, |schedule| {
            schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        });
        app.insert_resource(config)
            .insert_resource(levels)
            .add_plugins(CrystalisPlugin);
        app.finish();
        app.cleanup();

        load_level(app.world_mut(), starting_level, None)
            .ok_or_else(|| DataLoadError::EmptyRegistry("simulation".to_string()))?;
        let player = app
            .world_mut()
            .query_filtered::<Entity, With<Player>>()
            .iter(app.world())
            .next()
            .ok_or_else(|| DataLoadError::InvalidLevel {
                id: starting_level,
                reason: "player was not spawned".to_string(),
            })?;

        Ok(Self { app, player })
    }

    /// Advance exactly one frame.
    pub fn step(&mut self) {
        self.app.update();
    }

    pub fn set_movement(&mut self, direction: MoveDirection, pressed: bool) {
        self.app.world_mut().resource_mut::<InputState>().set(direction, pressed);
    }

    pub fn dash(&mut self) {
        self.send(PlayerCommand::Dash);
    }

    pub fn attack_press(&mut self) {
        self.send(PlayerCommand::AttackPress);
    }

    pub fn attack_release(&mut self) {
        self.send(PlayerCommand::AttackRelease);
    }

    /// Cast the selected spell during the next step.
    pub fn cast_spell(&mut self) {
        self.send(PlayerCommand::CastSpell);
    }

    /// Cast a spell by name right away. Returns whether it was cast.
    ///
    /// Refusals are also reported as a `SpellCastEvent`.
    pub fn cast_spell_named(&mut self, name: &str) -> bool {
        if self.mode() == SimulationMode::Editing {
            return false;
        }
        let world = self.app.world_mut();
        let mut state = SystemState::<SpellContext<'static, 'static>>::new(world);
        let cast = {
            let mut spells = state.get_mut(world);
            spells.cast_named(name)
        };
        state.apply(world);
        cast
    }

    pub fn cycle_spell(&mut self) {
        self.send(PlayerCommand::CycleSpell);
    }

    /// Move to the neighbouring level in `step`'s direction.
    pub fn switch_level(&mut self, step: i32) {
        if step == 0 {
            return;
        }
        self.send(PlayerCommand::SwitchLevel(step.signum()));
    }

    pub fn toggle_enemy_freeze(&mut self) {
        self.send(PlayerCommand::ToggleEnemyFreeze);
    }

    pub fn set_mode(&mut self, mode: SimulationMode) {
        self.app.insert_resource(mode);
    }

    pub fn mode(&self) -> SimulationMode {
        *self.app.world().resource::<SimulationMode>()
    }

    pub fn snapshot(&mut self) -> Snapshot {
        capture(self.app.world_mut())
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn active_level(&self) -> Option<u32> {
        self.app.world().resource::<CurrentLevel>().id
    }

    pub fn obstacles(&self) -> &Obstacles {
        self.app.world().resource::<Obstacles>()
    }

    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    fn send(&mut self, command: PlayerCommand) {
        self.app.world_mut().send_event(command);
    }
}
