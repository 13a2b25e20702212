//! Tuning configuration loaded from RON.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::combat::CombatConfig;
use crate::magic::MagicConfig;
use crate::player::PlayerConfig;
use crate::world::DataLoadError;

/// All tunable constants of the simulation.
///
/// Every field has a default, so a config file only needs to list what it
/// overrides.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for [`SimRng`](super::SimRng).
    pub seed: u64,
    /// Level loaded when the simulation starts.
    pub starting_level: u32,
    pub player: PlayerConfig,
    pub combat: CombatConfig,
    pub magic: MagicConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            starting_level: 1,
            player: PlayerConfig::default(),
            combat: CombatConfig::default(),
            magic: MagicConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_ron_str(label: &str, contents: &str) -> Result<Self, DataLoadError> {
        ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
            path: label.to_string(),
            details: e.to_string(),
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataLoadError::FileNotFound(path.display().to_string()));
        }
        let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;
        Self::from_ron_str(&path.display().to_string(), &contents)
    }
}
