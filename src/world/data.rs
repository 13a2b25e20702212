//! Level data structures and RON loading.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::error::DataLoadError;
use crate::enemies::EnemyKind;

/// A tree, cave or other obstacle placed by its top-left corner.
pub type Placement = (f32, f32);

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MountainDef {
    pub x: f32,
    pub y: f32,
    /// Level the portal on this mountain leads to, if it has one.
    #[serde(default)]
    pub portal: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StalactiteDef {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_true")]
    pub hanging: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HouseDef {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_house_style")]
    pub style: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct WallDef {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Gaps are kept in the data for the editor but produce no geometry.
    #[serde(default)]
    pub opening: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EnemySpawnDef {
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ItemDef {
    pub x: f32,
    pub y: f32,
    pub value: u32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EntryDef {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub destination: u32,
    /// Where the player appears in the destination level. Defaults to its spawn.
    #[serde(default)]
    pub destination_position: Option<(f32, f32)>,
}

/// One level as authored in `assets/data/levels/*.ron`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LevelDefinition {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub theme: Option<String>,
    /// Size of the presentation surface.
    #[serde(default = "default_canvas")]
    pub canvas: (f32, f32),
    /// Logical viewport used for camera clamping. Defaults to the canvas.
    #[serde(default)]
    pub viewport: Option<(f32, f32)>,
    #[serde(default = "default_world")]
    pub world: (f32, f32),
    #[serde(default = "default_spawn")]
    pub spawn: (f32, f32),
    #[serde(default = "default_background_color")]
    pub background_color: String,
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
    #[serde(default)]
    pub trees: Vec<Placement>,
    #[serde(default)]
    pub mountains: Vec<MountainDef>,
    #[serde(default)]
    pub caves: Vec<Placement>,
    #[serde(default)]
    pub stalactites: Vec<StalactiteDef>,
    #[serde(default)]
    pub houses: Vec<HouseDef>,
    #[serde(default)]
    pub walls: Vec<WallDef>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawnDef>,
    #[serde(default)]
    pub items: Vec<ItemDef>,
    #[serde(default)]
    pub entries: Vec<EntryDef>,
}

fn default_true() -> bool {
    true
}

fn default_house_style() -> String {
    "normal".to_string()
}

fn default_canvas() -> (f32, f32) {
    (512.0, 480.0)
}

fn default_world() -> (f32, f32) {
    (1024.0, 768.0)
}

fn default_spawn() -> (f32, f32) {
    (256.0, 400.0)
}

fn default_background_color() -> String {
    "#2d5016".to_string()
}

fn default_accent_color() -> String {
    "#1a3009".to_string()
}

impl LevelDefinition {
    /// An empty level with every optional field at its default.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            name: format!("Level {id}"),
            theme: None,
            canvas: default_canvas(),
            viewport: None,
            world: default_world(),
            spawn: default_spawn(),
            background_color: default_background_color(),
            accent_color: default_accent_color(),
            trees: Vec::new(),
            mountains: Vec::new(),
            caves: Vec::new(),
            stalactites: Vec::new(),
            houses: Vec::new(),
            walls: Vec::new(),
            enemies: Vec::new(),
            items: Vec::new(),
            entries: Vec::new(),
        }
    }

    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(self.spawn.0, self.spawn.1)
    }

    pub fn dimensions(&self) -> LevelDimensions {
        let canvas = Vec2::new(self.canvas.0, self.canvas.1);
        LevelDimensions {
            canvas,
            viewport: self.viewport.map_or(canvas, |(w, h)| Vec2::new(w, h)),
            world: Vec2::new(self.world.0, self.world.1),
        }
    }

    /// Reject levels the simulation cannot run.
    pub fn validate(&self) -> Result<(), DataLoadError> {
        let invalid = |reason: &str| DataLoadError::InvalidLevel {
            id: self.id,
            reason: reason.to_string(),
        };
        if self.world.0 <= 0.0 || self.world.1 <= 0.0 {
            return Err(invalid("world size must be positive"));
        }
        if self.canvas.0 <= 0.0 || self.canvas.1 <= 0.0 {
            return Err(invalid("canvas size must be positive"));
        }
        if self.entries.iter().any(|e| e.width <= 0.0 || e.height <= 0.0) {
            return Err(invalid("entry zones must have a positive size"));
        }
        Ok(())
    }
}

/// Canvas, viewport and world extents of the active level.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct LevelDimensions {
    pub canvas: Vec2,
    pub viewport: Vec2,
    pub world: Vec2,
}

impl Default for LevelDimensions {
    fn default() -> Self {
        LevelDefinition::new(0).dimensions()
    }
}

/// Every level the simulation can load, keyed by id.
#[derive(Resource, Debug, Default, Clone)]
pub struct LevelRegistry {
    levels: BTreeMap<u32, LevelDefinition>,
}

/// Level id used when a requested level does not exist.
pub const FALLBACK_LEVEL: u32 = 1;

const VILLAGE_RON: &str = include_str!("../../assets/data/levels/village.ron");
const FOREST_RON: &str = include_str!("../../assets/data/levels/forest.ron");
const CAVE_RON: &str = include_str!("../../assets/data/levels/cave.ron");

impl LevelRegistry {
    pub fn new(levels: impl IntoIterator<Item = LevelDefinition>) -> Result<Self, DataLoadError> {
        let mut registry = Self::default();
        for level in levels {
            registry.insert(level)?;
        }
        Ok(registry)
    }

    /// The village, forest and cave levels that ship with the crate.
    pub fn builtin() -> Result<Self, DataLoadError> {
        let mut registry = Self::default();
        for (label, source) in [
            ("village.ron", VILLAGE_RON),
            ("forest.ron", FOREST_RON),
            ("cave.ron", CAVE_RON),
        ] {
            registry.insert(Self::parse(label, source)?)?;
        }
        Ok(registry)
    }

    /// Parse one level from RON text. `label` names the source in errors.
    pub fn parse(label: &str, contents: &str) -> Result<LevelDefinition, DataLoadError> {
        let level = ron::from_str::<LevelDefinition>(contents).map_err(|e| DataLoadError::ParseError {
            path: label.to_string(),
            details: e.to_string(),
        })?;
        level.validate()?;
        Ok(level)
    }

    /// Load every `*.ron` file in `dir`.
    ///
    /// Unreadable or malformed files are logged and skipped; an empty result
    /// is an error.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Err(DataLoadError::FileNotFound(dir.display().to_string()));
        }
        let entries = fs::read_dir(dir).map_err(|e| DataLoadError::ReadError {
            path: dir.display().to_string(),
            details: e.to_string(),
        })?;

        let mut paths: Vec<_> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "ron"))
            .collect();
        paths.sort();

        let mut registry = Self::default();
        for path in paths {
            let label = path.display().to_string();
            match fs::read_to_string(&path) {
                Ok(contents) => match Self::parse(&label, &contents) {
                    Ok(level) => {
                        info!("Loaded level {} ({})", level.id, level.name);
                        registry.insert(level)?;
                    }
                    Err(e) => error!("Skipping level file: {}", e),
                },
                Err(e) => error!("Failed to read level file {:?}: {}", path, e),
            }
        }

        if registry.is_empty() {
            return Err(DataLoadError::EmptyRegistry(dir.display().to_string()));
        }
        info!("Loaded {} level(s)", registry.len());
        Ok(registry)
    }

    pub fn insert(&mut self, level: LevelDefinition) -> Result<(), DataLoadError> {
        if let Some(existing) = self.levels.get(&level.id) {
            return Err(DataLoadError::DuplicateLevel {
                id: level.id,
                first: existing.name.clone(),
                second: level.name,
            });
        }
        self.levels.insert(level.id, level);
        Ok(())
    }

    pub fn get(&self, id: u32) -> Option<&LevelDefinition> {
        self.levels.get(&id)
    }

    /// Look up `id`, falling back to level 1 or the lowest registered id.
    pub fn resolve(&self, id: u32) -> Option<&LevelDefinition> {
        if let Some(level) = self.levels.get(&id) {
            return Some(level);
        }
        let fallback = self
            .levels
            .get(&FALLBACK_LEVEL)
            .or_else(|| self.levels.values().next());
        if let Some(level) = fallback {
            warn!("Level {} not found, falling back to level {}", id, level.id);
        }
        fallback
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.levels.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// The level currently loaded into the world.
#[derive(Resource, Debug, Default, Clone)]
pub struct CurrentLevel {
    pub id: Option<u32>,
    pub name: String,
    pub theme: Option<String>,
    pub background_color: String,
    pub accent_color: String,
}
