//! Static level geometry and the spatial queries run against it.

use bevy::prelude::*;

use super::geometry::Aabb;

/// Which list an obstacle lives in. Blocking rules are per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleCategory {
    Tree,
    Wall,
    House,
    Mountain,
    Cave,
    Stalactite,
}

/// A mountain or cave sub-zone that sends the player to another level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Portal {
    pub zone: Aabb,
    pub destination: u32,
}

/// One piece of static geometry.
///
/// The collision box is fixed at construction and is usually smaller than
/// the visual box (a tree only blocks at its trunk).
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub category: ObstacleCategory,
    pub visual: Aabb,
    pub collision: Aabb,
    /// Area in which the player moves at reduced speed.
    pub slowdown: Option<Aabb>,
    pub portal: Option<Portal>,
    /// House style or stalactite orientation, kept for presentation.
    pub variant: Option<String>,
}

const TREE_SIZE: Vec2 = Vec2::new(32.0, 48.0);
const HOUSE_SIZE: Vec2 = Vec2::new(64.0, 48.0);
const MOUNTAIN_SIZE: Vec2 = Vec2::new(80.0, 60.0);
const STALACTITE_SIZE: Vec2 = Vec2::new(20.0, 32.0);
const STALAGMITE_SIZE: Vec2 = Vec2::new(20.0, 28.0);

impl Obstacle {
    fn new(category: ObstacleCategory, visual: Aabb, collision: Aabb) -> Self {
        Self {
            category,
            visual,
            collision,
            slowdown: None,
            portal: None,
            variant: None,
        }
    }

    pub fn tree(x: f32, y: f32) -> Self {
        let visual = Aabb::from_position_size(Vec2::new(x, y), TREE_SIZE);
        let trunk = visual.sub_box(Vec2::new(4.0, 32.0), Vec2::new(24.0, 16.0));
        Self::new(ObstacleCategory::Tree, visual, trunk)
    }

    pub fn wall(x: f32, y: f32, width: f32, height: f32) -> Self {
        let visual = Aabb::new(x, y, width, height);
        Self::new(ObstacleCategory::Wall, visual, visual)
    }

    pub fn house(x: f32, y: f32, style: impl Into<String>) -> Self {
        let visual = Aabb::from_position_size(Vec2::new(x, y), HOUSE_SIZE);
        Self {
            variant: Some(style.into()),
            ..Self::new(ObstacleCategory::House, visual, visual)
        }
    }

    pub fn mountain(x: f32, y: f32, portal_destination: Option<u32>) -> Self {
        let visual = Aabb::from_position_size(Vec2::new(x, y), MOUNTAIN_SIZE);
        let slope = visual.sub_box(Vec2::new(10.0, 30.0), Vec2::new(60.0, 30.0));
        Self {
            slowdown: Some(visual),
            portal: portal_destination.map(|destination| Portal {
                zone: visual.sub_box(Vec2::new(30.0, 35.0), Vec2::new(20.0, 25.0)),
                destination,
            }),
            ..Self::new(ObstacleCategory::Mountain, visual, slope)
        }
    }

    pub fn cave(x: f32, y: f32) -> Self {
        let visual = Aabb::from_position_size(Vec2::new(x, y), MOUNTAIN_SIZE);
        let mouth = visual.sub_box(Vec2::new(10.0, 30.0), Vec2::new(60.0, 30.0));
        Self {
            slowdown: Some(visual),
            ..Self::new(ObstacleCategory::Cave, visual, mouth)
        }
    }

    /// A hanging stalactite, or a floor stalagmite when `hanging` is false.
    pub fn stalactite(x: f32, y: f32, hanging: bool) -> Self {
        let (visual, collision, variant) = if hanging {
            let visual = Aabb::from_position_size(Vec2::new(x, y), STALACTITE_SIZE);
            let mid = visual.sub_box(Vec2::new(6.0, 16.0), Vec2::new(8.0, 16.0));
            (visual, mid, "hanging")
        } else {
            let visual = Aabb::from_position_size(Vec2::new(x, y), STALAGMITE_SIZE);
            let base = visual.sub_box(Vec2::new(6.0, 0.0), Vec2::new(8.0, 16.0));
            (visual, base, "floor")
        };
        Self {
            variant: Some(variant.to_string()),
            ..Self::new(ObstacleCategory::Stalactite, visual, collision)
        }
    }

    pub fn collides(&self, aabb: &Aabb) -> bool {
        self.collision.overlaps(aabb)
    }

    pub fn blocks_player(&self) -> bool {
        matches!(
            self.category,
            ObstacleCategory::Tree
                | ObstacleCategory::Wall
                | ObstacleCategory::House
                | ObstacleCategory::Stalactite
        )
    }

    /// Mountains additionally stop enemies. Caves never block.
    pub fn blocks_enemies(&self) -> bool {
        self.blocks_player() || self.category == ObstacleCategory::Mountain
    }
}

/// Every obstacle of the active level, grouped by category.
///
/// Replaced wholesale on level load; systems read it through `Res<Obstacles>`.
#[derive(Resource, Debug, Default, Clone)]
pub struct Obstacles {
    pub trees: Vec<Obstacle>,
    pub walls: Vec<Obstacle>,
    pub houses: Vec<Obstacle>,
    pub mountains: Vec<Obstacle>,
    pub caves: Vec<Obstacle>,
    pub stalactites: Vec<Obstacle>,
}

impl Obstacles {
    pub fn insert(&mut self, obstacle: Obstacle) {
        let list = match obstacle.category {
            ObstacleCategory::Tree => &mut self.trees,
            ObstacleCategory::Wall => &mut self.walls,
            ObstacleCategory::House => &mut self.houses,
            ObstacleCategory::Mountain => &mut self.mountains,
            ObstacleCategory::Cave => &mut self.caves,
            ObstacleCategory::Stalactite => &mut self.stalactites,
        };
        list.push(obstacle);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.trees
            .iter()
            .chain(&self.walls)
            .chain(&self.houses)
            .chain(&self.mountains)
            .chain(&self.caves)
            .chain(&self.stalactites)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Trees, stalactites, houses and walls.
    pub fn blocks_player(&self, aabb: &Aabb) -> bool {
        self.iter().any(|o| o.blocks_player() && o.collides(aabb))
    }

    /// Player blockers plus mountains.
    pub fn blocks_enemy(&self, aabb: &Aabb) -> bool {
        self.iter().any(|o| o.blocks_enemies() && o.collides(aabb))
    }

    /// True when `aabb` overlaps any mountain or cave slowdown zone.
    pub fn in_slowdown_zone(&self, aabb: &Aabb) -> bool {
        self.mountains
            .iter()
            .chain(&self.caves)
            .filter_map(|o| o.slowdown)
            .any(|zone| zone.overlaps(aabb))
    }

    /// Destination of the first portal zone overlapping `aabb`.
    pub fn portal_at(&self, aabb: &Aabb) -> Option<u32> {
        self.mountains
            .iter()
            .chain(&self.caves)
            .filter_map(|o| o.portal)
            .find(|portal| portal.zone.overlaps(aabb))
            .map(|portal| portal.destination)
    }
}
