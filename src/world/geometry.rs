//! Planar collision primitives shared by every moving entity.
//!
//! Positions are the top-left corner of an entity's box in world units,
//! with +x to the right and +y downwards.

use bevy::prelude::*;

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    /// Half-open intersection test. Boxes that only touch edges do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// A box of the given size placed at `offset` relative to this box's corner.
    pub fn sub_box(&self, offset: Vec2, size: Vec2) -> Aabb {
        Aabb::new(self.x + offset.x, self.y + offset.y, size.x, size.y)
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Inclusive position range an entity's corner may occupy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Clamp a position into range. When `min > max` on an axis the minimum wins.
    pub fn clamp(&self, position: Vec2) -> Vec2 {
        position.min(self.max).max(self.min)
    }

    pub fn contains(&self, position: Vec2) -> bool {
        position.x >= self.min.x
            && position.x <= self.max.x
            && position.y >= self.min.y
            && position.y <= self.max.y
    }
}

/// Position and fixed size of a simulated entity.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_position_size(self.position, self.size)
    }

    pub fn aabb_at(&self, position: Vec2) -> Aabb {
        Aabb::from_position_size(position, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size / 2.0
    }
}

/// Resolve a single frame of movement with axis-separated retry.
///
/// The full `delta` is tried first, then its horizontal component alone, then
/// its vertical component alone. Each candidate is clamped to `bounds` before
/// the `blocked` query. If every candidate is blocked the entity stays at
/// `origin`.
pub fn resolve_movement(
    origin: Vec2,
    size: Vec2,
    delta: Vec2,
    bounds: &Bounds,
    blocked: impl Fn(&Aabb) -> bool,
) -> Vec2 {
    let attempt = |step: Vec2| {
        let candidate = bounds.clamp(origin + step);
        (!blocked(&Aabb::from_position_size(candidate, size))).then_some(candidate)
    };

    attempt(delta)
        .or_else(|| attempt(Vec2::new(delta.x, 0.0)))
        .or_else(|| attempt(Vec2::new(0.0, delta.y)))
        .unwrap_or(origin)
}
