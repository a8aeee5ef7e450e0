//! Axis-aligned bounding boxes
//!
//! Every entity on the playfield is a rectangle anchored at its top-left
//! corner. Overlap uses strict inequalities, so rectangles that merely share
//! an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Positive-area intersection test
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }

    /// True if this rectangle lies entirely within `[0, bounds.x] × [0, bounds.y]`
    pub fn within(&self, bounds: Vec2) -> bool {
        self.pos.x >= 0.0
            && self.pos.y >= 0.0
            && self.pos.x + self.size.x <= bounds.x
            && self.pos.y + self.size.y <= bounds.y
    }
}

/// Anything with a bounding box on the playfield
pub trait Bounded {
    fn rect(&self) -> Rect;

    #[inline]
    fn center(&self) -> Vec2 {
        self.rect().center()
    }
}

impl Bounded for Rect {
    fn rect(&self) -> Rect {
        *self
    }
}

/// Overlap test that tolerates absent entities (e.g. no boss on the field)
pub fn overlaps<A: Bounded, B: Bounded>(a: Option<&A>, b: Option<&B>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.rect().intersects(&b.rect()),
        _ => false,
    }
}
