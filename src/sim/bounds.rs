//! Axis-aligned bounding boxes for posts and controllables
//!
//! A box is anchored at its top-left corner. Overlap is strict: boxes that
//! only share an edge do not touch.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Square box of side `side` anchored at `min`
    pub fn square(min: Vec2, side: f32) -> Self {
        Self::new(min, Vec2::splat(side))
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap test
    pub fn overlaps(&self, other: &Bounds) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }
}
