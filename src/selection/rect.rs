//! Axis-aligned rectangles for selection hit testing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::spatial::Footprint;

/// Axis-aligned rectangle, `min <= max` on both axes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle spanned by two corners in any order.
    #[must_use]
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// A card's box: its footprint centred on its position.
    ///
    /// Tapped cards use the same unrotated box.
    #[must_use]
    pub fn around(center: Vec2, footprint: Footprint) -> Self {
        let half = footprint.half_extents();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Plain AABB overlap. Touching edges count as overlapping.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}
