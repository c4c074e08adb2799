//! Board bounds and position clamping.
//!
//! A card's centre may range from half its footprint up to the viewport
//! dimension minus half its footprint on each axis: cards can sit flush
//! against an edge but never cross it.
//!
//! ```
//! use ccg_table::spatial::{Bounds, Footprint, Viewport};
//! use glam::Vec2;
//!
//! let bounds = Bounds::new(Footprint::new(100.0, 140.0), Viewport::new(480.0, 800.0));
//! let result = bounds.clamp(Vec2::new(10.0, 10.0));
//!
//! assert_eq!(result.position, Vec2::new(50.0, 70.0));
//! assert!(result.clamped);
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::footprint::Footprint;

/// Visible board area in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

/// Allowed range for a card centre.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

/// Result of clamping a position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clamped {
    pub position: Vec2,
    /// True if the input was outside the bounds (boundary collision).
    pub clamped: bool,
}

impl Bounds {
    /// Bounds for a footprint inside a viewport.
    ///
    /// An axis where the viewport is smaller than the footprint collapses to
    /// the viewport centre.
    #[must_use]
    pub fn new(footprint: Footprint, viewport: Viewport) -> Self {
        let half = footprint.half_extents();
        let (min_x, max_x) = axis_range(half.x, viewport.width);
        let (min_y, max_y) = axis_range(half.y, viewport.height);
        Self { min_x, max_x, min_y, max_y }
    }

    /// Check whether a position is already inside the bounds.
    #[must_use]
    pub fn contains(&self, position: Vec2) -> bool {
        position.x >= self.min_x
            && position.x <= self.max_x
            && position.y >= self.min_y
            && position.y <= self.max_y
    }

    /// Clamp each axis independently into range.
    ///
    /// Uses `max`/`min` rather than `f32::clamp` so that malformed bounds or
    /// NaN input from the wire never panic; NaN lands on the minimum.
    #[must_use]
    pub fn clamp(&self, position: Vec2) -> Clamped {
        let clamped_position = Vec2::new(
            position.x.max(self.min_x).min(self.max_x),
            position.y.max(self.min_y).min(self.max_y),
        );
        Clamped {
            position: clamped_position,
            clamped: clamped_position != position,
        }
    }
}

fn axis_range(half: f32, extent: f32) -> (f32, f32) {
    if extent >= half * 2.0 {
        (half, extent - half)
    } else {
        let centre = extent / 2.0;
        (centre, centre)
    }
}

/// Free-function form of [`Bounds::new`].
#[must_use]
pub fn bounds(footprint: Footprint, viewport: Viewport) -> Bounds {
    Bounds::new(footprint, viewport)
}

/// Free-function form of [`Bounds::clamp`].
#[must_use]
pub fn clamp(position: Vec2, bounds: &Bounds) -> Clamped {
    bounds.clamp(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn small() -> Bounds {
        Bounds::new(Footprint::new(100.0, 140.0), Viewport::new(480.0, 800.0))
    }

    #[test]
    fn test_bounds_from_footprint() {
        let b = small();

        assert_eq!(b.min_x, 50.0);
        assert_eq!(b.max_x, 430.0);
        assert_eq!(b.min_y, 70.0);
        assert_eq!(b.max_y, 730.0);
    }

    #[test]
    fn test_clamp_inside_is_noop() {
        let result = small().clamp(Vec2::new(200.0, 300.0));

        assert_eq!(result.position, Vec2::new(200.0, 300.0));
        assert!(!result.clamped);
    }

    #[test]
    fn test_clamp_each_axis() {
        let b = small();

        assert_eq!(b.clamp(Vec2::new(-5.0, 300.0)).position, Vec2::new(50.0, 300.0));
        assert_eq!(b.clamp(Vec2::new(900.0, 300.0)).position, Vec2::new(430.0, 300.0));
        assert_eq!(b.clamp(Vec2::new(200.0, 5000.0)).position, Vec2::new(200.0, 730.0));
    }

    #[test]
    fn test_flush_against_edge_is_not_a_collision() {
        let result = small().clamp(Vec2::new(50.0, 70.0));
        assert!(!result.clamped);
    }

    #[test]
    fn test_tiny_viewport_collapses_to_centre() {
        let b = Bounds::new(Footprint::new(100.0, 140.0), Viewport::new(60.0, 100.0));

        assert_eq!(b.min_x, 30.0);
        assert_eq!(b.max_x, 30.0);
        assert_eq!(b.clamp(Vec2::new(0.0, 0.0)).position, Vec2::new(30.0, 50.0));
    }

    #[test]
    fn test_nan_lands_on_minimum() {
        let result = small().clamp(Vec2::new(f32::NAN, 100.0));
        assert_eq!(result.position.x, 50.0);
    }

    proptest! {
        #[test]
        fn prop_clamp_idempotent(
            x in -5000.0f32..5000.0,
            y in -5000.0f32..5000.0,
            w in 1.0f32..4000.0,
            h in 1.0f32..4000.0,
            fw in 1.0f32..300.0,
            fh in 1.0f32..300.0,
        ) {
            let b = Bounds::new(Footprint::new(fw, fh), Viewport::new(w, h));
            let once = b.clamp(Vec2::new(x, y));
            let twice = b.clamp(once.position);

            prop_assert_eq!(once.position, twice.position);
            prop_assert!(!twice.clamped);
            prop_assert!(b.contains(once.position));
        }
    }
}
