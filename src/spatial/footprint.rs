//! Card footprints chosen from a viewport breakpoint table.
//!
//! The board renders cards at one of a few fixed sizes depending on how wide
//! the viewport is. The default table has three tiers:
//!
//! | Viewport width | Footprint |
//! |----------------|-----------|
//! | `< 768`        | 100 × 140 |
//! | `< 1280`       | 130 × 182 |
//! | otherwise      | 160 × 224 |

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rendered card size on the board.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub width: f32,
    pub height: f32,
}

impl Footprint {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Half width and half height.
    #[must_use]
    pub fn half_extents(self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// One tier: viewports narrower than `below_width` use `footprint`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub below_width: f32,
    pub footprint: Footprint,
}

/// Breakpoint table, tiers in ascending `below_width` order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FootprintTable {
    tiers: Vec<Breakpoint>,
    /// Used when the viewport is at least as wide as every tier.
    widest: Footprint,
}

impl Default for FootprintTable {
    fn default() -> Self {
        Self {
            tiers: vec![
                Breakpoint {
                    below_width: 768.0,
                    footprint: Footprint::new(100.0, 140.0),
                },
                Breakpoint {
                    below_width: 1280.0,
                    footprint: Footprint::new(130.0, 182.0),
                },
            ],
            widest: Footprint::new(160.0, 224.0),
        }
    }
}

impl FootprintTable {
    /// Create a table with only the widest tier.
    #[must_use]
    pub fn uniform(footprint: Footprint) -> Self {
        Self {
            tiers: Vec::new(),
            widest: footprint,
        }
    }

    /// Add a narrower tier (builder pattern).
    ///
    /// Tiers are kept sorted so lookups stay correct regardless of call order.
    #[must_use]
    pub fn with_tier(mut self, below_width: f32, footprint: Footprint) -> Self {
        self.tiers.push(Breakpoint { below_width, footprint });
        self.tiers.sort_by(|a, b| a.below_width.total_cmp(&b.below_width));
        self
    }

    /// Footprint for a viewport width.
    #[must_use]
    pub fn footprint(&self, viewport_width: f32) -> Footprint {
        self.tiers
            .iter()
            .find(|tier| viewport_width < tier.below_width)
            .map_or(self.widest, |tier| tier.footprint)
    }

    #[must_use]
    pub fn tiers(&self) -> &[Breakpoint] {
        &self.tiers
    }

    #[must_use]
    pub fn widest(&self) -> Footprint {
        self.widest
    }
}
