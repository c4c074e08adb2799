//! Viewport-aware layout: the current footprint and bounds for one replica.

use serde::{Deserialize, Serialize};

use super::bounds::{Bounds, Viewport};
use super::footprint::{Footprint, FootprintTable};

/// Footprint table plus the current viewport.
///
/// Layout is replica-local: each participant clamps against its own screen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardLayout {
    table: FootprintTable,
    viewport: Viewport,
}

impl BoardLayout {
    #[must_use]
    pub fn new(table: FootprintTable, viewport: Viewport) -> Self {
        Self { table, viewport }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Footprint for the current viewport width.
    #[must_use]
    pub fn footprint(&self) -> Footprint {
        self.table.footprint(self.viewport.width)
    }

    /// Bounds for the current footprint and viewport.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.footprint(), self.viewport)
    }

    /// Switch to a new viewport and return the new bounds.
    pub fn resize(&mut self, viewport: Viewport) -> Bounds {
        self.viewport = viewport;
        self.bounds()
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::new(FootprintTable::default(), Viewport::default())
    }
}
