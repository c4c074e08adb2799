//! Table configuration.
//!
//! Tables are configured at startup by providing a `TableConfig`:
//! - Footprint breakpoint table and initial viewport
//! - Selection drag threshold
//! - Hover-preview delay
//! - Library shuffling on seed
//! - Action-history cap
//!
//! Configs can be built in code or loaded from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::DEFAULT_HISTORY_LIMIT;
use crate::spatial::{BoardLayout, FootprintTable, Viewport};

/// Opaque phase identifier.
///
/// The engine stores the phase but defines no progression rules; it is
/// just compared for equality.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhaseId(pub u32);

impl PhaseId {
    /// Create a new phase ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Errors raised while loading or validating a `TableConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("invalid table config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A footprint has a non-positive dimension.
    #[error("footprint {width}x{height} must have positive dimensions")]
    InvalidFootprint { width: f32, height: f32 },

    /// Breakpoints are not strictly ascending.
    #[error("breakpoint at width {0} is not above the previous tier")]
    UnorderedBreakpoint(f32),

    /// The viewport has a non-positive dimension.
    #[error("viewport {width}x{height} must have positive dimensions")]
    InvalidViewport { width: f32, height: f32 },

    /// Drag threshold is negative or not a number.
    #[error("drag threshold {0} must be a non-negative number")]
    InvalidDragThreshold(f32),

    /// History must keep at least one record.
    #[error("history limit must be at least 1")]
    InvalidHistoryLimit,
}

/// Complete table configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Viewport width → card footprint.
    pub footprints: FootprintTable,

    /// Viewport the board starts with before the first resize.
    pub viewport: Viewport,

    /// Minimum drag distance (px) for a rectangle selection to count.
    /// Shorter drags are treated as a deselect-all click.
    pub drag_threshold: f32,

    /// Delay before a hovered card shows its preview.
    pub hover_delay_ms: u64,

    /// Shuffle libraries when seeding them from a deck list.
    pub shuffle_libraries: bool,

    /// Seed for library shuffles.
    pub seed: u64,

    /// Most recent actions kept in the session history.
    pub history_limit: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            footprints: FootprintTable::default(),
            viewport: Viewport::default(),
            drag_threshold: 5.0,
            hover_delay_ms: 500,
            shuffle_libraries: false,
            seed: 42,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl TableConfig {
    /// Create a default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the footprint table.
    #[must_use]
    pub fn with_footprints(mut self, footprints: FootprintTable) -> Self {
        self.footprints = footprints;
        self
    }

    /// Set the initial viewport.
    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Set the selection drag threshold.
    #[must_use]
    pub fn with_drag_threshold(mut self, threshold: f32) -> Self {
        self.drag_threshold = threshold;
        self
    }

    /// Set the hover-preview delay.
    #[must_use]
    pub fn with_hover_delay_ms(mut self, delay: u64) -> Self {
        self.hover_delay_ms = delay;
        self
    }

    /// Shuffle seeded libraries with the given seed.
    #[must_use]
    pub fn shuffled(mut self, seed: u64) -> Self {
        self.shuffle_libraries = true;
        self.seed = seed;
        self
    }

    /// Cap the session history.
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Initial board layout.
    #[must_use]
    pub fn layout(&self) -> BoardLayout {
        BoardLayout::new(self.footprints.clone(), self.viewport)
    }

    /// Check the config for values the spatial and selection modules can't use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut previous: Option<f32> = None;
        for tier in self.footprints.tiers() {
            check_footprint(tier.footprint.width, tier.footprint.height)?;
            if previous.is_some_and(|p| tier.below_width <= p) {
                return Err(ConfigError::UnorderedBreakpoint(tier.below_width));
            }
            previous = Some(tier.below_width);
        }
        let widest = self.footprints.widest();
        check_footprint(widest.width, widest.height)?;

        if !(self.viewport.width > 0.0 && self.viewport.height > 0.0) {
            return Err(ConfigError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !(self.drag_threshold >= 0.0) {
            return Err(ConfigError::InvalidDragThreshold(self.drag_threshold));
        }
        if self.history_limit == 0 {
            return Err(ConfigError::InvalidHistoryLimit);
        }
        Ok(())
    }
}

fn check_footprint(width: f32, height: f32) -> Result<(), ConfigError> {
    if width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidFootprint { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::Footprint;

    #[test]
    fn test_default_config_is_valid() {
        let config = TableConfig::new();

        assert!(config.validate().is_ok());
        assert_eq!(config.drag_threshold, 5.0);
        assert!(!config.shuffle_libraries);
    }

    #[test]
    fn test_builder() {
        let config = TableConfig::new()
            .with_viewport(Viewport::new(800.0, 600.0))
            .with_drag_threshold(8.0)
            .with_hover_delay_ms(250)
            .shuffled(7);

        assert_eq!(config.viewport, Viewport::new(800.0, 600.0));
        assert_eq!(config.drag_threshold, 8.0);
        assert_eq!(config.hover_delay_ms, 250);
        assert!(config.shuffle_libraries);
        assert_eq!(config.seed, 7);
        assert_eq!(config.layout().footprint(), Footprint::new(130.0, 182.0));
    }

    #[test]
    fn test_from_json_partial() {
        let config = TableConfig::from_json(r#"{ "drag_threshold": 12.5 }"#).unwrap();

        assert_eq!(config.drag_threshold, 12.5);
        assert_eq!(config.viewport, Viewport::default());
    }

    #[test]
    fn test_from_json_rejects_negative_threshold() {
        let err = TableConfig::from_json(r#"{ "drag_threshold": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDragThreshold(_)));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = TableConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_footprint() {
        let config = TableConfig::new()
            .with_footprints(FootprintTable::uniform(Footprint::new(0.0, 10.0)));

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidFootprint { .. })
        ));
    }

    #[test]
    fn test_invalid_viewport() {
        let config = TableConfig::new().with_viewport(Viewport::new(0.0, 600.0));
        assert!(matches!(config.validate(), Err(ConfigError::InvalidViewport { .. })));
    }

    #[test]
    fn test_history_limit() {
        assert_eq!(TableConfig::new().history_limit, DEFAULT_HISTORY_LIMIT);

        let config = TableConfig::from_json(r#"{ "history_limit": 64 }"#).unwrap();
        assert_eq!(config.history_limit, 64);

        let err = TableConfig::from_json(r#"{ "history_limit": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHistoryLimit));
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = TableConfig::new().shuffled(99);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(TableConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_phase_id() {
        assert_eq!(PhaseId::new(5).0, 5);
        assert_eq!(PhaseId::default().0, 0);
    }
}
