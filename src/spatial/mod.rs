//! Spatial constraints for draggable board objects.
//!
//! Pure geometry, no side effects:
//!
//! - `FootprintTable`: viewport width → card footprint (three tiers by default)
//! - `Bounds`: allowed range for a card centre, plus `clamp`
//! - `BoardLayout`: current viewport and footprint for one replica
//!
//! Positions are `glam::Vec2` board coordinates of a card's centre.

pub mod bounds;
pub mod footprint;
pub mod layout;

pub use bounds::{bounds, clamp, Bounds, Clamped, Viewport};
pub use footprint::{Breakpoint, Footprint, FootprintTable};
pub use layout::BoardLayout;

/// Board position of a card centre.
pub type Position = glam::Vec2;
