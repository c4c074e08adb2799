//! Zone system for card locations.
//!
//! Every card instance is in exactly one of a player's library, hand, or
//! battlefield. The zones themselves are fields of `PlayerState`; this module
//! names them and provides the `ZoneIndex` used to locate and audit cards.
//!
//! ## Key Types
//!
//! - `Zone`: Library, Hand, Battlefield
//! - `ZoneLocation`: Owning player, zone, and ordered index
//! - `ZoneIndex`: Instance → location lookup over one snapshot

pub mod manager;

pub use manager::{Zone, ZoneIndex, ZoneLocation};
