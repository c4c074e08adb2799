//! Identifiers for sessions and card instances.
//!
//! ## Instance ID Layout
//!
//! Every in-play copy of a card carries an `InstanceId`. IDs are namespaced
//! by the owning player plus a per-player serial:
//!
//! - `player`: the player whose library the copy was seeded into
//! - `serial`: position in that player's seeding order (0-based)
//!
//! Each participant seeds its own library independently, so the namespace is
//! what keeps IDs unique across the whole session. IDs are never reused, even
//! after a card leaves play.
//!
//! ```
//! use ccg_table::core::{InstanceId, PlayerId};
//!
//! let bolt = InstanceId::new(PlayerId::new(1), 0);
//! let other = InstanceId::new(PlayerId::new(2), 0);
//!
//! assert_ne!(bolt, other);
//! assert_eq!(bolt.player(), PlayerId::new(1));
//! ```

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Unique identifier for one in-play copy of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId {
    player: PlayerId,
    serial: u32,
}

impl InstanceId {
    /// Create an instance ID in a player's namespace.
    #[must_use]
    pub const fn new(player: PlayerId, serial: u32) -> Self {
        Self { player, serial }
    }

    /// The player this instance was minted for.
    ///
    /// This is the namespace owner, which is also the card's owner:
    /// cards never change hands in this engine.
    #[must_use]
    pub const fn player(self) -> PlayerId {
        self.player
    }

    /// Per-player serial number.
    #[must_use]
    pub const fn serial(self) -> u32 {
        self.serial
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({}:{})", self.player.raw(), self.serial)
    }
}

/// Stable identifier for one game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl SessionId {
    /// Create a new session ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Session({})", self.0)
    }
}
