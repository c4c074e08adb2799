//! Zone index for card locations.
//!
//! Zones themselves live on `PlayerState` (library, hand, battlefield). The
//! `ZoneIndex` is a read-only view built from a session snapshot that maps
//! every instance to where it currently is. It is used to:
//! - Locate a card without knowing which zone to search
//! - Audit zone exclusivity (no instance in two places)
//! - Count cards per player for conservation checks

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::entity::InstanceId;
use crate::core::player::PlayerId;
use crate::core::state::Session;

/// The three zones a card instance can occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Library,
    Hand,
    Battlefield,
}

/// Where an instance is: whose zone, and which.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneLocation {
    pub player: PlayerId,
    pub zone: Zone,
    /// Index within an ordered zone (library, hand). `None` on the battlefield.
    pub index: Option<usize>,
}

/// Location index over one session snapshot.
///
/// ## Usage
///
/// ```
/// use ccg_table::core::{Session, SessionId};
/// use ccg_table::spatial::{Bounds, Footprint, Viewport};
/// use ccg_table::zones::ZoneIndex;
///
/// let session = Session::new(
///     SessionId::new(1),
///     Bounds::new(Footprint::new(100.0, 140.0), Viewport::new(800.0, 600.0)),
/// );
/// let index = ZoneIndex::build(&session);
/// assert!(index.is_exclusive());
/// assert_eq!(index.total_cards(), 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ZoneIndex {
    locations: FxHashMap<InstanceId, ZoneLocation>,
    /// Instances seen in more than one place.
    duplicates: Vec<InstanceId>,
}

impl ZoneIndex {
    /// Index every card in every player's zones.
    #[must_use]
    pub fn build(session: &Session) -> Self {
        let mut index = Self::default();

        for (&player, state) in session.players() {
            for (i, card) in state.library().iter().enumerate() {
                index.insert(card.instance_id, player, Zone::Library, Some(i));
            }
            for (i, card) in state.hand().iter().enumerate() {
                index.insert(card.instance_id, player, Zone::Hand, Some(i));
            }
            for &id in state.battlefield().keys() {
                index.insert(id, player, Zone::Battlefield, None);
            }
        }

        index
    }

    fn insert(&mut self, id: InstanceId, player: PlayerId, zone: Zone, index: Option<usize>) {
        let location = ZoneLocation { player, zone, index };
        if self.locations.insert(id, location).is_some() {
            self.duplicates.push(id);
        }
    }

    /// Get where a card is.
    #[must_use]
    pub fn locate(&self, instance: InstanceId) -> Option<ZoneLocation> {
        self.locations.get(&instance).copied()
    }

    /// Check if a card is in a specific zone.
    #[must_use]
    pub fn is_in_zone(&self, instance: InstanceId, zone: Zone) -> bool {
        self.locate(instance).is_some_and(|l| l.zone == zone)
    }

    /// True if no instance appears in more than one place.
    #[must_use]
    pub fn is_exclusive(&self) -> bool {
        self.duplicates.is_empty()
    }

    /// Instances found in more than one place.
    #[must_use]
    pub fn duplicates(&self) -> &[InstanceId] {
        &self.duplicates
    }

    /// Number of cards in one player's zone.
    #[must_use]
    pub fn zone_size(&self, player: PlayerId, zone: Zone) -> usize {
        self.locations
            .values()
            .filter(|l| l.player == player && l.zone == zone)
            .count()
    }

    /// Get total number of distinct cards tracked.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.locations.len()
    }
}
