//! Card instances - runtime card state.
//!
//! `CardInstance` is one uniquely identified copy of a card definition. In a
//! library or hand it has no spatial state. Once played it is wrapped in a
//! `BattlefieldCard`, which adds position, tapped state, stacking order and
//! the owning player.

use serde::{Deserialize, Serialize};

use super::definition::CardDefinition;
use crate::core::entity::InstanceId;
use crate::core::player::PlayerId;
use crate::spatial::Position;

/// A card copy in a library or hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique ID for this copy. Persists across zone changes.
    pub instance_id: InstanceId,

    /// Copied definition data.
    pub card: CardDefinition,
}

impl CardInstance {
    #[must_use]
    pub fn new(instance_id: InstanceId, card: CardDefinition) -> Self {
        Self { instance_id, card }
    }
}

/// A card on the shared play surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattlefieldCard {
    pub card: CardInstance,

    /// Owning player.
    pub owner: PlayerId,

    /// Centre of the card in board coordinates.
    pub position: Position,

    pub tapped: bool,

    /// Stacking order; higher renders on top.
    pub z_index: u32,
}

impl BattlefieldCard {
    /// Put a card on the battlefield untapped.
    #[must_use]
    pub fn new(card: CardInstance, owner: PlayerId, position: Position, z_index: u32) -> Self {
        Self {
            card,
            owner,
            position,
            tapped: false,
            z_index,
        }
    }

    #[must_use]
    pub fn instance_id(&self) -> InstanceId {
        self.card.instance_id
    }

    /// Strip battlefield state, e.g. when returning to hand.
    #[must_use]
    pub fn into_instance(self) -> CardInstance {
        self.card
    }
}
