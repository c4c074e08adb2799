//! Dispatch results.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::entity::InstanceId;
use crate::core::player::PlayerId;
use crate::spatial::Position;

/// Why an action was rejected. The session is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum ActionError {
    #[error("{instance} is not in {player}'s hand")]
    CardNotInHand { player: PlayerId, instance: InstanceId },

    #[error("{0} is not on the battlefield")]
    CardNotOnBattlefield(InstanceId),

    /// A local actor tried to change another player's card.
    #[error("{player} does not own {instance}")]
    NotOwner { player: PlayerId, instance: InstanceId },

    #[error("{0} has an empty library")]
    EmptyLibrary(PlayerId),

    #[error("{0} has not joined this session")]
    UnknownPlayer(PlayerId),

    #[error("session has ended")]
    SessionEnded,
}

/// What a successful action did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// A new player was added.
    Joined(PlayerId),
    /// A disconnected player came back.
    Rejoined(PlayerId),
    /// The player was already present and connected; nothing changed.
    AlreadyPresent(PlayerId),
    Drew(InstanceId),
    /// `clamped` reports a boundary collision.
    Played {
        instance: InstanceId,
        position: Position,
        clamped: bool,
    },
    Tapped { instance: InstanceId, tapped: bool },
    Moved {
        instance: InstanceId,
        position: Position,
        clamped: bool,
    },
    Returned(InstanceId),
}

impl ActionOutcome {
    /// False only for idempotent no-ops.
    #[must_use]
    pub fn changed_state(&self) -> bool {
        !matches!(self, Self::AlreadyPresent(_))
    }

    /// True if a requested position hit the board edge.
    #[must_use]
    pub fn hit_boundary(&self) -> bool {
        matches!(
            self,
            Self::Played { clamped: true, .. } | Self::Moved { clamped: true, .. }
        )
    }
}

/// Success with what happened, or a typed failure reason.
pub type ActionResult = Result<ActionOutcome, ActionError>;
