//! Compact wire events.
//!
//! One `RemoteEvent` per successfully dispatched local action: the action's
//! type and payload, never the full session. Two events have no action
//! counterpart: `PlayerLeft` (a graceful disconnect) and `PlayerSnapshot`
//! (a participant's own zones, sent to late joiners).

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;
use crate::core::action::GameAction;
use crate::core::entity::InstanceId;
use crate::core::player::{PlayerId, PlayerState};
use crate::spatial::Position;

/// A notification relayed between participants of one session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RemoteEvent {
    PlayerJoined {
        player: PlayerId,
        username: String,
        library: Vector<CardInstance>,
    },
    PlayerLeft { player: PlayerId },
    CardDrawn { player: PlayerId },
    CardPlayed {
        player: PlayerId,
        instance: InstanceId,
        position: Position,
    },
    CardTapped {
        player: PlayerId,
        instance: InstanceId,
        tapped: bool,
    },
    CardMoved {
        player: PlayerId,
        instance: InstanceId,
        position: Position,
    },
    CardReturned { player: PlayerId, instance: InstanceId },
    /// The sender's own zones, authoritative for that player.
    PlayerSnapshot(PlayerState),
}

impl RemoteEvent {
    /// The equivalent action to replay, if any.
    #[must_use]
    pub fn into_action(self) -> Option<GameAction> {
        let action = match self {
            Self::PlayerJoined { player, username, library } => GameAction::PlayerJoined { player, username, library },
            Self::CardDrawn { player } => GameAction::DrawCard { player },
            Self::CardPlayed { player, instance, position } => GameAction::PlayCard { player, instance, position },
            Self::CardTapped { player, instance, tapped } => GameAction::TapCard { player, instance, tapped },
            Self::CardMoved { player, instance, position } => GameAction::MoveCard { player, instance, position },
            Self::CardReturned { player, instance } => GameAction::ReturnToHand { player, instance },
            Self::PlayerLeft { .. } | Self::PlayerSnapshot(_) => return None,
        };
        Some(action)
    }

    /// The participant the event is about.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match self {
            Self::PlayerJoined { player, .. }
            | Self::PlayerLeft { player }
            | Self::CardDrawn { player }
            | Self::CardPlayed { player, .. }
            | Self::CardTapped { player, .. }
            | Self::CardMoved { player, .. }
            | Self::CardReturned { player, .. } => *player,
            Self::PlayerSnapshot(state) => state.id(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PlayerJoined { .. } => "player_joined",
            Self::PlayerLeft { .. } => "player_left",
            Self::CardDrawn { .. } => "card_drawn",
            Self::CardPlayed { .. } => "card_played",
            Self::CardTapped { .. } => "card_tapped",
            Self::CardMoved { .. } => "card_moved",
            Self::CardReturned { .. } => "card_returned",
            Self::PlayerSnapshot(_) => "player_snapshot",
        }
    }
}

impl From<GameAction> for RemoteEvent {
    fn from(action: GameAction) -> Self {
        match action {
            GameAction::PlayerJoined { player, username, library } => Self::PlayerJoined { player, username, library },
            GameAction::DrawCard { player } => Self::CardDrawn { player },
            GameAction::PlayCard { player, instance, position } => Self::CardPlayed { player, instance, position },
            GameAction::TapCard { player, instance, tapped } => Self::CardTapped { player, instance, tapped },
            GameAction::MoveCard { player, instance, position } => Self::CardMoved { player, instance, position },
            GameAction::ReturnToHand { player, instance } => Self::CardReturned { player, instance },
        }
    }
}
