//! Action representation.
//!
//! A `GameAction` is one discrete board change requested by a player. Every
//! variant names the acting player; the rest is the action's payload.
//! The dispatcher interprets actions; the network bridge ships them as
//! compact events; the facade builds them from UI calls.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::entity::InstanceId;
use super::player::PlayerId;
use crate::cards::CardInstance;
use crate::spatial::Position;

/// A complete game action.
///
/// ## Example
///
/// ```
/// use ccg_table::core::{GameAction, InstanceId, PlayerId};
/// use glam::Vec2;
///
/// let alice = PlayerId::new(1);
/// let bolt = InstanceId::new(alice, 0);
///
/// let play = GameAction::PlayCard { player: alice, instance: bolt, position: Vec2::new(500.0, 500.0) };
/// assert_eq!(play.player(), alice);
/// assert_eq!(play.instance(), Some(bolt));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameAction {
    /// A participant joined (or rejoined) the session.
    ///
    /// Carries the joiner's seeded library so other replicas can replay
    /// the joiner's draws.
    PlayerJoined {
        player: PlayerId,
        username: String,
        library: Vector<CardInstance>,
    },

    /// Library front → hand tail.
    DrawCard { player: PlayerId },

    /// Hand → battlefield at a (clamped) position.
    PlayCard {
        player: PlayerId,
        instance: InstanceId,
        position: Position,
    },

    /// Set the tapped flag of a battlefield card.
    TapCard {
        player: PlayerId,
        instance: InstanceId,
        tapped: bool,
    },

    /// Reposition a battlefield card.
    MoveCard {
        player: PlayerId,
        instance: InstanceId,
        position: Position,
    },

    /// Battlefield → owner's hand tail.
    ReturnToHand { player: PlayerId, instance: InstanceId },
}

impl GameAction {
    /// The acting player.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match self {
            Self::PlayerJoined { player, .. }
            | Self::DrawCard { player }
            | Self::PlayCard { player, .. }
            | Self::TapCard { player, .. }
            | Self::MoveCard { player, .. }
            | Self::ReturnToHand { player, .. } => *player,
        }
    }

    /// The card this action targets, if any.
    #[must_use]
    pub fn instance(&self) -> Option<InstanceId> {
        match self {
            Self::PlayCard { instance, .. }
            | Self::TapCard { instance, .. }
            | Self::MoveCard { instance, .. }
            | Self::ReturnToHand { instance, .. } => Some(*instance),
            Self::PlayerJoined { .. } | Self::DrawCard { .. } => None,
        }
    }

    /// Short name for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PlayerJoined { .. } => "player_joined",
            Self::DrawCard { .. } => "draw_card",
            Self::PlayCard { .. } => "play_card",
            Self::TapCard { .. } => "tap_card",
            Self::MoveCard { .. } => "move_card",
            Self::ReturnToHand { .. } => "return_to_hand",
        }
    }
}

/// Where an action came from.
///
/// Remote replays skip locally-scoped authorization: a remote participant is
/// authoritative over their own cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionOrigin {
    /// Issued through this replica's facade.
    Local,
    /// Received from another participant and replayed.
    Remote,
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: GameAction,

    /// Local or remote origin.
    pub origin: ActionOrigin,

    /// Turn counter when the action was applied.
    pub turn: u32,

    /// Replica-local sequence number (arrival order).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(action: GameAction, origin: ActionOrigin, turn: u32, sequence: u32) -> Self {
        Self {
            player: action.player(),
            action,
            origin,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn alice() -> PlayerId {
        PlayerId::new(1)
    }

    #[test]
    fn test_action_accessors() {
        let id = InstanceId::new(alice(), 3);
        let tap = GameAction::TapCard { player: alice(), instance: id, tapped: true };

        assert_eq!(tap.player(), alice());
        assert_eq!(tap.instance(), Some(id));
        assert_eq!(tap.kind(), "tap_card");

        let draw = GameAction::DrawCard { player: alice() };
        assert_eq!(draw.instance(), None);
        assert_eq!(draw.kind(), "draw_card");
    }

    #[test]
    fn test_action_equality() {
        let id = InstanceId::new(alice(), 0);
        let a1 = GameAction::MoveCard { player: alice(), instance: id, position: Vec2::new(1.0, 2.0) };
        let a2 = GameAction::MoveCard { player: alice(), instance: id, position: Vec2::new(1.0, 2.0) };
        let a3 = GameAction::MoveCard { player: alice(), instance: id, position: Vec2::new(1.0, 3.0) };

        assert_eq!(a1, a2);
        assert_ne!(a1, a3);
    }

    #[test]
    fn test_action_record() {
        let action = GameAction::DrawCard { player: alice() };
        let record = ActionRecord::new(action.clone(), ActionOrigin::Remote, 3, 5);

        assert_eq!(record.player, alice());
        assert_eq!(record.action, action);
        assert_eq!(record.origin, ActionOrigin::Remote);
        assert_eq!(record.turn, 3);
        assert_eq!(record.sequence, 5);
    }

    #[test]
    fn test_action_serialization() {
        let action = GameAction::PlayCard {
            player: alice(),
            instance: InstanceId::new(alice(), 2),
            position: Vec2::new(500.0, 500.0),
        };
        let json = serde_json::to_string(&action).unwrap();
        let deserialized: GameAction = serde_json::from_str(&json).unwrap();

        assert_eq!(action, deserialized);
    }
}
