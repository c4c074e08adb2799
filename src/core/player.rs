//! Player identification and per-player zones.
//!
//! ## PlayerId
//!
//! Opaque participant identifier assigned by the transport layer.
//!
//! ## PlayerState
//!
//! One player's replica: username, library, hand, battlefield, and the
//! connection flag. All collections are `im` persistent structures, so
//! cloning a `PlayerState` is O(1) and unchanged players are shared between
//! session snapshots.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use super::entity::InstanceId;
use crate::cards::{BattlefieldCard, CardInstance};

/// Participant identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A single player's zones and connection status.
///
/// Library front is the next draw. Hand order is draw order, newest last.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    id: PlayerId,
    username: String,
    hand: Vector<CardInstance>,
    library: Vector<CardInstance>,
    battlefield: OrdMap<InstanceId, BattlefieldCard>,
    connected: bool,
}

impl PlayerState {
    /// Create a connected player with empty zones.
    #[must_use]
    pub fn new(id: PlayerId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            hand: Vector::new(),
            library: Vector::new(),
            battlefield: OrdMap::new(),
            connected: true,
        }
    }

    /// Seed the library (builder pattern).
    #[must_use]
    pub fn with_library(mut self, library: Vector<CardInstance>) -> Self {
        self.library = library;
        self
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Cards in hand, oldest first.
    #[must_use]
    pub fn hand(&self) -> &Vector<CardInstance> {
        &self.hand
    }

    /// Library, front = next draw.
    #[must_use]
    pub fn library(&self) -> &Vector<CardInstance> {
        &self.library
    }

    /// This player's cards on the battlefield.
    #[must_use]
    pub fn battlefield(&self) -> &OrdMap<InstanceId, BattlefieldCard> {
        &self.battlefield
    }

    /// Total cards across library, hand and battlefield.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.library.len() + self.hand.len() + self.battlefield.len()
    }

    /// Check whether an instance is in this player's hand.
    #[must_use]
    pub fn holds(&self, instance: InstanceId) -> bool {
        self.hand.iter().any(|c| c.instance_id == instance)
    }

    // === Zone mutation (dispatcher only) ===

    pub(crate) fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Move the library front to the hand tail.
    ///
    /// Returns the drawn instance, or `None` if the library is empty.
    pub(crate) fn draw(&mut self) -> Option<InstanceId> {
        let card = self.library.pop_front()?;
        let id = card.instance_id;
        self.hand.push_back(card);
        Some(id)
    }

    /// Remove a card from hand, preserving the order of the rest.
    pub(crate) fn take_from_hand(&mut self, instance: InstanceId) -> Option<CardInstance> {
        let index = self.hand.iter().position(|c| c.instance_id == instance)?;
        Some(self.hand.remove(index))
    }

    pub(crate) fn push_hand(&mut self, card: CardInstance) {
        self.hand.push_back(card);
    }

    pub(crate) fn place(&mut self, card: BattlefieldCard) {
        self.battlefield.insert(card.instance_id(), card);
    }

    pub(crate) fn battlefield_card_mut(&mut self, instance: InstanceId) -> Option<&mut BattlefieldCard> {
        self.battlefield.get_mut(&instance)
    }

    pub(crate) fn take_from_battlefield(&mut self, instance: InstanceId) -> Option<BattlefieldCard> {
        self.battlefield.remove(&instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardKey};
    use glam::Vec2;

    fn card(player: PlayerId, serial: u32, name: &str) -> CardInstance {
        CardInstance::new(
            InstanceId::new(player, serial),
            CardDefinition::new(CardKey::new(name), name),
        )
    }

    fn seeded() -> PlayerState {
        let p = PlayerId::new(1);
        PlayerState::new(p, "alice").with_library(Vector::from(vec![
            card(p, 0, "Bolt"),
            card(p, 1, "Counterspell"),
        ]))
    }

    #[test]
    fn test_player_id_basics() {
        let p = PlayerId::new(7);
        assert_eq!(p.raw(), 7);
        assert_eq!(format!("{}", p), "Player 7");
    }

    #[test]
    fn test_new_player_is_connected_and_empty() {
        let state = PlayerState::new(PlayerId::new(1), "alice");

        assert!(state.is_connected());
        assert_eq!(state.username(), "alice");
        assert_eq!(state.card_count(), 0);
    }

    #[test]
    fn test_draw_takes_front() {
        let mut state = seeded();

        let drawn = state.draw();
        assert_eq!(drawn, Some(InstanceId::new(PlayerId::new(1), 0)));
        assert_eq!(state.hand().len(), 1);
        assert_eq!(state.library().len(), 1);
        assert_eq!(state.library()[0].card.name, "Counterspell");
    }

    #[test]
    fn test_draw_empty_library() {
        let mut state = PlayerState::new(PlayerId::new(1), "alice");
        assert_eq!(state.draw(), None);
    }

    #[test]
    fn test_take_from_hand_preserves_order() {
        let mut state = seeded();
        state.draw();
        state.draw();

        let first = InstanceId::new(PlayerId::new(1), 0);
        let taken = state.take_from_hand(first);

        assert!(taken.is_some());
        assert!(!state.holds(first));
        assert_eq!(state.hand()[0].card.name, "Counterspell");
        assert!(state.take_from_hand(first).is_none());
    }

    #[test]
    fn test_battlefield_roundtrip() {
        let mut state = seeded();
        state.draw();
        let id = InstanceId::new(PlayerId::new(1), 0);
        let card = state.take_from_hand(id).unwrap();

        state.place(BattlefieldCard::new(card, PlayerId::new(1), Vec2::new(10.0, 20.0), 1));
        assert_eq!(state.battlefield().len(), 1);
        assert_eq!(state.card_count(), 2);

        let back = state.take_from_battlefield(id).unwrap();
        assert_eq!(back.position, Vec2::new(10.0, 20.0));
        assert!(state.battlefield().is_empty());
    }
}
