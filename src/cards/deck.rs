//! Deck lists and library seeding.
//!
//! A deck-loading collaborator supplies the ordered list of definitions a
//! player starts with. `seed_library` turns that list into card instances
//! with namespaced IDs, optionally shuffled.

use im::Vector;
use thiserror::Error;

use super::definition::{CardDefinition, CardKey};
use super::instance::CardInstance;
use super::registry::CardProvider;
use crate::core::entity::InstanceId;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;

/// Errors raised while building a deck list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    /// The provider has no definition for a key in the list.
    #[error("unknown card {0}")]
    UnknownCard(CardKey),
}

/// Ordered card definitions; front = top of the library when unshuffled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeckList {
    cards: Vec<CardDefinition>,
}

impl DeckList {
    #[must_use]
    pub fn new(cards: Vec<CardDefinition>) -> Self {
        Self { cards }
    }

    /// Resolve keys through a provider, preserving order.
    pub fn from_keys<'a, P, I>(provider: &P, keys: I) -> Result<Self, DeckError>
    where
        P: CardProvider + ?Sized,
        I: IntoIterator<Item = &'a CardKey>,
    {
        let cards = keys
            .into_iter()
            .map(|key| {
                provider
                    .definition(key)
                    .cloned()
                    .ok_or_else(|| DeckError::UnknownCard(key.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { cards })
    }

    #[must_use]
    pub fn cards(&self) -> &[CardDefinition] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Supplies a player's deck at session start.
///
/// How decks are stored or chosen is the implementor's concern.
pub trait DeckLoader {
    fn load_deck(&self, player: PlayerId) -> Result<DeckList, DeckError>;
}

/// Mint instances for a player's library.
///
/// Serials follow deck order, so IDs are stable across shuffles: the same
/// deck always yields the same set of IDs.
#[must_use]
pub fn seed_library(player: PlayerId, deck: &DeckList, rng: Option<&mut GameRng>) -> Vector<CardInstance> {
    let mut cards: Vec<CardInstance> = deck
        .cards
        .iter()
        .zip(0u32..)
        .map(|(card, serial)| CardInstance::new(InstanceId::new(player, serial), card.clone()))
        .collect();

    if let Some(rng) = rng {
        rng.shuffle(&mut cards);
    }

    cards.into_iter().collect()
}
