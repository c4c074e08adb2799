//! Card-definition provider.
//!
//! Static display data is owned outside the engine. `CardProvider` is the
//! lookup seam; `CardRegistry` is the in-memory implementation used by
//! tests, demos, and hosts that preload their card pool.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardKey};

/// Supplies card definitions by key.
pub trait CardProvider {
    /// Look up a definition. `None` if the provider doesn't know the key.
    fn definition(&self, key: &CardKey) -> Option<&CardDefinition>;
}

/// In-memory registry of card definitions.
///
/// ## Example
///
/// ```
/// use ccg_table::cards::{CardDefinition, CardKey, CardProvider, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::new(CardKey::new("lea-161"), "Lightning Bolt"));
///
/// let found = registry.definition(&CardKey::new("lea-161")).unwrap();
/// assert_eq!(found.name, "Lightning Bolt");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardKey, CardDefinition>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition, replacing any previous one with the same key.
    ///
    /// Returns the replaced definition.
    pub fn register(&mut self, card: CardDefinition) -> Option<CardDefinition> {
        self.cards.insert(card.key.clone(), card)
    }

    /// Check if a key is registered.
    #[must_use]
    pub fn contains(&self, key: &CardKey) -> bool {
        self.cards.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }
}

impl CardProvider for CardRegistry {
    fn definition(&self, key: &CardKey) -> Option<&CardDefinition> {
        self.cards.get(key)
    }
}

impl FromIterator<CardDefinition> for CardRegistry {
    fn from_iter<I: IntoIterator<Item = CardDefinition>>(iter: I) -> Self {
        let mut registry = Self::new();
        for card in iter {
            registry.register(card);
        }
        registry
    }
}
