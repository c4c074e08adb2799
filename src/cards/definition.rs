//! Card definitions - static card data.
//!
//! `CardDefinition` holds the display data of a card type: name, mana cost,
//! type line, image references, oracle text. It is owned by an external
//! card-definition provider; the engine copies it onto each instance and
//! never fetches it itself.
//!
//! Instance-specific data (position, tapped, zone) lives in `CardInstance`
//! and `BattlefieldCard`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Provider key for a card definition.
///
/// This identifies the "type" of card (e.g., "Lightning Bolt"),
/// not a specific copy in a game.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardKey(pub String);

impl CardKey {
    /// Create a new card key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use ccg_table::cards::{CardDefinition, CardKey};
///
/// let bolt = CardDefinition::new(CardKey::new("lea-161"), "Lightning Bolt")
///     .with_mana_cost("{R}")
///     .with_type_line("Instant")
///     .with_image("https://img.example/lea-161.jpg");
///
/// assert_eq!(bolt.mana_cost.as_deref(), Some("{R}"));
/// assert_eq!(bolt.images.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Provider key.
    pub key: CardKey,

    /// Card name (for display/debugging).
    pub name: String,

    pub mana_cost: Option<String>,

    pub type_line: Option<String>,

    /// Image references (front face first). Most cards have one or two.
    #[serde(default)]
    pub images: SmallVec<[String; 2]>,

    pub oracle_text: Option<String>,
}

impl CardDefinition {
    /// Create a definition with only a key and name.
    #[must_use]
    pub fn new(key: CardKey, name: impl Into<String>) -> Self {
        Self {
            key,
            name: name.into(),
            mana_cost: None,
            type_line: None,
            images: SmallVec::new(),
            oracle_text: None,
        }
    }

    /// Set the mana cost (builder pattern).
    #[must_use]
    pub fn with_mana_cost(mut self, cost: impl Into<String>) -> Self {
        self.mana_cost = Some(cost.into());
        self
    }

    /// Set the type line (builder pattern).
    #[must_use]
    pub fn with_type_line(mut self, type_line: impl Into<String>) -> Self {
        self.type_line = Some(type_line.into());
        self
    }

    /// Add an image reference (builder pattern).
    #[must_use]
    pub fn with_image(mut self, uri: impl Into<String>) -> Self {
        self.images.push(uri.into());
        self
    }

    /// Set the oracle text (builder pattern).
    #[must_use]
    pub fn with_oracle_text(mut self, text: impl Into<String>) -> Self {
        self.oracle_text = Some(text.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_key() {
        let key = CardKey::new("lea-161");
        assert_eq!(key.as_str(), "lea-161");
        assert_eq!(format!("{}", key), "lea-161");
    }

    #[test]
    fn test_card_definition_builder() {
        let card = CardDefinition::new(CardKey::new("lea-55"), "Counterspell")
            .with_mana_cost("{U}{U}")
            .with_type_line("Instant")
            .with_oracle_text("Counter target spell.");

        assert_eq!(card.name, "Counterspell");
        assert_eq!(card.type_line.as_deref(), Some("Instant"));
        assert_eq!(card.oracle_text.as_deref(), Some("Counter target spell."));
        assert!(card.images.is_empty());
    }

    #[test]
    fn test_card_definition_serialization() {
        let card = CardDefinition::new(CardKey::new("lea-161"), "Lightning Bolt")
            .with_image("front.jpg")
            .with_image("back.jpg");

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: CardDefinition = serde_json::from_str(&json).unwrap();

        assert_eq!(card, deserialized);
    }
}
