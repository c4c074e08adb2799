//! Card system: definitions, instances, providers and deck seeding.
//!
//! ## Key Types
//!
//! - `CardKey`: Provider key for card definitions
//! - `CardDefinition`: Static display data, copied onto instances
//! - `CardInstance`: One uniquely identified copy (library or hand)
//! - `BattlefieldCard`: An instance on the board with position and tapped state
//! - `CardProvider` / `CardRegistry`: Definition lookup
//! - `DeckList` / `DeckLoader`: Ordered definitions used to seed a library

pub mod deck;
pub mod definition;
pub mod instance;
pub mod registry;

pub use deck::{seed_library, DeckError, DeckList, DeckLoader};
pub use definition::{CardDefinition, CardKey};
pub use instance::{BattlefieldCard, CardInstance};
pub use registry::{CardProvider, CardRegistry};
