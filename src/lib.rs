//! # ccg-table
//!
//! A multiplayer card-table synchronization engine: two or more participants
//! share one evolving board, each holding a full replica of the session.
//!
//! ## Design Principles
//!
//! 1. **Actions, not state, travel**: Every change is a small `GameAction`.
//!    The same dispatcher applies it locally and replays it on every peer.
//!
//! 2. **Snapshots are immutable**: `dispatch` never mutates its input. Each
//!    applied action yields a new `Session` sharing structure with the last
//!    via `im-rs`, so clones are O(1) and readers never see partial updates.
//!
//! 3. **Each participant owns its zones**: Local actions on another player's
//!    cards are refused; remote replays are trusted. Late joiners learn the
//!    table from per-player snapshots.
//!
//! ## Architecture
//!
//! - **Replica-local geometry**: Footprints and bounds depend on each
//!   participant's viewport. Positions are clamped on every write and
//!   reclamped on resize, so peers with different screens may disagree on
//!   exact positions near the edges.
//!
//! - **Eventual consistency**: No global order. Each replica applies events
//!   in arrival order; concurrent edits of one card resolve to the last
//!   applied.
//!
//! ## Modules
//!
//! - `core`: IDs, players, session state, actions, RNG, configuration
//! - `cards`: Definitions, instances, providers, deck seeding
//! - `zones`: Zone lookup and exclusivity checks
//! - `rules`: The action dispatcher
//! - `spatial`: Footprints, bounds, clamping
//! - `selection`: Rectangle selection and batch actions
//! - `facade`: Local action entry point and change notifications
//! - `net`: Wire events, codec, transports, sync bridge
//! - `table`: Session ownership

pub mod core;
pub mod cards;
pub mod zones;
pub mod rules;
pub mod spatial;
pub mod selection;
pub mod facade;
pub mod net;
pub mod table;

// Re-export commonly used types
pub use crate::core::{
    ActionOrigin, ActionRecord, GameAction,
    ConfigError, PhaseId, TableConfig,
    InstanceId, SessionId,
    PlayerId, PlayerState,
    GameRng,
    Session, SessionStatus,
};

pub use crate::cards::{
    BattlefieldCard, CardDefinition, CardInstance, CardKey,
    CardProvider, CardRegistry,
    DeckError, DeckList, DeckLoader, seed_library,
};

pub use crate::zones::{Zone, ZoneIndex, ZoneLocation};

pub use crate::rules::{dispatch, ActionError, ActionOutcome, ActionResult, Dispatch};

pub use crate::spatial::{BoardLayout, Bounds, Clamped, Footprint, FootprintTable, Position, Viewport};

pub use crate::selection::{GestureOutcome, PointerTarget, Rect, SelectionEngine};

pub use crate::facade::{ActionFacade, ChangeCause, HoverPreview, TableChange};

pub use crate::net::{
    BridgeStats, ConnectionState, Envelope, LoopbackHub, NetError,
    RemoteEvent, SyncBridge, Transport,
};

pub use crate::table::{Table, TableError, TableManager};
