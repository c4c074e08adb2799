//! Core engine types: identifiers, players, session state, actions, RNG,
//! configuration.
//!
//! This module contains the data model for one game session. The dispatcher
//! in `rules` is the only code that changes it.

pub mod action;
pub mod config;
pub mod entity;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{ActionOrigin, ActionRecord, GameAction};
pub use config::{ConfigError, PhaseId, TableConfig};
pub use entity::{InstanceId, SessionId};
pub use player::{PlayerId, PlayerState};
pub use rng::GameRng;
pub use state::{Session, SessionStatus, DEFAULT_HISTORY_LIMIT};
