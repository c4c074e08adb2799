//! Action dispatcher.
//!
//! A pure state machine over session snapshots:
//! - `dispatch`: validate and apply one `GameAction`
//! - `reclamp`, `set_connection`, `install_player`, `end_session`:
//!   replica-local transitions that are never broadcast
//!
//! The dispatcher never panics and never mutates its input; rejected
//! actions come back as typed `ActionError`s with the state unchanged.

pub mod engine;
pub mod error;

pub use engine::{dispatch, end_session, install_player, reclamp, set_connection, Dispatch};
pub use error::{ActionError, ActionOutcome, ActionResult};
