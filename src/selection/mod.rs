//! Rectangle selection and batch operations.
//!
//! - `SelectionEngine`: pointer gesture state machine and selected set
//! - `hit_test`: own battlefield cards under a rectangle
//! - `batch_*`: turn a selection into one action per card
//!
//! Selection is replica-local; only the actions it produces are dispatched
//! and broadcast.

pub mod batch;
pub mod engine;
pub mod rect;

pub use batch::{batch_move, batch_return, batch_tap, batch_tap_target, BatchActions};
pub use engine::{hit_test, GestureOutcome, PointerTarget, SelectionEngine};
pub use rect::Rect;
