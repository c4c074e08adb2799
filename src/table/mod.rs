//! Session ownership.
//!
//! - `Table`: one local participant's facade and bridge for one session
//! - `TableManager`: explicit `SessionId → Table` map; open, look up, close

pub mod manager;
pub mod seat;

pub use manager::TableManager;
pub use seat::{Table, TableError};
