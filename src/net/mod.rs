//! Network synchronization bridge.
//!
//! ## Key Types
//!
//! - `RemoteEvent`: compact action notification (type + payload)
//! - `Envelope`: routing header + event, bincode-encoded into a `Frame`
//! - `Transport` / `Connection`: per-session channel abstraction
//! - `LoopbackHub`: in-process transport
//! - `SyncBridge`: relays a facade's local actions and replays remote ones
//!
//! Replicas converge eventually: there is no global order, and concurrent
//! edits to the same card resolve to whichever arrives last on each replica.

pub mod bridge;
pub mod codec;
pub mod event;
pub mod transport;

pub use bridge::{BridgeStats, ConnectionState, SyncBridge};
pub use codec::{Envelope, Frame, NetError};
pub use event::RemoteEvent;
pub use transport::{Connection, LoopbackHub, Transport, TransportEvent};
