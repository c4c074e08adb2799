//! Local action facade: the presentation boundary.
//!
//! - `ActionFacade`: one participant's replica plus the calls a UI makes
//! - `TableChange`: snapshot notifications for subscribers
//! - `HoverPreview`: the delayed card-preview timer

pub mod hover;
pub mod local;

pub use hover::HoverPreview;
pub use local::{ActionFacade, ChangeCause, SuccessCallback, TableChange};
