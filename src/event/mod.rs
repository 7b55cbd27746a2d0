//! Event surface of a relay.
//!
//! - [`Event`] - Notification payloads (`data`, `end`, `complete`)
//! - [`EventKind`] - Keys listeners subscribe to
//! - [`ListenerId`] - Handle for removing a listener

mod emitter;
mod kind;

pub(crate) use emitter::{Emitter, Handler};
pub use emitter::ListenerId;
pub use kind::{Event, EventKind};
