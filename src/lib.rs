//! bufrelay
//!
//! A buffering relay for byte and text chunks.
//!
//! `bufrelay` accumulates written chunks into one owned buffer, optionally
//! transforms each chunk on the way in, and notifies listeners at defined
//! points:
//!
//! - `data` - each transformed write, or a flush of buffered content
//! - `end` - the read side is finished
//! - `complete` - `end` was called; carries the whole buffer as text
//!
//! The crate intentionally:
//! - does NOT perform I/O of its own
//! - does NOT manage concurrency (listeners run synchronously, in order)
//! - does NOT fan out to multiple consumers
//! - does NOT apply backpressure beyond an advisory pause flag
//!
//! # Sync
//!
//! ```
//! use bufrelay::{BufferedRelay, RelayConfig};
//! use bytes::Bytes;
//!
//! let mut relay = BufferedRelay::new(
//!     RelayConfig::new().with_transform(|c: Bytes| [&c[..], &c[..]].concat()),
//! );
//!
//! relay.on_data(|chunk| println!("data: {} bytes", chunk.len()));
//! relay.on_complete(|text| println!("complete: {text}"));
//!
//! relay.write("a").write(b"b").end();
//! assert_eq!(relay.body(), Bytes::from_static(b"aabb"));
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use bufrelay::BufferedRelay;
//! use futures_util::io::AsyncWriteExt;
//!
//! async fn demo() -> std::io::Result<()> {
//!     let mut relay = BufferedRelay::default();
//!     relay.write_all(b"streamed").await?;
//!     relay.close().await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunk;
mod config;
mod error;
mod event;
mod relay;

mod buffer; // internal accumulator

//
// Public surface (intentionally tiny)
//

pub use chunk::Chunk;
pub use config::RelayConfig;
pub use error::{BoxError, RelayError};
pub use event::{Event, EventKind, ListenerId};
pub use relay::BufferedRelay;
