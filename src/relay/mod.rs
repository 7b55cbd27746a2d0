//! Buffering relay.
//!
//! - [`BufferedRelay`] - Accumulates chunks and notifies listeners
//!
//! The relay is also a `std::io::Write` sink, and a `futures_io::AsyncWrite`
//! sink with the `async-io` feature.

mod buffered;
mod sink;

#[cfg(feature = "async-io")]
mod async_sink;

pub use buffered::BufferedRelay;
