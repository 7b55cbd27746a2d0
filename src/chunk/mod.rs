//! Chunk types.
//!
//! - [`Chunk`] - Bytes-or-text input accepted by a relay

mod data;

pub use data::Chunk;
