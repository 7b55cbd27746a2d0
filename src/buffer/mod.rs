//! Internal buffer management.
//!
//! This module provides the growable byte buffer a relay accumulates into.
//! It is an implementation detail and not part of the public API.

mod accumulator;

pub(crate) use accumulator::Accumulator;
