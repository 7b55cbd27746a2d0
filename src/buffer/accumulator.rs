//! Growable byte accumulator.

use bytes::{Bytes, BytesMut};

/// An append-only byte buffer that hands out cheap snapshots.
///
/// Snapshots are frozen copies; later appends never alter a snapshot
/// already handed out.
#[derive(Debug, Default, Clone)]
pub(crate) struct Accumulator {
    data: BytesMut,
}

impl Accumulator {
    /// Creates an empty accumulator with room for `capacity` bytes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            data: BytesMut::with_capacity(capacity),
        }
    }

    /// Appends bytes to the end of the buffer.
    pub(crate) fn append(&mut self, data: &[u8]) {
        self.data.extend_from_slice(data);
    }

    /// Returns a copy of the current contents.
    pub(crate) fn snapshot(&self) -> Bytes {
        Bytes::copy_from_slice(&self.data)
    }

    /// Removes and returns the current contents, leaving the buffer empty.
    pub(crate) fn take(&mut self) -> Bytes {
        self.data.split().freeze()
    }

    /// Drops the current contents.
    ///
    /// Capacity is kept for subsequent writes.
    pub(crate) fn clear(&mut self) {
        self.data.clear();
    }

    /// Returns the contents as a slice.
    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Consumes the accumulator and returns its contents.
    pub(crate) fn into_bytes(self) -> Bytes {
        self.data.freeze()
    }
}
