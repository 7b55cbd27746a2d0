//! Error types for bufrelay.

use std::io;

/// Error type returned by fallible transforms.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while relaying chunks.
///
/// Plain writes never fail; errors only come from a transform installed
/// with [`RelayConfig::with_try_transform`](crate::RelayConfig::with_try_transform).
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The transform rejected a chunk. The chunk was not stored.
    #[error("transform rejected chunk of {len} bytes: {source}")]
    Transform {
        /// Length of the rejected input chunk.
        len: usize,
        /// The error returned by the transform.
        #[source]
        source: BoxError,
    },
}

impl From<RelayError> for io::Error {
    fn from(e: RelayError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, e)
    }
}
