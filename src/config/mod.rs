//! Configuration for relay behavior.
//!
//! - [`RelayConfig`] - Write/read gates, transform, and buffer sizing

use std::fmt;

use bytes::Bytes;

use crate::chunk::Chunk;
use crate::error::BoxError;

/// Default initial capacity of the main buffer (0 = allocate on first write).
pub const DEFAULT_CAPACITY: usize = 0;

/// Per-chunk transform applied before storage.
pub(crate) enum Transform {
    Identity,
    Infallible(Box<dyn FnMut(Bytes) -> Chunk>),
    Fallible(Box<dyn FnMut(Bytes) -> Result<Chunk, BoxError>>),
}

impl Transform {
    /// Runs the transform and normalizes the result to bytes.
    pub(crate) fn apply(&mut self, chunk: Bytes) -> Result<Bytes, BoxError> {
        match self {
            Transform::Identity => Ok(chunk),
            Transform::Infallible(f) => Ok(f(chunk).into_bytes()),
            Transform::Fallible(f) => f(chunk).map(Chunk::into_bytes),
        }
    }

    pub(crate) fn is_identity(&self) -> bool {
        matches!(self, Transform::Identity)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Identity => f.write_str("Identity"),
            Transform::Infallible(_) => f.write_str("Infallible(..)"),
            Transform::Fallible(_) => f.write_str("Fallible(..)"),
        }
    }
}

/// Configuration for a [`BufferedRelay`](crate::BufferedRelay).
///
/// Both gates default to `true` and the transform defaults to identity.
///
/// # Example
///
/// ```
/// use bufrelay::{BufferedRelay, RelayConfig};
/// use bytes::Bytes;
///
/// let config = RelayConfig::new()
///     .with_readable(false)
///     .with_transform(|c: Bytes| c.to_ascii_uppercase());
///
/// let mut relay = BufferedRelay::new(config);
/// relay.write("abc");
/// assert_eq!(relay.body(), Bytes::from_static(b"ABC"));
/// ```
#[derive(Debug)]
pub struct RelayConfig {
    writable: bool,
    readable: bool,
    capacity: usize,
    pub(crate) transform: Transform,
}

impl RelayConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether writes go to the main buffer (`true`) or the paused
    /// cache (`false`).
    pub fn with_writable(mut self, writable: bool) -> Self {
        self.writable = writable;
        self
    }

    /// Sets whether `data` and `end` events are emitted for writes and `end`.
    pub fn with_readable(mut self, readable: bool) -> Self {
        self.readable = readable;
        self
    }

    /// Sets the initial capacity of the main buffer.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the transform applied to every chunk before storage.
    ///
    /// The transform may return bytes or text; text is converted back to
    /// bytes.
    pub fn with_transform<F, C>(mut self, mut f: F) -> Self
    where
        F: FnMut(Bytes) -> C + 'static,
        C: Into<Chunk>,
    {
        self.transform = Transform::Infallible(Box::new(move |chunk| f(chunk).into()));
        self
    }

    /// Sets a transform that may reject chunks.
    ///
    /// A rejected chunk is never stored. [`BufferedRelay::try_write`](crate::BufferedRelay::try_write)
    /// reports the rejection; [`BufferedRelay::write`](crate::BufferedRelay::write)
    /// logs it and keeps it in [`last_error`](crate::BufferedRelay::last_error).
    pub fn with_try_transform<F, C>(mut self, mut f: F) -> Self
    where
        F: FnMut(Bytes) -> Result<C, BoxError> + 'static,
        C: Into<Chunk>,
    {
        self.transform = Transform::Fallible(Box::new(move |chunk| f(chunk).map(Into::into)));
        self
    }

    /// Returns whether writes go to the main buffer.
    pub fn writable(&self) -> bool {
        self.writable
    }

    /// Returns whether events are emitted for writes and `end`.
    pub fn readable(&self) -> bool {
        self.readable
    }

    /// Returns the initial capacity of the main buffer.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true if no transform has been set.
    pub fn has_identity_transform(&self) -> bool {
        self.transform.is_identity()
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            writable: true,
            readable: true,
            capacity: DEFAULT_CAPACITY,
            transform: Transform::Identity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_config_default() {
        let config = RelayConfig::default();
        assert!(config.writable());
        assert!(config.readable());
        assert_eq!(config.capacity(), 0);
        assert!(config.has_identity_transform());
    }

    #[test]
    fn test_relay_config_builder() {
        let config = RelayConfig::new()
            .with_writable(false)
            .with_readable(false)
            .with_capacity(1024);
        assert!(!config.writable());
        assert!(!config.readable());
        assert_eq!(config.capacity(), 1024);
    }

    #[test]
    fn test_transform_text_result_becomes_bytes() {
        let mut config = RelayConfig::new().with_transform(|c: Bytes| format!("<{}>", c.len()));
        assert!(!config.has_identity_transform());
        let out = config.transform.apply(Bytes::from_static(b"abc")).unwrap();
        assert_eq!(out, Bytes::from_static(b"<3>"));
    }

    #[test]
    fn test_identity_transform() {
        let mut t = Transform::Identity;
        let out = t.apply(Bytes::from_static(b"same")).unwrap();
        assert_eq!(out, Bytes::from_static(b"same"));
    }

    #[test]
    fn test_fallible_transform() {
        let mut config = RelayConfig::new().with_try_transform(|c: Bytes| {
            if c.is_empty() {
                Err("empty chunk".into())
            } else {
                Ok(c)
            }
        });
        assert!(config.transform.apply(Bytes::new()).is_err());
        assert!(config.transform.apply(Bytes::from_static(b"x")).is_ok());
    }

    #[test]
    fn test_debug_hides_closure() {
        let config = RelayConfig::new().with_transform(|c: Bytes| c);
        assert!(format!("{config:?}").contains("Infallible(..)"));
    }
}
