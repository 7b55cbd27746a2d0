//! The Chunk type - a unit of input written to a relay.

use bytes::Bytes;
use std::fmt;

/// A chunk of input: raw bytes or text.
///
/// Text is normalized to its UTF-8 bytes when it enters a relay, both before
/// and after the transform runs.
///
/// # Example
///
/// ```
/// use bufrelay::Chunk;
/// use bytes::Bytes;
///
/// let text = Chunk::from("hello");
/// let raw = Chunk::from(Bytes::from_static(b"hello"));
///
/// assert_eq!(text.into_bytes(), raw.into_bytes());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    /// Raw bytes.
    Bytes(Bytes),

    /// Text, stored as UTF-8.
    Text(String),
}

impl Chunk {
    /// Returns the length of the chunk in bytes.
    pub fn len(&self) -> usize {
        match self {
            Chunk::Bytes(b) => b.len(),
            Chunk::Text(s) => s.len(),
        }
    }

    /// Returns true if the chunk has no data.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if this chunk is text.
    pub fn is_text(&self) -> bool {
        matches!(self, Chunk::Text(_))
    }

    /// Returns the chunk contents as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Chunk::Bytes(b) => b,
            Chunk::Text(s) => s.as_bytes(),
        }
    }

    /// Consumes the chunk and returns its bytes.
    ///
    /// Text is converted without copying.
    pub fn into_bytes(self) -> Bytes {
        match self {
            Chunk::Bytes(b) => b,
            Chunk::Text(s) => Bytes::from(s),
        }
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Chunk::Bytes(Bytes::new())
    }
}

impl From<Bytes> for Chunk {
    fn from(data: Bytes) -> Self {
        Chunk::Bytes(data)
    }
}

impl From<Vec<u8>> for Chunk {
    fn from(data: Vec<u8>) -> Self {
        Chunk::Bytes(Bytes::from(data))
    }
}

impl From<&[u8]> for Chunk {
    fn from(data: &[u8]) -> Self {
        Chunk::Bytes(Bytes::copy_from_slice(data))
    }
}

impl<const N: usize> From<&[u8; N]> for Chunk {
    fn from(data: &[u8; N]) -> Self {
        Chunk::Bytes(Bytes::copy_from_slice(data))
    }
}

impl From<String> for Chunk {
    fn from(text: String) -> Self {
        Chunk::Text(text)
    }
}

impl From<&str> for Chunk {
    fn from(text: &str) -> Self {
        Chunk::Text(text.to_owned())
    }
}

impl From<Chunk> for Bytes {
    fn from(chunk: Chunk) -> Self {
        chunk.into_bytes()
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chunk::Bytes(b) => write!(f, "Chunk({} bytes)", b.len()),
            Chunk::Text(s) => write!(f, "Chunk({} bytes, text)", s.len()),
        }
    }
}
