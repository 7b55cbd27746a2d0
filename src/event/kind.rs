//! Event payloads and their kinds.

use bytes::Bytes;
use std::fmt;

/// A notification emitted by a relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A chunk of bytes: a transformed write, or a flush from `out`,
    /// `resume` or `ok`.
    Data(Bytes),

    /// The read side considers the stream finished.
    End,

    /// `end` was called; carries the whole buffer decoded as text.
    Complete(String),
}

impl Event {
    /// Returns the kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Data(_) => EventKind::Data,
            Event::End => EventKind::End,
            Event::Complete(_) => EventKind::Complete,
        }
    }

    /// Returns the payload of a `Data` event.
    pub fn data(&self) -> Option<&Bytes> {
        match self {
            Event::Data(data) => Some(data),
            _ => None,
        }
    }

    /// Returns the payload of a `Complete` event.
    pub fn text(&self) -> Option<&str> {
        match self {
            Event::Complete(text) => Some(text),
            _ => None,
        }
    }
}

/// Event kinds listeners subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    /// See [`Event::Data`].
    Data,
    /// See [`Event::End`].
    End,
    /// See [`Event::Complete`].
    Complete,
}

impl EventKind {
    /// Returns the conventional name of the event.
    pub const fn as_str(&self) -> &'static str {
        match self {
            EventKind::Data => "data",
            EventKind::End => "end",
            EventKind::Complete => "complete",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert_eq!(Event::Data(Bytes::new()).kind(), EventKind::Data);
        assert_eq!(Event::End.kind(), EventKind::End);
        assert_eq!(Event::Complete(String::new()).kind(), EventKind::Complete);
    }

    #[test]
    fn test_payload_accessors() {
        let data = Event::Data(Bytes::from_static(b"ab"));
        assert_eq!(data.data(), Some(&Bytes::from_static(b"ab")));
        assert_eq!(data.text(), None);

        let complete = Event::Complete("abcd".into());
        assert_eq!(complete.text(), Some("abcd"));
        assert_eq!(complete.data(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(EventKind::Data.to_string(), "data");
        assert_eq!(EventKind::End.to_string(), "end");
        assert_eq!(EventKind::Complete.to_string(), "complete");
    }
}
