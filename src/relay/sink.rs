//! `std::io::Write` support.
//!
//! Every `write` call is relayed as one chunk, so a relay can sit at the end
//! of [`std::io::copy`] or behind any writer adapter.

use std::io;

use super::BufferedRelay;

impl io::Write for BufferedRelay {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.try_write(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use bytes::Bytes;

    use crate::{BufferedRelay, RelayConfig};

    #[test]
    fn test_write_all() {
        let mut relay = BufferedRelay::default();
        Write::write_all(&mut relay, b"hello world").unwrap();
        assert_eq!(relay.body(), Bytes::from_static(b"hello world"));
    }

    #[test]
    fn test_write_fmt() {
        let mut relay = BufferedRelay::default();
        write!(relay, "{}-{}", 1, 2).unwrap();
        assert_eq!(relay.text(), "1-2");
    }

    #[test]
    fn test_io_copy() {
        let data: Vec<u8> = (0..10_000).map(|i| (i % 251) as u8).collect();
        let mut relay = BufferedRelay::default();
        let copied = std::io::copy(&mut Cursor::new(&data), &mut relay).unwrap();
        assert_eq!(copied, data.len() as u64);
        assert_eq!(relay.body(), Bytes::from(data));
    }

    #[test]
    fn test_rejection_is_invalid_data() {
        let mut relay = BufferedRelay::new(
            RelayConfig::new().with_try_transform(|_: Bytes| Err::<Bytes, _>("rejected".into())),
        );
        let err = Write::write(&mut relay, b"x").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
        assert!(relay.last_error().is_none());
    }
}
