//! `futures_io::AsyncWrite` support.
//!
//! The relay never blocks, so every poll completes immediately. This makes
//! it usable with tokio, async-std, smol, or any futures-compatible
//! runtime.
//!
//! # Example
//!
//! ```ignore
//! use bufrelay::BufferedRelay;
//! use futures_util::io::AsyncWriteExt;
//!
//! async fn demo() -> std::io::Result<()> {
//!     let mut relay = BufferedRelay::default();
//!     relay.write_all(b"hello").await?;
//!     relay.close().await?;
//!     assert!(relay.is_ended());
//!     Ok(())
//! }
//! ```

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_io::AsyncWrite;

use super::BufferedRelay;

impl AsyncWrite for BufferedRelay {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let relay = self.get_mut();
        Poll::Ready(relay.try_write(buf).map(|_| buf.len()).map_err(Into::into))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    /// Ends the relay. Closing an already ended relay does nothing.
    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        let relay = self.get_mut();
        if !relay.is_ended() {
            relay.end();
        }
        Poll::Ready(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use futures_util::io::AsyncWriteExt;

    use crate::{BufferedRelay, RelayConfig};

    #[test]
    fn test_poll_write_buffers() {
        let mut relay = BufferedRelay::default();
        tokio_test::block_on(async {
            relay.write_all(b"ab").await.unwrap();
            relay.write_all(b"cd").await.unwrap();
            relay.flush().await.unwrap();
        });
        assert_eq!(relay.body(), Bytes::from_static(b"abcd"));
        assert!(!relay.is_ended());
    }

    #[test]
    fn test_close_ends_once() {
        let mut relay = BufferedRelay::default();
        let completes = std::rc::Rc::new(std::cell::Cell::new(0));
        let counter = std::rc::Rc::clone(&completes);
        relay.on_complete(move |_| counter.set(counter.get() + 1));

        tokio_test::block_on(async {
            relay.close().await.unwrap();
            relay.close().await.unwrap();
        });

        assert!(relay.is_ended());
        assert_eq!(completes.get(), 1);
    }

    #[test]
    fn test_rejection_is_io_error() {
        let mut relay = BufferedRelay::new(
            RelayConfig::new().with_try_transform(|_: Bytes| Err::<Bytes, _>("rejected".into())),
        );
        let err = tokio_test::block_on(relay.write_all(b"x")).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
