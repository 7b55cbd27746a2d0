//! The relay itself.
//!
//! [`BufferedRelay`] accumulates chunks into one owned buffer and notifies
//! listeners synchronously. Every emission happens inside the call that
//! triggers it; there are no suspension points.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use bufrelay::BufferedRelay;
//!
//! let completed = Rc::new(RefCell::new(String::new()));
//! let sink = Rc::clone(&completed);
//!
//! let mut relay = BufferedRelay::default();
//! relay.on_complete(move |text| sink.borrow_mut().push_str(text));
//! relay.write("ab").write("cd").end();
//!
//! assert_eq!(*completed.borrow(), "abcd");
//! ```

use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;
use tracing::{debug, trace, warn};

use crate::buffer::Accumulator;
use crate::chunk::Chunk;
use crate::config::{RelayConfig, Transform};
use crate::error::RelayError;
use crate::event::{Emitter, Event, EventKind, Handler, ListenerId};

/// A buffering relay for byte and text chunks.
///
/// Writes land in the main buffer while the relay is writable and in the
/// paused cache otherwise. Each write goes to exactly one of the two.
///
/// `pause` only sets an advisory flag. It does not redirect writes; use
/// [`set_writable(false)`](Self::set_writable) for that.
pub struct BufferedRelay {
    writable: bool,
    readable: bool,
    paused: bool,
    ended: bool,
    buffer: Accumulator,
    paused_cache: Accumulator,
    transform: Transform,
    emitter: Emitter,
    last_error: Option<RelayError>,
}

impl BufferedRelay {
    /// Creates a relay with the given configuration.
    pub fn new(config: RelayConfig) -> Self {
        Self {
            writable: config.writable(),
            readable: config.readable(),
            paused: false,
            ended: false,
            buffer: Accumulator::with_capacity(config.capacity()),
            paused_cache: Accumulator::default(),
            transform: config.transform,
            emitter: Emitter::default(),
            last_error: None,
        }
    }

    /// Writes a chunk.
    ///
    /// The chunk is transformed, then appended to the main buffer (emitting
    /// `data` when readable) or to the paused cache when not writable.
    ///
    /// Writing never fails with the default or an infallible transform. If a
    /// fallible transform rejects the chunk, the chunk is dropped and the
    /// error is kept in [`last_error`](Self::last_error).
    pub fn write(&mut self, chunk: impl Into<Chunk>) -> &mut Self {
        if let Err(err) = self.push(chunk.into()) {
            warn!(error = %err, "dropping chunk rejected by transform");
            self.last_error = Some(err);
        }
        self
    }

    /// Writes a chunk, reporting transform rejections.
    pub fn try_write(&mut self, chunk: impl Into<Chunk>) -> Result<&mut Self, RelayError> {
        self.push(chunk.into())?;
        Ok(self)
    }

    fn push(&mut self, chunk: Chunk) -> Result<(), RelayError> {
        let chunk = chunk.into_bytes();
        let len = chunk.len();
        let chunk = self
            .transform
            .apply(chunk)
            .map_err(|source| RelayError::Transform { len, source })?;

        if self.writable {
            self.buffer.append(&chunk);
            trace!(len = chunk.len(), total = self.buffer.len(), "chunk buffered");
            if self.readable {
                self.emit(Event::Data(chunk));
            }
        } else {
            self.paused_cache.append(&chunk);
            trace!(
                len = chunk.len(),
                cached = self.paused_cache.len(),
                "chunk cached while not writable"
            );
        }
        Ok(())
    }

    /// Ends the relay.
    ///
    /// Emits `complete` with the whole buffer decoded as text (invalid
    /// UTF-8 is replaced), marks the relay ended, then emits `end` when
    /// readable.
    pub fn end(&mut self) -> &mut Self {
        let text = self.text().into_owned();
        debug!(len = self.buffer.len(), "relay ended");
        self.emit(Event::Complete(text));
        self.ended = true;
        if self.readable {
            self.emit(Event::End);
        }
        self
    }

    /// Writes a final chunk, then ends the relay.
    ///
    /// An empty text chunk is not written.
    pub fn end_with(&mut self, chunk: impl Into<Chunk>) -> &mut Self {
        let chunk = chunk.into();
        if !(chunk.is_text() && chunk.is_empty()) {
            self.write(chunk);
        }
        self.end()
    }

    /// Writes a final chunk, then ends the relay.
    ///
    /// If the transform rejects the chunk the relay is not ended.
    pub fn try_end_with(&mut self, chunk: impl Into<Chunk>) -> Result<&mut Self, RelayError> {
        let chunk = chunk.into();
        if !(chunk.is_text() && chunk.is_empty()) {
            self.push(chunk)?;
        }
        Ok(self.end())
    }

    /// Flushes the buffer destructively.
    ///
    /// The relay is reset with [`empty`](Self::empty) before `data` (with
    /// the previous contents) and `end` are emitted. The ended flag is kept.
    pub fn out(&mut self) -> &mut Self {
        let data = self.buffer.take();
        trace!(len = data.len(), "flushing buffer");
        self.empty();
        self.emit(Event::Data(data));
        self.emit(Event::End);
        self
    }

    /// Returns a copy of the accumulated buffer.
    pub fn body(&self) -> Bytes {
        self.buffer.snapshot()
    }

    /// Returns the accumulated buffer decoded as text.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.buffer.as_slice())
    }

    /// Consumes the relay and returns the accumulated buffer.
    pub fn into_body(self) -> Bytes {
        self.buffer.into_bytes()
    }

    /// Clears both buffers and the pause flag.
    ///
    /// `writable` and `readable` are forced to `true`, even if the relay
    /// was configured with either set to `false`. The ended flag and all
    /// listeners are kept.
    pub fn empty(&mut self) -> &mut Self {
        self.buffer.clear();
        self.paused_cache.clear();
        self.writable = true;
        self.readable = true;
        self.paused = false;
        debug!("relay emptied");
        self
    }

    /// Same as [`empty`](Self::empty).
    pub fn destroy(&mut self) -> &mut Self {
        self.empty()
    }

    /// Sets the advisory pause flag.
    pub fn pause(&mut self) -> &mut Self {
        self.paused = true;
        debug!("relay paused");
        self
    }

    /// Emits the paused cache as `data` and clears it.
    ///
    /// Emits `end` as well if the relay has ended. The pause flag is left
    /// as is.
    pub fn resume(&mut self) -> &mut Self {
        let cached = self.paused_cache.take();
        trace!(len = cached.len(), "releasing paused cache");
        self.emit(Event::Data(cached));
        if self.ended {
            self.emit(Event::End);
        }
        self
    }

    /// Emits the whole buffer as `data` followed by `end`.
    ///
    /// If the relay has already ended this happens immediately. Otherwise
    /// it happens once, when `complete` next fires. A deferred call cannot
    /// be cancelled.
    pub fn ok(&mut self) -> &mut Self {
        if self.ended {
            self.flush_body();
        } else {
            self.emitter.add(EventKind::Complete, Handler::Flush, true);
            debug!("flush deferred until complete");
        }
        self
    }

    /// Registers a listener for every event of `kind`.
    pub fn on(&mut self, kind: EventKind, f: impl FnMut(&Event) + 'static) -> ListenerId {
        self.emitter.add(kind, Handler::Callback(Box::new(f)), false)
    }

    /// Registers a listener for the next event of `kind` only.
    pub fn once(&mut self, kind: EventKind, f: impl FnMut(&Event) + 'static) -> ListenerId {
        self.emitter.add(kind, Handler::Callback(Box::new(f)), true)
    }

    /// Removes a listener. Returns false if it was already gone.
    pub fn off(&mut self, id: ListenerId) -> bool {
        self.emitter.remove(id)
    }

    /// Registers a listener for `data` payloads.
    pub fn on_data(&mut self, mut f: impl FnMut(&Bytes) + 'static) -> ListenerId {
        self.on(EventKind::Data, move |event| {
            if let Event::Data(data) = event {
                f(data);
            }
        })
    }

    /// Registers a listener for `end`.
    pub fn on_end(&mut self, mut f: impl FnMut() + 'static) -> ListenerId {
        self.on(EventKind::End, move |_| f())
    }

    /// Registers a listener for the `complete` text.
    pub fn on_complete(&mut self, mut f: impl FnMut(&str) + 'static) -> ListenerId {
        self.on(EventKind::Complete, move |event| {
            if let Event::Complete(text) = event {
                f(text);
            }
        })
    }

    /// Returns the number of listeners registered for `kind`, including a
    /// pending deferred flush.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.emitter.count(kind)
    }

    /// Sets whether writes go to the main buffer.
    pub fn set_writable(&mut self, writable: bool) -> &mut Self {
        self.writable = writable;
        self
    }

    /// Sets whether writes and `end` emit events.
    pub fn set_readable(&mut self, readable: bool) -> &mut Self {
        self.readable = readable;
        self
    }

    /// Returns whether writes go to the main buffer.
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Returns whether writes and `end` emit events.
    pub fn is_readable(&self) -> bool {
        self.readable
    }

    /// Returns the advisory pause flag.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns true once `end` has been called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Returns a copy of the chunks cached while not writable.
    pub fn paused_cache(&self) -> Bytes {
        self.paused_cache.snapshot()
    }

    /// Returns the length of the main buffer.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if the main buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the most recent transform rejection seen by [`write`](Self::write).
    pub fn last_error(&self) -> Option<&RelayError> {
        self.last_error.as_ref()
    }

    /// Takes the most recent transform rejection, clearing it.
    pub fn take_last_error(&mut self) -> Option<RelayError> {
        self.last_error.take()
    }

    fn flush_body(&mut self) {
        let body = self.body();
        self.emit(Event::Data(body));
        self.emit(Event::End);
    }

    fn emit(&mut self, event: Event) {
        let kind = event.kind();
        let listeners = self.emitter.take(kind);
        let mut kept = Vec::with_capacity(listeners.len());

        for mut listener in listeners {
            match &mut listener.handler {
                Handler::Callback(f) => f(&event),
                Handler::Flush => self.flush_body(),
            }
            if !listener.is_once() {
                kept.push(listener);
            }
        }

        self.emitter.restore(kind, kept);
    }
}

impl Default for BufferedRelay {
    fn default() -> Self {
        Self::new(RelayConfig::default())
    }
}

impl fmt::Debug for BufferedRelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferedRelay")
            .field("writable", &self.writable)
            .field("readable", &self.readable)
            .field("paused", &self.paused)
            .field("ended", &self.ended)
            .field("len", &self.buffer.len())
            .field("cached", &self.paused_cache.len())
            .field("transform", &self.transform)
            .finish_non_exhaustive()
    }
}
