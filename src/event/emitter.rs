//! Listener table keyed by event kind.
//!
//! The table only stores listeners. Dispatch lives on the relay, because a
//! [`Handler::Flush`] listener has to emit further events through the relay
//! that owns the table.

use std::collections::HashMap;

use super::{Event, EventKind};

/// Identifies a registered listener for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

pub(crate) type Callback = Box<dyn FnMut(&Event)>;

pub(crate) enum Handler {
    /// User callback.
    Callback(Callback),
    /// Emits `data` (full buffer) then `end` on the owning relay.
    Flush,
}

pub(crate) struct Listener {
    id: ListenerId,
    once: bool,
    pub(crate) handler: Handler,
}

impl Listener {
    pub(crate) fn is_once(&self) -> bool {
        self.once
    }
}

#[derive(Default)]
pub(crate) struct Emitter {
    table: HashMap<EventKind, Vec<Listener>>,
    next_id: u64,
}

impl Emitter {
    /// Appends a listener for `kind`. Listeners fire in registration order.
    pub(crate) fn add(&mut self, kind: EventKind, handler: Handler, once: bool) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.table.entry(kind).or_default().push(Listener { id, once, handler });
        id
    }

    /// Removes a user callback. Flush listeners are never removed.
    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        for listeners in self.table.values_mut() {
            if let Some(pos) = listeners
                .iter()
                .position(|l| l.id == id && matches!(l.handler, Handler::Callback(_)))
            {
                listeners.remove(pos);
                return true;
            }
        }
        false
    }

    pub(crate) fn count(&self, kind: EventKind) -> usize {
        self.table.get(&kind).map_or(0, Vec::len)
    }

    /// Detaches the listeners of `kind` for dispatch.
    pub(crate) fn take(&mut self, kind: EventKind) -> Vec<Listener> {
        self.table.remove(&kind).unwrap_or_default()
    }

    /// Reattaches listeners after dispatch, ahead of any added meanwhile.
    pub(crate) fn restore(&mut self, kind: EventKind, mut kept: Vec<Listener>) {
        let entry = self.table.entry(kind).or_default();
        kept.append(entry);
        *entry = kept;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn noop() -> Handler {
        Handler::Callback(Box::new(|_| {}))
    }

    #[test]
    fn test_add_and_count() {
        let mut emitter = Emitter::default();
        emitter.add(EventKind::Data, noop(), false);
        emitter.add(EventKind::Data, noop(), true);
        emitter.add(EventKind::End, noop(), false);

        assert_eq!(emitter.count(EventKind::Data), 2);
        assert_eq!(emitter.count(EventKind::End), 1);
        assert_eq!(emitter.count(EventKind::Complete), 0);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut emitter = Emitter::default();
        let a = emitter.add(EventKind::Data, noop(), false);
        let b = emitter.add(EventKind::End, noop(), false);
        assert_ne!(a, b);
    }

    #[test]
    fn test_remove() {
        let mut emitter = Emitter::default();
        let id = emitter.add(EventKind::End, noop(), false);
        assert!(emitter.remove(id));
        assert!(!emitter.remove(id));
        assert_eq!(emitter.count(EventKind::End), 0);
    }

    #[test]
    fn test_flush_cannot_be_removed() {
        let mut emitter = Emitter::default();
        let id = emitter.add(EventKind::Complete, Handler::Flush, true);
        assert!(!emitter.remove(id));
        assert_eq!(emitter.count(EventKind::Complete), 1);
    }

    #[test]
    fn test_take_and_restore_keeps_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut emitter = Emitter::default();
        for n in 0..3 {
            let seen = Rc::clone(&seen);
            emitter.add(
                EventKind::End,
                Handler::Callback(Box::new(move |_| seen.borrow_mut().push(n))),
                false,
            );
        }

        let kept = emitter.take(EventKind::End);
        assert_eq!(emitter.count(EventKind::End), 0);

        let late = Rc::clone(&seen);
        emitter.add(
            EventKind::End,
            Handler::Callback(Box::new(move |_| late.borrow_mut().push(99))),
            false,
        );
        emitter.restore(EventKind::End, kept);

        for listener in emitter.take(EventKind::End) {
            if let Handler::Callback(mut f) = listener.handler {
                f(&Event::End);
            }
        }
        assert_eq!(*seen.borrow(), vec![0, 1, 2, 99]);
    }
}
