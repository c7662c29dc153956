//! Ordered callback registry shared by the stores and the signal bus.
//!
//! Callers keep the set behind a lock, take a [`ListenerSet::snapshot`], drop
//! the lock, and only then invoke the callbacks. Callbacks can therefore
//! subscribe, unsubscribe, or mutate the owner without deadlocking.

use std::sync::Arc;

/// Handle returned by every registration; pass it back to deregister.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub(crate) struct ListenerSet<T: ?Sized> {
    next_id: u64,
    entries: Vec<(ListenerId, Arc<T>)>,
}

impl<T: ?Sized> ListenerSet<T> {
    pub(crate) fn new() -> Self {
        Self { next_id: 0, entries: Vec::new() }
    }

    pub(crate) fn insert(&mut self, listener: Arc<T>) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.entries.retain(|(_, listener)| keep(listener));
    }

    /// Registered listeners in registration order.
    pub(crate) fn snapshot(&self) -> Vec<Arc<T>> {
        self.entries.iter().map(|(_, listener)| Arc::clone(listener)).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: ?Sized> Default for ListenerSet<T> {
    fn default() -> Self {
        Self::new()
    }
}
