//! In-process signal bus for cross-component requests.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components deep in the tree (the navigation listener in particular) cannot
//! reach the root's logout routine directly. They emit a named event here and
//! whoever owns the routine registers a handler for it.
//!
//! DESIGN
//! ======
//! The bus is an explicit value shared by `Arc`, not an ambient global.
//! Delivery is synchronous and follows registration order. Handlers run
//! against a snapshot taken at emit time, so a handler may register,
//! deregister, or emit again without deadlocking.

#[cfg(test)]
#[path = "event_bus_test.rs"]
mod event_bus_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::listeners::{ListenerId, ListenerSet};

/// Event requesting that the current session be dropped.
pub const LOGOUT_EVENT: &str = "logout";

type Handler<P> = dyn Fn(&P) + Send + Sync;

struct Registration<P> {
    event: String,
    handler: Box<Handler<P>>,
}

/// Typed publish/subscribe channel keyed by event name.
pub struct EventBus<P> {
    registrations: Mutex<ListenerSet<Registration<P>>>,
}

impl<P> EventBus<P> {
    #[must_use]
    pub fn new() -> Self {
        Self { registrations: Mutex::new(ListenerSet::new()) }
    }

    fn lock(&self) -> MutexGuard<'_, ListenerSet<Registration<P>>> {
        self.registrations.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `handler` for `event`. Every call adds an independent
    /// registration; registering the same closure twice makes it fire twice.
    pub fn on<F>(&self, event: &str, handler: F) -> ListenerId
    where
        F: Fn(&P) + Send + Sync + 'static,
    {
        self.lock().insert(Arc::new(Registration {
            event: event.to_owned(),
            handler: Box::new(handler),
        }))
    }

    /// Invoke every handler registered for `event`, in registration order.
    /// Returns how many handlers ran; zero is not an error.
    pub fn emit(&self, event: &str, payload: &P) -> usize {
        let targets: Vec<_> = self
            .lock()
            .snapshot()
            .into_iter()
            .filter(|registration| registration.event == event)
            .collect();
        for registration in &targets {
            (registration.handler)(payload);
        }
        targets.len()
    }

    /// Deregister every handler for `event`.
    pub fn off(&self, event: &str) {
        self.lock().retain(|registration| registration.event != event);
    }

    /// Deregister a single registration. Returns `false` if it was already gone.
    pub fn off_handler(&self, id: ListenerId) -> bool {
        self.lock().remove(id)
    }

    /// Total registrations across all events.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.lock().len()
    }
}

impl<P> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}
