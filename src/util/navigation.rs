//! Route-change hook that enforces token expiry.
//!
//! SYSTEM CONTEXT
//! ==============
//! The app shell calls [`NavigationListener::handle_navigation`] on every
//! location change, including the first one after mount. The listener reads
//! the session record from durable storage rather than the in-memory store,
//! so a logout or re-login in another tab is noticed on the next route change.
//!
//! DESIGN
//! ======
//! The listener never signs the user out itself. It emits `logout` on the
//! signal bus and the handler bound by the auth client does the work. The
//! stale notification is cleared after the emit, on every navigation.
//!
//! ERROR HANDLING
//! ==============
//! An unreadable record or undecodable token counts as expired. Nothing here
//! returns an error or panics.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, info};

use super::clock::Clock;
use super::event_bus::{EventBus, LOGOUT_EVENT};
use super::storage::KeyValueStorage;
use crate::state::notification::NotificationStore;
use crate::state::session::read_stored_session;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListenerState {
    Idle,
    Checking,
}

/// What a navigation check found in storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationCheck {
    NoSession,
    Valid,
    /// Expired or undecodable; `logout` was emitted.
    Expired,
}

pub struct NavigationListener {
    storage: Arc<dyn KeyValueStorage>,
    notifications: Arc<NotificationStore>,
    bus: Arc<EventBus<()>>,
    clock: Arc<dyn Clock>,
    state: Mutex<ListenerState>,
}

impl NavigationListener {
    pub fn new(
        storage: Arc<dyn KeyValueStorage>,
        notifications: Arc<NotificationStore>,
        bus: Arc<EventBus<()>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { storage, notifications, bus, clock, state: Mutex::new(ListenerState::Idle) }
    }

    #[must_use]
    pub fn state(&self) -> ListenerState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, next: ListenerState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }

    /// Check the stored session for `path`, forcing a logout if it expired,
    /// then clear the notification.
    pub fn handle_navigation(&self, path: &str) -> NavigationCheck {
        self.set_state(ListenerState::Checking);
        let check = self.check_stored_session();
        debug!("navigation to {path}: {check:?}");
        if check == NavigationCheck::Expired {
            let handlers = self.bus.emit(LOGOUT_EVENT, &());
            info!("stored session expired; requested logout ({handlers} handler(s))");
        }
        self.notifications.clear();
        self.set_state(ListenerState::Idle);
        check
    }

    fn check_stored_session(&self) -> NavigationCheck {
        match read_stored_session(self.storage.as_ref()) {
            Ok(None) => NavigationCheck::NoSession,
            Ok(Some(session)) if session.is_valid_at(self.clock.now_millis()) => NavigationCheck::Valid,
            Ok(Some(_)) => NavigationCheck::Expired,
            Err(err) => {
                debug!("stored session unreadable: {err}");
                NavigationCheck::Expired
            }
        }
    }
}
