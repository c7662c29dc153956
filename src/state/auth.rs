//! Reactive auth view state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mirrors the session store into a Leptos signal so route guards and the nav
//! bar can react to login/logout without holding the store themselves.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::session::Session;

/// Snapshot of the session as seen by the UI.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
}

impl AuthState {
    #[must_use]
    pub fn from_session(session: Option<Session>) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    /// Label for the nav bar; falls back to a generic name.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.session
            .as_ref()
            .and_then(|s| s.identity.display_name())
            .unwrap_or("Profile")
            .to_owned()
    }
}

/// Protected pages redirect to `/login` whenever no session is present.
#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.is_logged_in()
}
