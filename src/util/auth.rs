//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes apply the same unauthenticated redirect, and the app shell
//! feeds every location change to the navigation listener.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_location;

use super::navigation::NavigationListener;
use crate::state::auth::{AuthState, should_redirect_unauth};

/// Redirect to `/login` whenever no session is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&auth.get()) {
            navigate("/login", NavigateOptions::default());
        }
    });
}

/// Run a navigation check on mount and after every path change. Must be
/// called inside a `<Router>`.
pub fn install_navigation_listener(listener: Arc<NavigationListener>) {
    let location = use_location();
    Effect::new(move || {
        let path = location.pathname.get();
        listener.handle_navigation(&path);
    });
}
