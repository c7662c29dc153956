//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::nav_bar::NavBar;
use crate::config::ClientConfig;
use crate::context::PlatformContext;
use crate::pages::{home::HomePage, login::LoginPage, profile::ProfilePage, register::RegisterPage};
use crate::state::auth::AuthState;
use crate::state::notification::NoticeView;
use crate::util::auth::install_navigation_listener;

/// Root application component.
///
/// Builds the client context, mirrors the session and notification stores
/// into signals, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let ctx = PlatformContext::platform(ClientConfig::from_env());
    let auth = RwSignal::new(AuthState::from_session(ctx.session.current()));
    let notice = RwSignal::new(ctx.notifications.view());

    let session_subscription = ctx.session.subscribe(move |session| {
        let _ = auth.try_set(AuthState::from_session(session.cloned()));
    });
    let notice_subscription = ctx.notifications.subscribe(move |text, kind| {
        let _ = notice.try_set(NoticeView::new(text, kind));
    });
    {
        let ctx = ctx.clone();
        on_cleanup(move || {
            ctx.session.unsubscribe(session_subscription);
            ctx.notifications.unsubscribe(notice_subscription);
            ctx.unbind_logout();
        });
    }

    provide_context(ctx);
    provide_context(auth);
    provide_context(notice);

    view! {
        <Title text="Forecast Planner"/>

        <Router>
            <NavigationWatcher/>
            <NavBar/>
            <main class="container">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("home") view=HomePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=StaticSegment("profile") view=ProfilePage/>
                </Routes>
            </main>
        </Router>
    }
}

/// Feeds route changes to the navigation listener. Renders nothing.
#[component]
fn NavigationWatcher() -> impl IntoView {
    let ctx = expect_context::<PlatformContext>();
    install_navigation_listener(Arc::clone(&ctx.navigation));
}
