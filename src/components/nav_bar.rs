//! Top navigation bar.
//!
//! SYSTEM CONTEXT
//! ==============
//! Shows login/register links to anonymous visitors and the profile link plus
//! logout action to signed-in users. Logout is local only; the route change
//! that follows re-runs the navigation check against the now-empty storage.

#[cfg(test)]
#[path = "nav_bar_test.rs"]
mod nav_bar_test;

use leptos::prelude::*;

use crate::context::PlatformContext;
use crate::state::auth::AuthState;

/// Links shown to the right of the brand for the given auth state.
fn nav_links(state: &AuthState) -> Vec<(&'static str, String)> {
    if state.is_logged_in() {
        vec![("/profile", state.display_name()), ("/login", "LogOut".to_owned())]
    } else {
        vec![("/login", "Login".to_owned()), ("/register", "Sign Up".to_owned())]
    }
}

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = expect_context::<PlatformContext>();
    let auth = expect_context::<RwSignal<AuthState>>();

    let logout = move || ctx.auth.logout();

    view! {
        <nav class="navbar">
            <a href="/home" class="navbar__brand">"Forecast Planner"</a>
            <div class="navbar__links">
                <a href="/home" class="navbar__link">"Home"</a>
                {move || {
                    let state = auth.get();
                    let logged_in = state.is_logged_in();
                    let links = nav_links(&state);
                    links
                        .into_iter()
                        .map(|(href, label)| {
                            let is_logout = logged_in && href == "/login";
                            let logout = logout.clone();
                            view! {
                                <a
                                    href=href
                                    class="navbar__link"
                                    on:click=move |_| {
                                        if is_logout {
                                            logout();
                                        }
                                    }
                                >
                                    {label}
                                </a>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </nav>
    }
}
