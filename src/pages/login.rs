//! Login form.
//!
//! SYSTEM CONTEXT
//! ==============
//! Submits through the auth client, which owns validation, the session write,
//! and the success/error notification. The page only tracks its own busy flag
//! and moves to `/profile` on success.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
#[cfg(feature = "csr")]
use leptos_router::{NavigateOptions, hooks::use_navigate};

use crate::components::notice_banner::NoticeBanner;
#[cfg(feature = "csr")]
use crate::context::PlatformContext;

fn submit_label(busy: bool) -> &'static str {
    if busy { "Signing in..." } else { "Login" }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    #[cfg(feature = "csr")]
    let ctx = expect_context::<PlatformContext>();
    #[cfg(feature = "csr")]
    let navigate = use_navigate();
    let identifier = RwSignal::new(String::new());
    let secret = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        busy.set(true);

        #[cfg(feature = "csr")]
        {
            let (identifier_value, secret_value) = (identifier.get(), secret.get());
            let auth = ctx.auth.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                // The page may be gone by now; the stores still apply.
                let signed_in = auth.login(&identifier_value, &secret_value).await.is_ok();
                let _ = busy.try_set(false);
                if signed_in {
                    navigate("/profile", NavigateOptions::default());
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        busy.set(false);
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Sign In"</h1>
                <NoticeBanner/>
                <form class="auth-form" on:submit=on_submit>
                    <label for="identifier">"Phone"</label>
                    <input
                        id="identifier"
                        type="text"
                        autocomplete="username"
                        prop:value=move || identifier.get()
                        on:input=move |ev| identifier.set(event_target_value(&ev))
                    />
                    <label for="password">"Password"</label>
                    <input
                        id="password"
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || secret.get()
                        on:input=move |ev| secret.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || submit_label(busy.get())}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "Need an account? " <a href="/register">"Sign Up"</a>
                </p>
            </div>
        </div>
    }
}
