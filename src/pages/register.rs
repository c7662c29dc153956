//! Account registration form.
//!
//! SYSTEM CONTEXT
//! ==============
//! Registration never signs the user in. On success the page swaps to a
//! confirmation with a link to `/login`; the auth client has already set the
//! success notification.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;

use crate::components::notice_banner::NoticeBanner;
#[cfg(feature = "csr")]
use crate::context::PlatformContext;
use crate::util::validation::{is_strong_password, is_valid_email, passwords_match};

const EMAIL_HINT: &str = "Enter a valid email address, e.g. name@example.com.";
const PASSWORD_HINT: &str =
    "8 to 24 characters. Must include uppercase and lowercase letters, a number and a special character (!@#$%).";
const CONFIRM_HINT: &str = "Must match the first password input field.";

/// Inline hint for the email field; silent while the field is empty.
fn email_hint(email: &str) -> Option<&'static str> {
    (!email.is_empty() && !is_valid_email(email.trim())).then_some(EMAIL_HINT)
}

fn password_hint(secret: &str) -> Option<&'static str> {
    (!secret.is_empty() && !is_strong_password(secret)).then_some(PASSWORD_HINT)
}

fn confirm_hint(secret: &str, confirmation: &str) -> Option<&'static str> {
    (!confirmation.is_empty() && !passwords_match(secret, confirmation)).then_some(CONFIRM_HINT)
}

/// Submit is enabled once every field passes its inline check.
fn can_submit(email: &str, secret: &str, confirmation: &str, busy: bool) -> bool {
    !busy && is_valid_email(email.trim()) && is_strong_password(secret) && passwords_match(secret, confirmation)
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    #[cfg(feature = "csr")]
    let ctx = expect_context::<PlatformContext>();
    let phone = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let secret = RwSignal::new(String::new());
    let confirmation = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let succeeded = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        busy.set(true);

        #[cfg(feature = "csr")]
        {
            let (phone_value, email_value, secret_value) = (phone.get(), email.get(), secret.get());
            let auth = ctx.auth.clone();
            leptos::task::spawn_local(async move {
                let ok = auth.register(&phone_value, &email_value, &secret_value).await.is_ok();
                let _ = succeeded.try_set(ok);
                let _ = busy.try_set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        busy.set(false);
    };

    let submit_disabled = move || !can_submit(&email.get(), &secret.get(), &confirmation.get(), busy.get());

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <NoticeBanner/>
                <Show
                    when=move || succeeded.get()
                    fallback=move || {
                        let on_submit = on_submit.clone();
                        view! {
                            <h1>"Register"</h1>
                            <form class="auth-form" on:submit=on_submit>
                                <label for="phone">"Phone"</label>
                                <input
                                    id="phone"
                                    type="tel"
                                    autocomplete="tel"
                                    prop:value=move || phone.get()
                                    on:input=move |ev| phone.set(event_target_value(&ev))
                                />
                                <label for="email">"Email"</label>
                                <input
                                    id="email"
                                    type="email"
                                    autocomplete="email"
                                    prop:value=move || email.get()
                                    on:input=move |ev| email.set(event_target_value(&ev))
                                />
                                <p class="auth-hint">{move || email_hint(&email.get())}</p>
                                <label for="password">"Password"</label>
                                <input
                                    id="password"
                                    type="password"
                                    autocomplete="new-password"
                                    prop:value=move || secret.get()
                                    on:input=move |ev| secret.set(event_target_value(&ev))
                                />
                                <p class="auth-hint">{move || password_hint(&secret.get())}</p>
                                <label for="confirm_pwd">"Confirm Password"</label>
                                <input
                                    id="confirm_pwd"
                                    type="password"
                                    autocomplete="new-password"
                                    prop:value=move || confirmation.get()
                                    on:input=move |ev| confirmation.set(event_target_value(&ev))
                                />
                                <p class="auth-hint">{move || confirm_hint(&secret.get(), &confirmation.get())}</p>
                                <button class="auth-button" type="submit" disabled=submit_disabled>
                                    "Sign Up"
                                </button>
                            </form>
                            <p class="auth-card__footer">
                                "Already registered? " <a href="/login">"Sign In"</a>
                            </p>
                        }
                    }
                >
                    <h1>"Success!"</h1>
                    <p>
                        <a href="/login">"Sign In"</a>
                    </p>
                </Show>
            </div>
        </div>
    }
}
