//! Banner for the current success/error notification.

use leptos::prelude::*;

use crate::state::notification::NoticeView;

/// Renders the live notification, or nothing when it is empty.
#[component]
pub fn NoticeBanner() -> impl IntoView {
    let notice = expect_context::<RwSignal<NoticeView>>();

    view! {
        <Show when=move || !notice.get().is_empty()>
            <p class=move || notice.get().css_class() role="alert" aria-live="assertive">
                {move || notice.get().text}
            </p>
        </Show>
    }
}
