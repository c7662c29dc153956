//! Transient user-facing message (success or error).
//!
//! At most one message is live. A new message overwrites the old one and
//! every navigation clears it.

#[cfg(test)]
#[path = "notification_test.rs"]
mod notification_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use crate::util::listeners::{ListenerId, ListenerSet};

/// Tone of the current message, for styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// Renderable copy of the current notification.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoticeView {
    pub text: String,
    pub kind: Option<MessageKind>,
}

impl NoticeView {
    #[must_use]
    pub fn new(text: &str, kind: Option<MessageKind>) -> Self {
        Self { text: text.to_owned(), kind }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// CSS modifier class for the banner.
    #[must_use]
    pub fn css_class(&self) -> &'static str {
        match self.kind {
            Some(MessageKind::Success) => "notice notice--success",
            Some(MessageKind::Error) => "notice notice--error",
            None => "notice",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Notification {
    text: String,
    kind: MessageKind,
}

type Subscriber = dyn Fn(&str, Option<MessageKind>) + Send + Sync;

/// Holds the single live notification.
#[derive(Default)]
pub struct NotificationStore {
    current: RwLock<Option<Notification>>,
    subscribers: Mutex<ListenerSet<Subscriber>>,
}

impl NotificationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn subscribers(&self) -> MutexGuard<'_, ListenerSet<Subscriber>> {
        self.subscribers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn replace(&self, next: Option<Notification>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = next;
    }

    /// Overwrite the current message.
    pub fn set_message(&self, text: impl Into<String>, kind: MessageKind) {
        let text = text.into();
        self.replace(Some(Notification { text: text.clone(), kind }));
        self.notify(&text, Some(kind));
    }

    pub fn set_success(&self, text: impl Into<String>) {
        self.set_message(text, MessageKind::Success);
    }

    pub fn set_error(&self, text: impl Into<String>) {
        self.set_message(text, MessageKind::Error);
    }

    /// Reset to empty. Always notifies, even when already empty.
    pub fn clear(&self) {
        self.replace(None);
        self.notify("", None);
    }

    /// Current text, or `""` when nothing is shown.
    #[must_use]
    pub fn message(&self) -> String {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|n| n.text.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn kind(&self) -> Option<MessageKind> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|n| n.kind)
    }

    #[must_use]
    pub fn view(&self) -> NoticeView {
        NoticeView::new(&self.message(), self.kind())
    }

    pub fn subscribe<F>(&self, subscriber: F) -> ListenerId
    where
        F: Fn(&str, Option<MessageKind>) + Send + Sync + 'static,
    {
        self.subscribers().insert(Arc::new(subscriber))
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.subscribers().remove(id)
    }

    fn notify(&self, text: &str, kind: Option<MessageKind>) {
        let subscribers = self.subscribers().snapshot();
        for subscriber in subscribers {
            subscriber(text, kind);
        }
    }
}
