//! Session store: the single owner of the authenticated user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth client writes here on login/logout, the UI subscribes to render
//! identity-dependent views, and authenticated API calls read the token.
//!
//! DESIGN
//! ======
//! Memory and durable storage move together. Every mutation writes through to
//! the `"user"` key before memory changes and subscribers run, so there is no
//! window where a reload would observe a different session than the live UI.
//! A rejected write leaves both sides on the previous session. The store is
//! the only writer of that key; the navigation listener reads it directly to
//! notice changes made by other tabs.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::util::listeners::{ListenerId, ListenerSet};
use crate::util::storage::{KeyValueStorage, StorageError, load_json, save_json};
use crate::util::token::{TokenClaims, TokenError, decode_claims, deserialize_optional_epoch_seconds};

/// Durable storage key holding the serialized session record.
pub const SESSION_STORAGE_KEY: &str = "user";

/// Identifying fields for the signed-in user. All optional because the login
/// response and `/auth/me` expose different subsets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UserIdentity {
    /// Best human-facing label: phone, then username, then email.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.phone
            .as_deref()
            .or(self.username.as_deref())
            .or(self.email.as_deref())
    }
}

/// Wire/storage shape of a session: the login response body and the value
/// stored under [`SESSION_STORAGE_KEY`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(alias = "accessToken")]
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Expiry seconds, used when the token itself is not a decodable JWT.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_epoch_seconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub exp: Option<i64>,
    #[serde(flatten)]
    pub identity: UserIdentity,
}

/// An authenticated session.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub token: String,
    pub token_type: Option<String>,
    pub refresh_token: Option<String>,
    pub claims: TokenClaims,
    pub identity: UserIdentity,
}

impl Session {
    /// Build a session, resolving claims from the token's JWT payload and
    /// falling back to the record's top-level `exp`.
    ///
    /// # Errors
    ///
    /// Returns the token decode error when neither source yields an expiry.
    pub fn from_record(record: SessionRecord) -> Result<Self, TokenError> {
        let claims = match decode_claims(&record.access_token) {
            Ok(claims) => claims,
            Err(err) => record.exp.map(TokenClaims::with_exp).ok_or(err)?,
        };
        Ok(Self {
            token: record.access_token,
            token_type: record.token_type,
            refresh_token: record.refresh_token,
            claims,
            identity: record.identity,
        })
    }

    /// Record persisted for this session. Always carries `exp` so opaque
    /// tokens survive a reload.
    #[must_use]
    pub fn to_record(&self) -> SessionRecord {
        SessionRecord {
            access_token: self.token.clone(),
            token_type: self.token_type.clone(),
            refresh_token: self.refresh_token.clone(),
            exp: Some(self.claims.exp),
            identity: self.identity.clone(),
        }
    }

    #[must_use]
    pub fn is_valid_at(&self, now_millis: i64) -> bool {
        self.claims.is_valid_at(now_millis)
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Read the persisted session straight from storage.
///
/// `Ok(None)` means no record; `Err` means a record exists but cannot be
/// turned into a session (bad JSON or undecodable token).
///
/// # Errors
///
/// Returns a description of why the stored record is unusable.
pub fn read_stored_session(storage: &dyn KeyValueStorage) -> Result<Option<Session>, String> {
    let record = load_json::<SessionRecord>(storage, SESSION_STORAGE_KEY).map_err(|e| e.to_string())?;
    record
        .map(Session::from_record)
        .transpose()
        .map_err(|e| e.to_string())
}

type Subscriber = dyn Fn(Option<&Session>) + Send + Sync;

/// Holds the current session and writes every change through to storage.
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
    current: RwLock<Option<Session>>,
    subscribers: Mutex<ListenerSet<Subscriber>>,
}

impl SessionStore {
    /// Construct the store and hydrate it from durable storage.
    ///
    /// An unreadable record yields no session and is left in place; the
    /// navigation listener purges it on the first route check.
    pub fn init(storage: Arc<dyn KeyValueStorage>) -> Self {
        let current = match read_stored_session(storage.as_ref()) {
            Ok(session) => session,
            Err(err) => {
                warn!("ignoring unreadable stored session: {err}");
                None
            }
        };
        debug!("session store hydrated (authenticated: {})", current.is_some());
        Self {
            storage,
            current: RwLock::new(current),
            subscribers: Mutex::new(ListenerSet::new()),
        }
    }

    fn subscribers(&self) -> MutexGuard<'_, ListenerSet<Subscriber>> {
        self.subscribers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn replace(&self, next: Option<Session>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = next;
    }

    /// The current session, if any.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Persist the session, make it current, then notify subscribers.
    ///
    /// # Errors
    ///
    /// Returns the storage error when the write is rejected. Memory, storage,
    /// and subscribers are then untouched.
    pub fn apply_login(&self, session: Session) -> Result<(), StorageError> {
        if let Err(err) = save_json(self.storage.as_ref(), SESSION_STORAGE_KEY, &session.to_record()) {
            warn!("failed to persist session, keeping previous one: {err}");
            return Err(err);
        }
        self.replace(Some(session.clone()));
        self.notify(Some(&session));
        Ok(())
    }

    /// Drop the current session and its storage entry, then notify
    /// subscribers. Safe to call repeatedly.
    pub fn apply_logout(&self) {
        self.storage.remove_item(SESSION_STORAGE_KEY);
        self.replace(None);
        self.notify(None);
    }

    /// Register a callback run after every mutation, in subscription order.
    pub fn subscribe<F>(&self, subscriber: F) -> ListenerId
    where
        F: Fn(Option<&Session>) + Send + Sync + 'static,
    {
        self.subscribers().insert(Arc::new(subscriber))
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.subscribers().remove(id)
    }

    /// Clear memory and subscribers without touching storage. Lets a test
    /// harness reuse one store across cases.
    pub fn reset(&self) {
        self.replace(None);
        self.subscribers().clear();
    }

    fn notify(&self, session: Option<&Session>) {
        let subscribers = self.subscribers().snapshot();
        for subscriber in subscribers {
            subscriber(session);
        }
    }
}
