//! Login, registration, and logout against the auth endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages call [`AuthClient`]; it talks to the server through a [`Transport`],
//! writes the outcome to the [`SessionStore`], and reports to the user through
//! the [`NotificationStore`]. The navigation listener reaches [`AuthClient::logout`]
//! indirectly through the `logout` event on the signal bus.
//!
//! DESIGN
//! ======
//! - Login and registration validate first; invalid input never hits the wire.
//! - A failed request sets an error notification and leaves the session alone.
//! - No cancellation. Whichever session mutation runs last wins, so a logout
//!   issued while a login is in flight is overwritten when the login lands.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is returned as [`AuthError`] carrying the exact text that was
//! shown to the user, plus the underlying [`ApiError`].

#[cfg(test)]
#[path = "auth_client_test.rs"]
mod auth_client_test;

use std::sync::Arc;

use log::{info, warn};
use serde_json::Value;

use super::api::{LOGIN_PATH, REGISTER_PATH};
use super::error::{ApiError, ensure_success, read_json};
use super::transport::{ApiRequest, Transport};
use crate::config::ClientConfig;
use crate::state::notification::NotificationStore;
use crate::state::session::{Session, SessionRecord, SessionStore};
use crate::util::event_bus::{EventBus, LOGOUT_EVENT};
use crate::util::listeners::ListenerId;
use crate::util::validation::{validate_login, validate_registration};

/// Notification shown after a successful login.
pub const LOGIN_SUCCEEDED: &str = "Login successful";

/// Notification shown after registration when the server sends no message.
pub const REGISTRATION_SUCCEEDED: &str = "Registration successful";

/// A failed auth operation and the message the user saw for it.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
    #[source]
    pub source: ApiError,
}

pub struct AuthClient<T> {
    config: ClientConfig,
    transport: T,
    session: Arc<SessionStore>,
    notifications: Arc<NotificationStore>,
}

impl<T: Transport> AuthClient<T> {
    pub fn new(
        config: ClientConfig,
        transport: T,
        session: Arc<SessionStore>,
        notifications: Arc<NotificationStore>,
    ) -> Self {
        Self { config, transport, session, notifications }
    }

    /// Exchange credentials for a session and make it current.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] for invalid input, network failure, server
    /// rejection, a response without a usable token, or a session that
    /// storage refused. The error notification is already set when this
    /// returns, and the previous session is still current.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<Session, AuthError> {
        let outcome = self
            .request_session(identifier, secret)
            .await
            .and_then(|session| self.commit(session));
        match outcome {
            Ok(session) => {
                info!("login succeeded");
                self.notifications.set_success(LOGIN_SUCCEEDED);
                Ok(session)
            }
            Err(source) => Err(self.fail("login", source)),
        }
    }

    fn commit(&self, session: Session) -> Result<Session, ApiError> {
        self.session.apply_login(session.clone())?;
        Ok(session)
    }

    async fn request_session(&self, identifier: &str, secret: &str) -> Result<Session, ApiError> {
        let input = validate_login(identifier, secret).map_err(|_| ApiError::InvalidEntry)?;
        let request = ApiRequest::post_form(
            self.config.endpoint(LOGIN_PATH),
            &[("username", input.identifier), ("password", input.secret)],
        );
        let response = self.transport.send(request).await?;
        let mut record: SessionRecord = read_json(response)?;
        if record.identity.username.is_none() {
            record.identity.username = Some(input.identifier.to_owned());
        }
        Ok(Session::from_record(record)?)
    }

    /// Create an account. Never signs the user in.
    ///
    /// Returns the success text that was shown.
    ///
    /// # Errors
    ///
    /// Same classes as [`AuthClient::login`], minus token decoding.
    pub async fn register(&self, phone: &str, email: &str, secret: &str) -> Result<String, AuthError> {
        match self.request_registration(phone, email, secret).await {
            Ok(message) => {
                info!("registration succeeded");
                self.notifications.set_success(message.clone());
                Ok(message)
            }
            Err(source) => Err(self.fail("registration", source)),
        }
    }

    async fn request_registration(&self, phone: &str, email: &str, secret: &str) -> Result<String, ApiError> {
        let input = validate_registration(phone, email, secret).map_err(|_| ApiError::InvalidEntry)?;
        let body = serde_json::json!({
            "phone": input.phone,
            "email": input.email,
            "password": input.secret,
        });
        let request = ApiRequest::post_json(self.config.endpoint(REGISTER_PATH), body);
        let response = ensure_success(self.transport.send(request).await?)?;
        let message = response
            .json_body()
            .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_owned))
            .filter(|text| !text.trim().is_empty());
        Ok(message.unwrap_or_else(|| REGISTRATION_SUCCEEDED.to_owned()))
    }

    /// Drop the local session. No server round trip.
    pub fn logout(&self) {
        sign_out(&self.session);
    }

    /// Register a `logout` handler on `bus` that signs the user out.
    /// Pass the returned id to [`EventBus::off_handler`] to detach it.
    pub fn bind_logout(&self, bus: &EventBus<()>) -> ListenerId {
        let session = Arc::clone(&self.session);
        bus.on(LOGOUT_EVENT, move |_: &()| sign_out(&session))
    }

    fn fail(&self, operation: &str, source: ApiError) -> AuthError {
        let message = source.user_message();
        warn!("{operation} failed: {source}");
        self.notifications.set_error(message.clone());
        AuthError { message, source }
    }
}

fn sign_out(session: &SessionStore) {
    info!("signing out");
    session.apply_logout();
}
