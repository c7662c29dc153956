//! REST endpoints and the authenticated profile queries.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every call here goes through a [`Transport`], so the same code runs
//! against `fetch` in the browser, `reqwest` natively, and a stub in tests.
//! Authenticated requests read the token from the [`SessionStore`] at send
//! time; a request made without a session carries no `Authorization` header.
//!
//! ERROR HANDLING
//! ==============
//! All failures surface as [`ApiError`]; callers render
//! [`ApiError::user_message`].

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use log::debug;
use serde_json::Value;

use super::error::{ApiError, ensure_success, read_json};
use super::transport::{ApiRequest, Transport};
use super::types::{Destination, PastDestinations, Recommendation, UserProfile, WeatherForecast};
use crate::config::ClientConfig;
use crate::state::session::{Session, SessionStore};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/users";
pub const CURRENT_USER_PATH: &str = "/auth/me";
pub const FIVE_DAY_WEATHER_PATH: &str = "/five-day_weather";
pub const PAST_DESTINATIONS_PATH: &str = "/destinations/past";
pub const CURRENT_DESTINATION_PATH: &str = "/destinations/current";
pub const RECOMMENDATIONS_PATH: &str = "/recommendations";
pub const DESTINATIONS_PATH: &str = "/destinations";

/// Notification shown after a trip is saved when the server sends no message.
pub const DESTINATION_SAVED: &str = "Destination saved";

/// `Authorization` header value for the session, or `None` to omit it.
#[must_use]
pub fn bearer_authorization(session: Option<&Session>) -> Option<String> {
    session.map(Session::bearer)
}

/// Authenticated profile endpoints.
pub struct ProfileApi<T> {
    config: ClientConfig,
    transport: T,
    session: Arc<SessionStore>,
}

impl<T: Transport> ProfileApi<T> {
    pub fn new(config: ClientConfig, transport: T, session: Arc<SessionStore>) -> Self {
        Self { config, transport, session }
    }

    fn authorized(&self, request: ApiRequest) -> ApiRequest {
        let session = self.session.current();
        request.with_authorization(bearer_authorization(session.as_ref()))
    }

    fn authorized_get(&self, path: &str) -> ApiRequest {
        self.authorized(ApiRequest::get(self.config.endpoint(path)))
    }

    /// Fetch the signed-in account from `GET /auth/me`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on network failure, rejection (e.g. 401 with
    /// no session), or an unexpected body.
    pub async fn current_user(&self) -> Result<UserProfile, ApiError> {
        let response = self.transport.send(self.authorized_get(CURRENT_USER_PATH)).await?;
        read_json(response)
    }

    /// Five-day forecast windows for a location.
    ///
    /// # Errors
    ///
    /// See [`ProfileApi::current_user`].
    pub async fn five_day_forecast(&self, location_name: &str) -> Result<Vec<WeatherForecast>, ApiError> {
        debug!("fetching forecast for {location_name}");
        let request = self
            .authorized_get(FIVE_DAY_WEATHER_PATH)
            .with_query("location_name", location_name);
        let response = self.transport.send(request).await?;
        read_json(response)
    }

    /// # Errors
    ///
    /// See [`ProfileApi::current_user`].
    pub async fn past_destinations(&self, user_id: i64) -> Result<Vec<Destination>, ApiError> {
        let request = self
            .authorized_get(PAST_DESTINATIONS_PATH)
            .with_query("user_id", user_id.to_string());
        let response = self.transport.send(request).await?;
        let past: PastDestinations = read_json(response)?;
        Ok(past.destinations)
    }

    /// # Errors
    ///
    /// See [`ProfileApi::current_user`].
    pub async fn current_destination(&self, user_id: i64) -> Result<Destination, ApiError> {
        let request = self
            .authorized_get(CURRENT_DESTINATION_PATH)
            .with_query("user_id", user_id.to_string());
        let response = self.transport.send(request).await?;
        read_json(response)
    }

    /// Packing suggestions for a trip.
    ///
    /// # Errors
    ///
    /// See [`ProfileApi::current_user`].
    pub async fn recommendations(&self, destination: &Destination) -> Result<Recommendation, ApiError> {
        let request = self
            .authorized_get(RECOMMENDATIONS_PATH)
            .with_query("location_name", destination.location_name.as_str())
            .with_query("date", destination.date.as_str())
            .with_query("days", destination.days.to_string());
        let response = self.transport.send(request).await?;
        read_json(response)
    }

    /// Save a planned trip with `POST /destinations`.
    ///
    /// Returns the server's `message`, or [`DESTINATION_SAVED`].
    ///
    /// # Errors
    ///
    /// See [`ProfileApi::current_user`]. Success bodies are not decoded.
    pub async fn submit_destination(&self, destination: &Destination) -> Result<String, ApiError> {
        debug!("submitting trip to {}", destination.location_name);
        let body = serde_json::json!({
            "location_name": destination.location_name,
            "date": destination.date,
            "days": destination.days,
        });
        let request = self.authorized(ApiRequest::post_json(self.config.endpoint(DESTINATIONS_PATH), body));
        let response = ensure_success(self.transport.send(request).await?)?;
        let message = response
            .json_body()
            .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_owned))
            .filter(|text| !text.trim().is_empty());
        Ok(message.unwrap_or_else(|| DESTINATION_SAVED.to_owned()))
    }
}
