//! API error taxonomy and the user-facing message chain.
//!
//! ERROR HANDLING
//! ==============
//! Every failure shown to the user is derived in a fixed order:
//! 1. the server's structured message (`message`, then `detail`),
//! 2. the error class's generic message,
//! 3. the error's `Display` text.
//!
//! No error here is retried; the user resubmits.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::transport::{ApiResponse, TransportError};
use crate::util::storage::StorageError;
use crate::util::token::TokenError;
use crate::util::validation::INVALID_ENTRY;

/// Generic text for requests that never reached the server.
pub const NO_SERVER_RESPONSE: &str = "No Server Response";

/// Generic text for a login whose session could not be persisted.
pub const SESSION_NOT_SAVED: &str = "Session could not be saved";

const STRUCTURED_MESSAGE_FIELDS: [&str; 2] = ["message", "detail"];

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response arrived.
    #[error(transparent)]
    Network(#[from] TransportError),
    /// The server answered with a non-2xx status.
    #[error("server rejected request with status {status}")]
    Rejected { status: u16, body: Option<Value> },
    /// Client-side validation failed; nothing was sent.
    #[error("invalid entry")]
    InvalidEntry,
    /// A 2xx body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// The login response carried a token with no usable expiry.
    #[error("access token could not be decoded: {0}")]
    InvalidToken(#[from] TokenError),
    /// The session was valid but durable storage refused it.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Non-blank `message` or `detail` string from a rejected response body.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        let Self::Rejected { body: Some(body), .. } = self else {
            return None;
        };
        STRUCTURED_MESSAGE_FIELDS
            .iter()
            .filter_map(|field| body.get(field).and_then(Value::as_str))
            .find(|text| !text.trim().is_empty())
    }

    /// Fixed message for the error class, where one exists.
    #[must_use]
    pub fn generic_message(&self) -> Option<String> {
        match self {
            Self::Network(_) => Some(NO_SERVER_RESPONSE.to_owned()),
            Self::Rejected { status, .. } => Some(format!("Request failed with status code {status}")),
            Self::InvalidEntry => Some(INVALID_ENTRY.to_owned()),
            Self::Storage(_) => Some(SESSION_NOT_SAVED.to_owned()),
            Self::Decode(_) | Self::InvalidToken(_) => None,
        }
    }

    /// Text to show the user: structured field, then generic, then `Display`.
    #[must_use]
    pub fn user_message(&self) -> String {
        self.server_message()
            .map(str::to_owned)
            .or_else(|| self.generic_message())
            .unwrap_or_else(|| self.to_string())
    }
}

/// Turn a non-2xx response into [`ApiError::Rejected`].
///
/// # Errors
///
/// Returns `Rejected` with the parsed body (if JSON) for non-2xx statuses.
pub fn ensure_success(response: ApiResponse) -> Result<ApiResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    Err(ApiError::Rejected { status: response.status, body: response.json_body() })
}

/// Check the status, then decode a 2xx body as `T`.
///
/// # Errors
///
/// Returns `Rejected` for non-2xx statuses and `Decode` for malformed bodies.
pub fn read_json<T: DeserializeOwned>(response: ApiResponse) -> Result<T, ApiError> {
    let response = ensure_success(response)?;
    Ok(serde_json::from_str(&response.body)?)
}
