//! Access-token claim decoding for client-side expiry checks.
//!
//! The client never holds the signing key, so signatures are not verified.
//! Claims are only used to decide when a stored session is stale and must be
//! dropped locally; the server remains the authority on every request.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Reasons a token payload could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The token is not three non-empty dot-separated segments.
    #[error("token is not a JWT")]
    Malformed,
    /// The payload segment is not valid base64url.
    #[error("token payload is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The payload is not a JSON claims object with an `exp`.
    #[error("token payload is not a claims object: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Decoded token payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Expiry, seconds since the Unix epoch.
    #[serde(deserialize_with = "deserialize_epoch_seconds")]
    pub exp: i64,
    /// Subject (the backend puts the account email here).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Any other claims, kept verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl TokenClaims {
    /// Claims carrying only an expiry.
    #[must_use]
    pub fn with_exp(exp: i64) -> Self {
        Self { exp, sub: None, extra: serde_json::Map::new() }
    }

    #[must_use]
    pub fn expires_at_millis(&self) -> i64 {
        self.exp.saturating_mul(1000)
    }

    /// A token is valid strictly before its expiry instant.
    #[must_use]
    pub fn is_valid_at(&self, now_millis: i64) -> bool {
        self.expires_at_millis() > now_millis
    }
}

/// Decode the claims segment of a JWT.
///
/// # Errors
///
/// Returns an error if the token is not a three-segment JWT or its payload is
/// not a base64url-encoded JSON object with a numeric `exp`.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let mut segments = token.trim().split('.');
    let (Some(header), Some(payload), Some(_signature), None) =
        (segments.next(), segments.next(), segments.next(), segments.next())
    else {
        return Err(TokenError::Malformed);
    };
    if header.is_empty() || payload.is_empty() {
        return Err(TokenError::Malformed);
    }
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn epoch_seconds(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(int) = number.as_i64() {
        return Some(int);
    }
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    if let Some(float) = number.as_f64()
        && float.is_finite()
        && float >= i64::MIN as f64
        && float <= i64::MAX as f64
    {
        return Some(float.trunc() as i64);
    }
    None
}

/// Accept integer or fractional epoch seconds; fractions are truncated.
pub(crate) fn deserialize_epoch_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    epoch_seconds(&value).ok_or_else(|| D::Error::custom("expected epoch seconds"))
}

pub(crate) fn deserialize_optional_epoch_seconds<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => epoch_seconds(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom("expected epoch seconds")),
    }
}
