//! Wire DTOs for the profile endpoints.
//!
//! DESIGN
//! ======
//! Field names match the server's JSON exactly. Decimal columns are
//! serialized by the backend either as JSON numbers or as numeric strings,
//! so they go through [`deserialize_optional_decimal`].

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Account details from `GET /auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Numeric account id; keys every per-user query.
    pub user_id: i64,
    pub email: Option<String>,
    /// Phone number; also the login identifier.
    #[serde(default)]
    pub phone: String,
    pub gender: Option<String>,
}

/// One forecast window for a location from `GET /five-day_weather`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub forecast_id: i64,
    pub location_id: i64,
    /// ISO-8601 timestamp the forecast was issued for.
    pub date_time: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub temperature: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub humidity: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub wind_speed: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub precipitation_probability: Option<f64>,
}

/// A planned or past trip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    /// Place name; older payloads call it `name`.
    #[serde(alias = "name")]
    pub location_name: String,
    /// Departure date (`YYYY-MM-DD`).
    #[serde(default)]
    pub date: String,
    /// Trip length in days.
    #[serde(default)]
    pub days: u32,
}

/// Envelope returned by `GET /destinations/past`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PastDestinations {
    #[serde(default)]
    pub destinations: Vec<Destination>,
}

/// Packing suggestions for a destination and date range.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub description: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
    /// Weather attribute name to human description, e.g. `temperature`.
    #[serde(default)]
    pub weather_descriptions: BTreeMap<String, String>,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Number(number)) => number
            .as_f64()
            .map(Some)
            .ok_or_else(|| D::Error::custom("expected finite decimal")),
        Some(serde_json::Value::String(text)) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected decimal string, got {text:?}"))),
        Some(_) => Err(D::Error::custom("expected decimal number or string")),
    }
}
