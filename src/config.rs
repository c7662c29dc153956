//! Client configuration.
//!
//! The only knob is the REST root. Browser builds bake it in at compile time
//! because a static bundle has no process environment; native builds read it
//! at runtime.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Environment variable naming the versioned REST root.
pub const API_URL_ENV: &str = "FORECAST_API_URL";

/// Used when [`API_URL_ENV`] is unset or blank.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api/v1";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Versioned REST root without a trailing slash (e.g. `".../api/v1"`).
    pub api_base_url: String,
}

impl ClientConfig {
    #[must_use]
    pub fn new(api_base_url: impl Into<String>) -> Self {
        let raw: String = api_base_url.into();
        Self { api_base_url: raw.trim().trim_end_matches('/').to_owned() }
    }

    /// Resolve the base URL from [`API_URL_ENV`], falling back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        #[cfg(feature = "csr")]
        let configured = option_env!("FORECAST_API_URL").map(str::to_owned);
        #[cfg(not(feature = "csr"))]
        let configured = std::env::var(API_URL_ENV).ok();

        Self::new(
            configured
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned()),
        )
    }

    /// Absolute URL for an API path such as `"/auth/login"`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}
