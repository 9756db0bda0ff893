//! Client configuration for talking to a notes API.
//!
//! The CLI assembles a `ClientConfig` from flags, environment, and its config
//! file; this module owns validation and defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

/// Shortest quiet interval allowed for filter-triggered refetches.
pub const MIN_FILTER_DEBOUNCE_MS: u64 = 500;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Validated settings for an API client and its list store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// API base URL without trailing slash, e.g. `https://notes.example.com/api`
    pub base_url: String,
    /// Per-request timeout; `None` disables it
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: Option<u64>,
    /// Quiet interval before a filter change refetches
    #[serde(default = "default_filter_debounce_ms")]
    pub filter_debounce_ms: u64,
}

#[allow(clippy::unnecessary_wraps)]
const fn default_request_timeout_secs() -> Option<u64> {
    Some(DEFAULT_REQUEST_TIMEOUT_SECS)
}

const fn default_filter_debounce_ms() -> u64 {
    MIN_FILTER_DEBOUNCE_MS
}

impl ClientConfig {
    /// Build a config with defaults for everything but the base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(&base_url.into())?,
            request_timeout_secs: default_request_timeout_secs(),
            filter_debounce_ms: default_filter_debounce_ms(),
        })
    }

    /// Override the per-request timeout. Zero disables it.
    #[must_use]
    pub fn with_request_timeout_secs(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = (seconds > 0).then_some(seconds);
        self
    }

    /// Override the filter debounce; values below the floor are raised to it.
    #[must_use]
    pub fn with_filter_debounce_ms(mut self, millis: u64) -> Self {
        self.filter_debounce_ms = millis.max(MIN_FILTER_DEBOUNCE_MS);
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn filter_debounce(&self) -> Duration {
        Duration::from_millis(self.filter_debounce_ms.max(MIN_FILTER_DEBOUNCE_MS))
    }
}

/// Trim and validate an API base URL.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let value = normalize_text_option(Some(raw.to_string()))
        .ok_or_else(|| Error::InvalidInput("API base URL is required".to_string()))?;
    if !is_http_url(&value) {
        return Err(Error::InvalidInput(
            "API base URL must include http:// or https://".to_string(),
        ));
    }
    Ok(value.trim_end_matches('/').to_string())
}
