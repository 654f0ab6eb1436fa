//! Probe configuration.
//!
//! A shared, immutable configuration: base URL, request timeout, and the
//! default response-time bound. Values can be overridden per process with
//! `RESTPROBE_BASE_URL`, `RESTPROBE_TIMEOUT_MS`, and
//! `RESTPROBE_MAX_RESPONSE_MS`.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// Default base URL for the built-in smoke suite.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default response-time bound in milliseconds.
pub const DEFAULT_MAX_RESPONSE_MS: u64 = 3_000;

/// Immutable probe configuration shared by all scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Base URL all request paths are relative to.
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Response-time bound applied by time expectations.
    pub max_response_ms: u64,
}

impl ProbeConfig {
    /// Creates a configuration for the given base URL with default bounds.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_response_ms: DEFAULT_MAX_RESPONSE_MS,
        }
    }

    /// Builds a configuration from environment variables over defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("RESTPROBE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout_ms = env_u64("RESTPROBE_TIMEOUT_MS", DEFAULT_TIMEOUT_MS);
        let max_response_ms = env_u64("RESTPROBE_MAX_RESPONSE_MS", DEFAULT_MAX_RESPONSE_MS);

        Self {
            base_url,
            timeout_ms,
            max_response_ms,
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Sets the response-time bound.
    #[must_use]
    pub const fn with_max_response_ms(mut self, max_response_ms: u64) -> Self {
        self.max_response_ms = max_response_ms;
        self
    }

    /// Joins a rendered request path onto the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] if the base URL or the combined
    /// URL does not parse.
    pub fn join(&self, path: &str) -> DomainResult<Url> {
        let base = self.base_url.trim_end_matches('/');
        let full = format!("{base}{path}");
        Url::parse(&full).map_err(|e| DomainError::InvalidUrl(format!("{e}: {full}")))
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
