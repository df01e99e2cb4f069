//! Upstream platform configuration
//!
//! Read once at startup and passed to [`crate::upstream::HttpTransport`].

use std::fmt;
use std::time::Duration;

use crate::query::QueryParams;

/// Default bound on a single upstream call
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the upstream backend-as-a-service platform
#[derive(Clone)]
pub struct UpstreamConfig {
    /// Base URL, e.g. `https://<project>.supabase.co`
    base_url: String,
    /// Service-role credential. Optional: without it every call is rejected
    /// by the provider, but the gateway still starts.
    service_key: Option<String>,
    /// Per-request timeout
    timeout: Duration,
}

impl UpstreamConfig {
    pub fn new(base_url: impl Into<String>, service_key: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            service_key: service_key.filter(|k| !k.is_empty()),
            timeout: DEFAULT_UPSTREAM_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Service key, empty when not configured
    pub fn service_key(&self) -> &str {
        self.service_key.as_deref().unwrap_or_default()
    }

    pub fn has_service_key(&self) -> bool {
        self.service_key.is_some()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full URL for `path` plus rendered query
    pub fn url_for(&self, path: &str, query: &QueryParams) -> String {
        format!("{}{}{}", self.base_url, path, query)
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("service_key", &self.service_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}
