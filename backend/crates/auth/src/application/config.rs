//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

use crate::error::{AuthError, AuthResult};

/// Default session token lifetime (24 hours)
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 3600);

/// Default refresh token lifetime (30 days)
pub const DEFAULT_REFRESH_TTL: Duration = Duration::from_secs(30 * 24 * 3600);

/// Longest accepted session token lifetime (1 year)
pub const MAX_SESSION_TTL: Duration = Duration::from_secs(365 * 24 * 3600);

/// Longest accepted refresh token lifetime (10 years)
pub const MAX_REFRESH_TTL: Duration = Duration::from_secs(3650 * 24 * 3600);

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret for session tokens
    pub jwt_secret: String,
    /// Session token lifetime
    pub session_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_ttl: Duration,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            session_ttl: DEFAULT_SESSION_TTL,
            refresh_ttl: DEFAULT_REFRESH_TTL,
        }
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    pub fn with_refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = ttl;
        self
    }

    /// Reject an empty secret and lifetimes outside `1s..=MAX_*_TTL`
    pub fn validate(&self) -> AuthResult<()> {
        if self.jwt_secret.is_empty() {
            return Err(AuthError::Internal("JWT secret must not be empty".into()));
        }
        check_ttl("session", self.session_ttl, MAX_SESSION_TTL)?;
        check_ttl("refresh", self.refresh_ttl, MAX_REFRESH_TTL)
    }

    pub fn refresh_ttl_chrono(&self) -> AuthResult<chrono::Duration> {
        chrono::Duration::from_std(self.refresh_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid refresh TTL: {e}")))
    }
}

fn check_ttl(name: &str, ttl: Duration, max: Duration) -> AuthResult<()> {
    if ttl.is_zero() || ttl > max {
        return Err(AuthError::Internal(format!(
            "{name} TTL must be between 1s and {}s, got {}s",
            max.as_secs(),
            ttl.as_secs()
        )));
    }
    Ok(())
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("session_ttl", &self.session_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}
