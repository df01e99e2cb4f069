//! Server configuration from the environment

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::application::config::{MAX_REFRESH_TTL, MAX_SESSION_TTL};
use platform::config::UpstreamConfig;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

const DEFAULT_JWT_TTL_HOURS: u64 = 24;
const DEFAULT_REFRESH_TTL_DAYS: u64 = 30;
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

const SECS_PER_HOUR: u64 = 3600;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Everything `main` needs to wire the gateway
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub upstream: UpstreamConfig,
    pub auth: AuthConfig,
    pub frontend_origins: Vec<String>,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let Some(supabase_url) = get("SUPABASE_URL") else {
            bail!("SUPABASE_URL must be set");
        };
        let Some(jwt_secret) = get("JWT_SECRET") else {
            bail!("JWT_SECRET must be set");
        };

        let service_key = get("SUPABASE_SERVICE_ROLE_KEY");
        if service_key.is_none() {
            tracing::warn!("SUPABASE_SERVICE_ROLE_KEY is not set, upstream calls will be rejected");
        }

        let jwt_ttl_hours = parse_or(get("JWT_TTL_HOURS"), "JWT_TTL_HOURS", DEFAULT_JWT_TTL_HOURS)?;
        let session_ttl = ttl(jwt_ttl_hours, SECS_PER_HOUR, MAX_SESSION_TTL, "JWT_TTL_HOURS")?;
        let refresh_ttl_days =
            parse_or(get("REFRESH_TTL_DAYS"), "REFRESH_TTL_DAYS", DEFAULT_REFRESH_TTL_DAYS)?;
        let refresh_ttl = ttl(refresh_ttl_days, SECS_PER_DAY, MAX_REFRESH_TTL, "REFRESH_TTL_DAYS")?;
        let timeout_secs = parse_or(
            get("UPSTREAM_TIMEOUT_SECS"),
            "UPSTREAM_TIMEOUT_SECS",
            DEFAULT_UPSTREAM_TIMEOUT_SECS,
        )?;
        let port = parse_or(get("PORT"), "PORT", DEFAULT_PORT)?;

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            upstream: UpstreamConfig::new(supabase_url, service_key)
                .with_timeout(Duration::from_secs(timeout_secs)),
            auth: AuthConfig::new(jwt_secret)
                .with_session_ttl(session_ttl)
                .with_refresh_ttl(refresh_ttl),
            frontend_origins,
            port,
        })
    }
}

/// `value` units of `unit_secs` each, within `1..=max`
fn ttl(value: u64, unit_secs: u64, max: Duration, key: &str) -> anyhow::Result<Duration> {
    value
        .checked_mul(unit_secs)
        .map(Duration::from_secs)
        .filter(|ttl| !ttl.is_zero() && *ttl <= max)
        .with_context(|| {
            format!(
                "{key} must be between 1 and {}, got {value}",
                max.as_secs() / unit_secs
            )
        })
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a number, got {raw:?}")),
        None => Ok(default),
    }
}
