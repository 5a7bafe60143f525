//! Runtime settings, read once at startup from the environment.
//!
//! Every variable is optional; unset or blank means the default:
//! - `STORE_HOST` - Bind address (default: 127.0.0.1)
//! - `STORE_PORT` - Listen port (default: 3000)
//! - `STORE_CATALOG_PATH` - JSON or YAML catalog file (default: built-in catalog)
//! - `STORE_RATE_LIMIT_PER_SECOND` - Seconds to replenish one request token per client (default: 1)
//! - `STORE_RATE_LIMIT_BURST` - Requests a client may burst (default: 50)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate, 0.0 to 1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0 to 1.0 (default: 0.0)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

/// A variable was set but unusable.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Everything `main` needs to start the server.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Bind address
    pub host: IpAddr,
    /// Listen port
    pub port: u16,
    /// Catalog file to seed the inventory from
    pub catalog_path: Option<PathBuf>,
    /// Per-client rate limiting
    pub rate_limit: RateLimitConfig,
    /// Sentry error tracking
    pub sentry: SentryConfig,
}

/// Per-client rate limit settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Seconds between token replenishments
    pub per_second: u64,
    /// Maximum burst of requests
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_second: 1,
            burst_size: 50,
        }
    }
}

/// Sentry configuration.
///
/// Implements `Debug` manually to redact the DSN.
#[derive(Clone)]
pub struct SentryConfig {
    /// DSN; Sentry is disabled when absent
    pub dsn: Option<SecretString>,
    /// Environment name (e.g., "production")
    pub environment: Option<String>,
    /// Error event sample rate
    pub sample_rate: f32,
    /// Performance transaction sample rate
    pub traces_sample_rate: f32,
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            dsn: None,
            environment: None,
            sample_rate: 1.0,
            traces_sample_rate: 0.0,
        }
    }
}

impl std::fmt::Debug for SentryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentryConfig")
            .field("dsn", &self.dsn.as_ref().map(|_| "[REDACTED]"))
            .field("environment", &self.environment)
            .field("sample_rate", &self.sample_rate)
            .field("traces_sample_rate", &self.traces_sample_rate)
            .finish()
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            catalog_path: None,
            rate_limit: RateLimitConfig::default(),
            sentry: SentryConfig::default(),
        }
    }
}

impl StorefrontConfig {
    /// Read the settings listed in the module docs, after merging a `.env`
    /// file from the working directory if one exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed or is
    /// out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env is normal
        dotenvy::dotenv().ok();

        let host = parse_env_or_default("STORE_HOST", "127.0.0.1")?;
        let port = parse_env_or_default("STORE_PORT", "3000")?;
        let catalog_path = get_optional_env("STORE_CATALOG_PATH").map(PathBuf::from);

        let rate_limit = RateLimitConfig {
            per_second: parse_env_or_default("STORE_RATE_LIMIT_PER_SECOND", "1")?,
            burst_size: parse_env_or_default("STORE_RATE_LIMIT_BURST", "50")?,
        };
        require_positive("STORE_RATE_LIMIT_PER_SECOND", rate_limit.per_second)?;
        require_positive("STORE_RATE_LIMIT_BURST", u64::from(rate_limit.burst_size))?;

        let sentry = SentryConfig {
            dsn: get_optional_env("SENTRY_DSN").map(SecretString::from),
            environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sample_rate: parse_rate("SENTRY_SAMPLE_RATE", "1.0")?,
            traces_sample_rate: parse_rate("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        };

        Ok(Self {
            host,
            port,
            catalog_path,
            rate_limit,
            sentry,
        })
    }

    /// `host:port` to bind.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Env parsing
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// The variable's value, or `default` when unset.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable (or its default) into `T`.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a sample rate in `[0.0, 1.0]`.
fn parse_rate(key: &str, default: &str) -> Result<f32, ConfigError> {
    let rate: f32 = parse_env_or_default(key, default)?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ));
    }
    Ok(rate)
}

fn require_positive(key: &str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
