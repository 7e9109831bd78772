//! Web configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! ## Server
//! - `AGROW_HOST` - Bind address (default: 127.0.0.1)
//! - `AGROW_PORT` - Listen port (default: 3000)
//! - `AGROW_BASE_URL` - Public URL (default: <http://localhost:3000>)
//! - `STATIC_DIR` - Directory served under `/static`, relative to the working
//!   directory (default: `crates/web/static`)
//!
//! ## Weather provider
//! - `WEATHER_API_KEY` - Forecast API key. Without it the weather panel reports
//!   that the forecast is not configured.
//! - `WEATHER_API_BASE_URL` - Provider base URL (default: <https://api.tomorrow.io>)
//! - `WEATHER_FALLBACK_LOCATION` - Location used when the user has no district
//!   or city (default: `18.5204,73.8567`, Pune)
//!
//! ## Market price provider
//! - `MARKET_API_BASE_URL` - Open data base URL (default: <https://api.data.gov.in>)
//! - `MARKET_RESOURCE_ID` - Daily mandi price resource
//! - `MARKET_API_KEY` - API key (default: the public sample key)
//! - `MARKET_STATE` - State filter sent to the provider (default: Maharashtra)
//! - `MARKET_LIMIT` - Maximum records per fetch (default: 100)
//! - `MARKET_CACHE_TTL_SECS` - Cache lifetime of a fetched set (default: 300)
//!
//! ## Misc
//! - `HTTP_TIMEOUT_SECS` - Timeout for every outbound request (default: 10)
//! - `DIAGNOSIS_DELAY_MS` - Simulated analysis time (default: 1500)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `LOG_FORMAT` - `json` for JSON log lines (read by the binary)
//! - `RUST_LOG` - Log filter (default: `agrow_web=info,tower_http=debug`)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Public sample key published by data.gov.in for anonymous access.
const DEFAULT_MARKET_API_KEY: &str = "579b464db66ec23bdd00000156ada50532e9494e7b6db332a28584ed";

/// Daily commodity prices from AGMARKNET.
const DEFAULT_MARKET_RESOURCE_ID: &str = "9ef84268-d588-465a-a308-a864a43d0070";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Agrow web application configuration.
#[derive(Debug, Clone)]
pub struct AgrowConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL
    pub base_url: String,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Weather provider configuration
    pub weather: WeatherConfig,
    /// Market price provider configuration
    pub market: MarketConfig,
    /// Timeout applied to every outbound HTTP request
    pub http_timeout: Duration,
    /// Simulated disease analysis time
    pub diagnosis_delay: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Weather forecast provider configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct WeatherConfig {
    pub base_url: String,
    /// `None` puts the weather panel into its not-configured state.
    pub api_key: Option<SecretString>,
    /// Location sent when neither a district nor a city is known.
    pub fallback_location: String,
}

impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("base_url", &self.base_url)
            .field(
                "api_key",
                &self.api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("fallback_location", &self.fallback_location)
            .finish()
    }
}

/// Government market price provider configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct MarketConfig {
    pub base_url: String,
    pub resource_id: String,
    pub api_key: SecretString,
    /// Value of the provider's `filters[state.keyword]` parameter.
    pub state: String,
    pub limit: u32,
    pub cache_ttl: Duration,
}

impl std::fmt::Debug for MarketConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketConfig")
            .field("base_url", &self.base_url)
            .field("resource_id", &self.resource_id)
            .field("api_key", &"[REDACTED]")
            .field("state", &self.state)
            .field("limit", &self.limit)
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

impl AgrowConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or_default::<IpAddr>("AGROW_HOST", "127.0.0.1")?;
        let port = parse_env_or_default::<u16>("AGROW_PORT", "3000")?;
        let base_url = get_env_or_default("AGROW_BASE_URL", "http://localhost:3000");
        let http_timeout =
            Duration::from_secs(parse_env_or_default::<u64>("HTTP_TIMEOUT_SECS", "10")?);
        let diagnosis_delay =
            Duration::from_millis(parse_env_or_default::<u64>("DIAGNOSIS_DELAY_MS", "1500")?);

        Ok(Self {
            host,
            port,
            base_url,
            static_dir: PathBuf::from(get_env_or_default("STATIC_DIR", "crates/web/static")),
            weather: WeatherConfig::from_env(),
            market: MarketConfig::from_env()?,
            http_timeout,
            diagnosis_delay,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies must carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl WeatherConfig {
    fn from_env() -> Self {
        Self {
            base_url: get_env_or_default("WEATHER_API_BASE_URL", "https://api.tomorrow.io"),
            api_key: get_optional_env("WEATHER_API_KEY").map(SecretString::from),
            fallback_location: get_env_or_default("WEATHER_FALLBACK_LOCATION", "18.5204,73.8567"),
        }
    }
}

impl MarketConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: get_env_or_default("MARKET_API_BASE_URL", "https://api.data.gov.in"),
            resource_id: get_env_or_default("MARKET_RESOURCE_ID", DEFAULT_MARKET_RESOURCE_ID),
            api_key: SecretString::from(get_env_or_default(
                "MARKET_API_KEY",
                DEFAULT_MARKET_API_KEY,
            )),
            state: get_env_or_default("MARKET_STATE", "Maharashtra"),
            limit: parse_env_or_default::<u32>("MARKET_LIMIT", "100")?,
            cache_ttl: Duration::from_secs(parse_env_or_default::<u64>(
                "MARKET_CACHE_TTL_SECS",
                "300",
            )?),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating an empty value as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn market_config() -> MarketConfig {
        MarketConfig {
            base_url: "https://api.data.gov.in".to_string(),
            resource_id: DEFAULT_MARKET_RESOURCE_ID.to_string(),
            api_key: SecretString::from("super_secret_market_key"),
            state: "Maharashtra".to_string(),
            limit: 100,
            cache_ttl: Duration::from_secs(300),
        }
    }

    #[test]
    fn test_parse_value_valid() {
        let port: u16 = parse_value("AGROW_PORT", " 8080 ").unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_parse_value_invalid() {
        let result = parse_value::<u16>("AGROW_PORT", "eighty");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(key, _)) if key == "AGROW_PORT"));
    }

    #[test]
    fn test_socket_addr() {
        let config = AgrowConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            static_dir: PathBuf::from("crates/web/static"),
            weather: WeatherConfig {
                base_url: "https://api.tomorrow.io".to_string(),
                api_key: None,
                fallback_location: "18.5204,73.8567".to_string(),
            },
            market: market_config(),
            http_timeout: Duration::from_secs(10),
            diagnosis_delay: Duration::ZERO,
            sentry_dsn: None,
            sentry_environment: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
        assert!(!config.is_secure());
    }

    #[test]
    fn test_weather_config_debug_redacts_key() {
        let config = WeatherConfig {
            base_url: "https://api.tomorrow.io".to_string(),
            api_key: Some(SecretString::from("super_secret_weather_key")),
            fallback_location: "Pune".to_string(),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("api.tomorrow.io"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_weather_key"));
    }

    #[test]
    fn test_market_config_debug_redacts_key() {
        let debug_output = format!("{:?}", market_config());
        assert!(debug_output.contains("Maharashtra"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_market_key"));
    }
}
