//! Environment-backed application configuration
//!
//! Read once at startup. A missing API key is a fatal configuration error,
//! never a per-request one.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, bail};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_GEOCODING_URL: &str = "http://api.openweathermap.org";
const DEFAULT_ONECALL_URL: &str = "https://api.openweathermap.org";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Process configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// OpenWeatherMap API key (required)
    pub api_key: String,
    /// Port the web server binds
    pub port: u16,
    /// Base URL of the geocoding API
    pub geocoding_url: String,
    /// Base URL of the One Call forecast API
    pub onecall_url: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
    /// Retry attempts for transient server errors
    pub max_retries: u32,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// `OWM_API_KEY` must be set; everything else falls back to defaults.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("OWM_API_KEY").context("Missing OWM_API_KEY env var")?;
        if api_key.trim().is_empty() {
            bail!("OWM_API_KEY must not be empty");
        }

        let config = Self {
            api_key,
            port: read_or_default("WEATHERCAST_PORT", DEFAULT_PORT)?,
            geocoding_url: env::var("WEATHERCAST_GEOCODING_URL")
                .unwrap_or_else(|_| DEFAULT_GEOCODING_URL.to_string()),
            onecall_url: env::var("WEATHERCAST_ONECALL_URL")
                .unwrap_or_else(|_| DEFAULT_ONECALL_URL.to_string()),
            timeout_seconds: read_or_default("WEATHERCAST_TIMEOUT_SECONDS", DEFAULT_TIMEOUT_SECONDS)?,
            max_retries: read_or_default("WEATHERCAST_MAX_RETRIES", DEFAULT_MAX_RETRIES)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Per-request timeout as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Validate numeric ranges and URL shapes.
    fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 || self.timeout_seconds > 300 {
            bail!("Request timeout must be between 1 and 300 seconds");
        }
        if self.max_retries > 10 {
            bail!("Max retries cannot exceed 10");
        }
        for url in [&self.geocoding_url, &self.onecall_url] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                bail!("API base URL must be a valid HTTP or HTTPS URL: {url}");
            }
        }
        Ok(())
    }
}

fn read_or_default<T>(var: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(var) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("Invalid {var} value: {raw}")),
        Err(_) => Ok(default),
    }
}
