//! Environment-driven configuration.

use std::{env, fmt::Display, str::FromStr, time::Duration};

use ddi_checker_core::ControllerConfig;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base address of the drug service, without trailing slash
    pub base_url: String,
    pub debounce: Duration,
    /// Transport timeout per request
    pub request_timeout: Duration,
    /// Re-probe health on this interval; `None` probes once at start
    pub health_poll: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            health_poll: None,
        }
    }
}

impl Config {
    /// Read `DDI_*` environment variables, defaulting anything unset.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("DDI_API_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| {
                info!("DDI_API_BASE_URL not set, using default: {DEFAULT_BASE_URL}");
                DEFAULT_BASE_URL.to_string()
            });
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                key: "DDI_API_BASE_URL",
                value: base_url,
                reason: "expected an http(s) URL".into(),
            });
        }

        let debounce_ms: u64 = try_load(&lookup, "DDI_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS)?;
        let timeout_secs: u64 =
            try_load(&lookup, "DDI_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "DDI_REQUEST_TIMEOUT_SECS",
                value: "0".into(),
                reason: "must be positive".into(),
            });
        }
        let health_poll = match lookup("DDI_HEALTH_POLL_SECS") {
            Some(raw) => match parse::<u64>("DDI_HEALTH_POLL_SECS", &raw)? {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
            None => None,
        };

        Ok(Self {
            base_url,
            debounce: Duration::from_millis(debounce_ms),
            request_timeout: Duration::from_secs(timeout_secs),
            health_poll,
        })
    }

    pub fn controller(&self) -> ControllerConfig {
        ControllerConfig {
            debounce: self.debounce,
        }
    }
}

fn try_load<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => parse(key, &raw),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

fn parse<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: e.to_string(),
        }
    })
}
