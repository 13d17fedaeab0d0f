//! Process-start configuration.
//!
//! Provider credentials are resolved from the environment exactly once at
//! startup and handed to the effect layer - they are never embedded in
//! source and never read again at fetch time.

use std::env;
use std::fmt;

/// Environment variable holding the OpenWeatherMap API key
pub const OPENWEATHER_KEY_VAR: &str = "OPENWEATHER_API_KEY";

/// Environment variable holding the TomTom API key
pub const TOMTOM_KEY_VAR: &str = "TOMTOM_API_KEY";

/// API credential that never renders its value.
///
/// Use `expose()` only at the point the key is placed into a request URL.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey(••••••••)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "••••••••")
    }
}

/// Configuration error type
#[derive(Debug)]
pub enum ConfigError {
    MissingKey(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingKey(var) => {
                write!(f, "environment variable {} is not set or empty", var)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Everything the effect layer needs to issue provider requests
#[derive(Clone, Debug)]
pub struct Config {
    pub openweather_key: ApiKey,
    pub tomtom_key: ApiKey,
    /// Bounding radius (km) for the traffic incident query
    pub traffic_radius_km: u32,
}

impl Config {
    /// Resolve credentials from the environment. Fails fast so a missing
    /// key is a startup error, not a runtime fetch failure.
    pub fn from_env(traffic_radius_km: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            openweather_key: key_from_env(OPENWEATHER_KEY_VAR)?,
            tomtom_key: key_from_env(TOMTOM_KEY_VAR)?,
            traffic_radius_km,
        })
    }
}

fn key_from_env(var: &'static str) -> Result<ApiKey, ConfigError> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(ApiKey::new(value)),
        _ => Err(ConfigError::MissingKey(var)),
    }
}
