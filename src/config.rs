//! Client configuration.
//!
//! Values are layered from lowest to highest precedence: built-in defaults,
//! an optional TOML file, the `TICTACTOE_API_URL` environment variable, and
//! finally whatever the caller sets explicitly (the CLI flags).

use std::path::Path;
use std::time::Duration;

use derive_getters::Getters;
use derive_setters::Setters;
use meta_tictactoe_protocol::Player;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::ConfigError;

/// Environment variable overriding the service base URL.
pub const API_URL_ENV: &str = "TICTACTOE_API_URL";

/// Local development endpoint used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Configuration injected into the HTTP client at construction.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL of the game service, without a trailing slash.
    #[serde(default = "default_api_url")]
    #[setters(skip)]
    api_url: String,

    /// Player sent as `starting_player` when creating sessions.
    #[serde(default = "default_starting_player")]
    starting_player: Player,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    request_timeout_ms: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_starting_player() -> Player {
    Player::X
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            starting_player: default_starting_player(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration pointing at `api_url`.
    #[instrument(skip(api_url))]
    pub fn new(api_url: impl AsRef<str>) -> Result<Self, ConfigError> {
        Self::default().with_api_url(api_url)
    }

    /// Replaces the base URL after validating and normalizing it.
    pub fn with_api_url(mut self, api_url: impl AsRef<str>) -> Result<Self, ConfigError> {
        self.api_url = normalize_api_url(api_url.as_ref())?;
        Ok(self)
    }

    /// Loads configuration from a TOML file.
    ///
    /// A missing file yields the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            info!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        debug!("Loading config from file");
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        if config.request_timeout_ms == 0 {
            return Err(ConfigError::new(
                "request_timeout_ms must be greater than zero",
            ));
        }

        // Re-validate whatever the file put in api_url.
        let api_url = config.api_url.clone();
        let config = config.with_api_url(api_url)?;

        info!(api_url = %config.api_url, "Config loaded successfully");
        Ok(config)
    }

    /// Applies environment overrides read through `lookup`.
    ///
    /// The binary passes `std::env::var`; tests pass a closure over a map.
    #[instrument(skip(self, lookup))]
    pub fn apply_env<F>(self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(API_URL_ENV) {
            Some(url) if !url.trim().is_empty() => {
                debug!(api_url = %url, "Overriding API URL from environment");
                self.with_api_url(url)
            }
            _ => Ok(self),
        }
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Validates a base URL and strips trailing slashes.
#[instrument]
pub fn normalize_api_url(url: &str) -> Result<String, ConfigError> {
    let trimmed = url.trim().trim_end_matches('/');
    let has_host = ["http://", "https://"]
        .iter()
        .any(|scheme| trimmed.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty()));
    if !has_host {
        return Err(ConfigError::new(format!(
            "API URL must be an http(s) URL with a host, got {:?}",
            url
        )));
    }
    Ok(trimmed.to_string())
}
