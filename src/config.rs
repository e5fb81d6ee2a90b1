//! Application configuration loaded from environment variables.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::Result;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    // === Upstream ===
    /// Base URL of the river-level API. River paths are appended verbatim.
    #[serde(default = "default_river_api_base")]
    pub river_api_base: String,

    /// Timeout applied to each upstream fetch, in milliseconds.
    #[serde(default = "default_upstream_timeout_ms")]
    pub upstream_timeout_ms: u64,

    // === Observability ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Expose Prometheus metrics on `/metrics`.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_port() -> u16 {
    8080
}

fn default_river_api_base() -> String {
    "https://docker-blue-sound-1751.fly.dev".to_string()
}

fn default_upstream_timeout_ms() -> u64 {
    10_000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            river_api_base: default_river_api_base(),
            upstream_timeout_ms: default_upstream_timeout_ms(),
            rust_log: default_log_level(),
            metrics_enabled: default_true(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Build configuration from explicit `(NAME, value)` pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter(vars)?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let base = Url::parse(&self.river_api_base)
            .map_err(|e| format!("RIVER_API_BASE is not a valid URL: {e}"))?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err("RIVER_API_BASE must use http or https".to_string());
        }

        if self.river_api_base.ends_with('/') {
            return Err("RIVER_API_BASE must not end with '/'".to_string());
        }

        if self.upstream_timeout_ms == 0 {
            return Err("UPSTREAM_TIMEOUT_MS must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Per-fetch upstream timeout.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }
}
