//! Application configuration loaded from environment variables.

use axum::http::HeaderValue;
use serde::Deserialize;

use crate::error::{ApiError, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Comma-separated list of origins allowed to read responses cross-origin.
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,

    // === Mock Data ===
    /// Seed of the shared random source.
    #[serde(default = "default_rng_seed")]
    pub rng_seed: u64,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Emit JSON log lines.
    #[serde(default)]
    pub log_json: bool,
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "http://localhost:5173,http://localhost:5174".to_string()
}

fn default_rng_seed() -> u64 {
    42
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            cors_origin: default_cors_origin(),
            rng_seed: default_rng_seed(),
            rust_log: default_log_level(),
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(ApiError::InvalidConfig("PORT must not be 0".to_string()));
        }

        let origins = self.allowed_origins();
        if origins.is_empty() {
            return Err(ApiError::InvalidConfig(
                "CORS_ORIGIN must list at least one origin".to_string(),
            ));
        }

        if let Some(bad) = origins.iter().find(|o| HeaderValue::from_str(o).is_err()) {
            return Err(ApiError::InvalidConfig(format!(
                "CORS_ORIGIN entry {bad:?} is not a valid header value"
            )));
        }

        Ok(())
    }

    /// Allow-listed origins, trimmed, empty entries dropped.
    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_origin
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect()
    }
}
