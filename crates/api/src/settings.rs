//! Service Configuration
//!
//! Layers built-in defaults, an optional TOML file, and `CNC__`-prefixed
//! environment variables (`CNC__SERVER__BIND_ADDRESS=127.0.0.1:9000`).

use config::{Config, ConfigError, Environment, File};
use datasets::DatasetPaths;
use serde::{Deserialize, Serialize};

use crate::rate_limit::RateLimitConfig;

/// Default configuration file name, without extension
pub const DEFAULT_CONFIG_FILE: &str = "cnc-maintenance";

/// Top-level service settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub datasets: DatasetPaths,
    pub rate_limit: RateLimitConfig,
    pub preview: PreviewSettings,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Address to bind (default: 0.0.0.0:8080)
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Maximum level: trace, debug, info, warn, error
    pub level: String,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Dataset preview limits
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    /// Rows returned when the request names no limit
    pub default_rows: usize,
    /// Upper bound on requested rows
    pub max_rows: usize,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            default_rows: 5,
            max_rows: 100,
        }
    }
}

impl Settings {
    /// Load settings from `path` (or the default file) and the environment
    ///
    /// A missing file is not an error; defaults fill any unset key.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path.unwrap_or(DEFAULT_CONFIG_FILE)).required(path.is_some()))
            .add_source(
                Environment::with_prefix("CNC")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}
