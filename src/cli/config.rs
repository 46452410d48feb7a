//! Configuration file
//!
//! ```json
//! {
//!   "data_file": "./data/knowledge.json",
//!   "max_condition_depth": 64,
//!   "session_idle_secs": 3600,
//!   "log_format": "pretty",
//!   "http": {"host": "0.0.0.0", "port": 3001, "cors_origins": ["http://localhost:5173"]}
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::api::ServiceOptions;
use crate::condition::MAX_CONDITION_DEPTH;
use crate::http_server::HttpServerConfig;
use crate::observability::LogFormat;

use super::errors::{CliError, CliResult};

/// Longest accepted idle window: one year
pub const MAX_SESSION_IDLE_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Knowledge store file (required). Relative paths are resolved
    /// against the config file's directory.
    pub data_file: PathBuf,

    /// Deepest condition nesting accepted (optional, default 64)
    #[serde(default = "default_max_condition_depth")]
    pub max_condition_depth: usize,

    /// Idle seconds before a session may be purged (optional, default 1h)
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,

    #[serde(default)]
    pub log_format: LogFormat,

    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_max_condition_depth() -> usize {
    MAX_CONDITION_DEPTH
}
fn default_session_idle_secs() -> u64 {
    3600
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let mut config = Self::from_json(&content)?;

        if config.data_file.is_relative() {
            if let Some(base) = path.parent() {
                config.data_file = base.join(&config.data_file);
            }
        }

        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(CliError::config_error("data_file must not be empty"));
        }

        if self.max_condition_depth == 0 || self.max_condition_depth > MAX_CONDITION_DEPTH {
            return Err(CliError::config_error(format!(
                "max_condition_depth must be between 1 and {}",
                MAX_CONDITION_DEPTH
            )));
        }

        if self.session_idle_secs == 0 || self.session_idle_secs > MAX_SESSION_IDLE_SECS {
            return Err(CliError::config_error(format!(
                "session_idle_secs must be between 1 and {}",
                MAX_SESSION_IDLE_SECS
            )));
        }

        self.http
            .validate()
            .map_err(|e| CliError::config_error(e.to_string()))
    }

    pub fn service_options(&self) -> ServiceOptions {
        let idle_secs = self.session_idle_secs.min(MAX_SESSION_IDLE_SECS) as i64;
        ServiceOptions {
            max_condition_depth: self.max_condition_depth,
            session_idle: chrono::Duration::seconds(idle_secs),
        }
    }
}
