//! Logging configuration from TOML (`[logging]` section)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;

/// Level names accepted in `logging.level`
pub const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Raw logging configuration from TOML
///
/// ```toml
/// [logging]
/// level = "info"
/// file = "/tmp/toolweave.log"
/// ```
///
/// `RUST_LOG` and `-v` flags on the command line take precedence over `level`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Default level filter
    pub level: String,
    /// Also write logs to this file
    pub file: Option<PathBuf>,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

impl FileLoggingConfig {
    pub fn validate(&self) -> Vec<ConfigError> {
        if LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            Vec::new()
        } else {
            vec![ConfigError::invalid_value(
                "logging.level",
                format!(
                    "unknown level '{}', expected one of {}",
                    self.level,
                    LOG_LEVELS.join(", ")
                ),
            )]
        }
    }
}
