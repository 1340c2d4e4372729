//! Raw TOML configuration data types
//!
//! These structs mirror the config file exactly. Every section is optional;
//! missing fields fall back to their defaults.

mod agent;
mod logging;
mod map_reduce;

pub use agent::{FileAgentConfig, StrategyKind};
pub use logging::{FileLoggingConfig, LOG_LEVELS};
pub use map_reduce::FileMapReduceConfig;

use serde::{Deserialize, Serialize};
use toolweave_application::AgentParams;

use super::error::ConfigError;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Agent loop settings
    pub agent: FileAgentConfig,
    /// Map-reduce settings
    pub map_reduce: FileMapReduceConfig,
    /// Logging settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning every problem found.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.agent.validate();
        errors.extend(self.logging.validate());
        errors
    }

    pub fn agent_params(&self) -> AgentParams {
        self.agent.to_agent_params()
    }
}
