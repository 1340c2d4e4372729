//! Configuration loading for toolweave
//!
//! Sources are merged in this order, later ones winning:
//!
//! 1. Default values
//! 2. Global: `<config dir>/toolweave/config.toml`
//! 3. Project root: `./toolweave.toml`
//! 4. `--config <path>` specified file
//! 5. `TOOLWEAVE_*` environment variables

mod error;
mod file_config;
mod loader;

pub use error::ConfigError;
pub use file_config::{
    FileAgentConfig, FileConfig, FileLoggingConfig, FileMapReduceConfig, LOG_LEVELS, StrategyKind,
};
pub use loader::{CONFIG_DIR_NAME, ConfigLoader, ENV_PREFIX, PROJECT_CONFIG_FILE};
