//! Configuration file loader with multi-source merging

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use tracing::debug;

use super::error::ConfigError;
use super::file_config::FileConfig;

/// Directory under the platform config dir holding the global config
pub const CONFIG_DIR_NAME: &str = "toolweave";

/// Project-level config file, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "toolweave.toml";

/// Prefix of environment variable overrides (`TOOLWEAVE_AGENT__MAX_STEPS=5`)
pub const ENV_PREFIX: &str = "TOOLWEAVE_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `TOOLWEAVE_*` environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./toolweave.toml`
    /// 4. Global: `<config dir>/toolweave/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
        if let Some(path) = config_path
            && !path.exists()
        {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        Self::extract(&Self::figment(config_path))
    }

    /// Build the layered figment without extracting it
    pub fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!(path = %global_path.display(), "Merging global config");
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            debug!(path = %project_path.display(), "Merging project config");
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = config_path {
            debug!(path = %path.display(), "Merging explicit config");
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extract and validate a configuration
    pub fn extract(figment: &Figment) -> Result<FileConfig, ConfigError> {
        let config: FileConfig = figment.extract().map_err(Box::new)?;

        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    /// Load only default configuration
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        let path = PathBuf::from(PROJECT_CONFIG_FILE);
        path.exists().then_some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.agent.max_steps, 10);
        assert_eq!(config.map_reduce.max_concurrency, 0);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains(CONFIG_DIR_NAME));
        assert!(path.ends_with("config.toml"));
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let file = config_file("[agent]\nmax_steps = 3\n\n[map_reduce]\nmax_concurrency = 2\n");

        let figment = Figment::from(Serialized::defaults(FileConfig::default()))
            .merge(Toml::file(file.path()));
        let config = ConfigLoader::extract(&figment).unwrap();

        assert_eq!(config.agent.max_steps, 3);
        assert_eq!(config.agent.temperature, 0.0);
        assert_eq!(config.map_reduce.max_concurrency, 2);
    }

    #[test]
    fn test_later_layers_win() {
        let base = config_file("[agent]\nmax_steps = 3\ntemperature = 0.5\n");
        let over = config_file("[agent]\nmax_steps = 7\n");

        let figment = Figment::from(Serialized::defaults(FileConfig::default()))
            .merge(Toml::file(base.path()))
            .merge(Toml::file(over.path()));
        let config = ConfigLoader::extract(&figment).unwrap();

        assert_eq!(config.agent.max_steps, 7);
        assert_eq!(config.agent.temperature, 0.5);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let file = config_file("[agent]\nmax_steps = 0\ntemperature = 4.0\n");

        let figment = Figment::from(Serialized::defaults(FileConfig::default()))
            .merge(Toml::file(file.path()));
        let err = ConfigLoader::extract(&figment).unwrap_err();

        match err {
            ConfigError::Invalid(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_file_is_a_load_error() {
        let file = config_file("[agent\nmax_steps = ");

        let figment = Figment::from(Serialized::defaults(FileConfig::default()))
            .merge(Toml::file(file.path()));

        assert!(matches!(
            ConfigLoader::extract(&figment),
            Err(ConfigError::Load(_))
        ));
    }

    #[test]
    fn test_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        let err = ConfigLoader::load(Some(missing.as_path())).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(path) if path == missing));
    }
}
