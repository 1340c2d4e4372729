//! Tracing subscriber setup

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use toolweave_infrastructure::FileLoggingConfig;

/// Level filter for a `-v` count. Without `-v`, `RUST_LOG` wins over the
/// configured level.
pub fn filter_for(verbose: u8, config: &FileLoggingConfig) -> EnvFilter {
    match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level)),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Install the global subscriber: stderr always, plus a file when one is
/// given on the command line or in the config.
///
/// The returned guard flushes the file writer on drop; keep it alive until exit.
pub fn init(
    verbose: u8,
    config: &FileLoggingConfig,
    log_file: Option<&Path>,
) -> Result<Option<WorkerGuard>> {
    let file = log_file.map(Path::to_path_buf).or_else(|| config.file.clone());

    let (file_layer, guard) = match file {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(file_appender(&path)?);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter_for(verbose, config))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .try_init()
        .context("Failed to install the log subscriber")?;

    Ok(guard)
}

fn file_appender(path: &Path) -> Result<RollingFileAppender> {
    let name = path
        .file_name()
        .ok_or_else(|| anyhow!("Invalid log file path: {}", path.display()))?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name.to_string_lossy())
        .build(dir)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_flags_override_config() {
        let config = FileLoggingConfig {
            level: "error".to_string(),
            file: None,
        };

        assert_eq!(filter_for(1, &config).to_string(), "info");
        assert_eq!(filter_for(2, &config).to_string(), "debug");
        assert_eq!(filter_for(5, &config).to_string(), "trace");
    }

    #[test]
    fn test_file_appender_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("toolweave.log");

        file_appender(&path).unwrap();

        assert!(dir.path().join("logs").is_dir());
    }

    #[test]
    fn test_file_appender_rejects_directory_path() {
        assert!(file_appender(Path::new("/")).is_err());
    }
}
