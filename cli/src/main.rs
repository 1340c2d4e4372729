//! CLI entrypoint for toolweave
//!
//! Wires the layers together: configuration and builtin functions from the
//! infrastructure layer, composition from the application layer.

mod args;
mod commands;
mod logging;

use anyhow::Result;
use args::Cli;
use clap::Parser;
use toolweave_infrastructure::ConfigLoader;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };

    // Held until exit so buffered file logs are flushed
    let _log_guard = logging::init(cli.verbose, &config.logging, cli.log_file.as_deref())?;

    info!(command = ?cli.command, "Starting toolweave");

    let output = commands::run(cli.command, &config).await?;
    println!("{}", output);

    Ok(())
}
