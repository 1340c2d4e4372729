//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for toolweave
#[derive(Parser, Debug)]
#[command(name = "toolweave")]
#[command(author, version, about = "Compose tools into pipelines and map-reduce jobs")]
#[command(long_about = r#"
toolweave runs builtin functions on their own, chained into a pipeline, or
fanned out over lists with map-reduce.

Arguments are given as name=value. Values that parse as JSON are passed as
JSON (numbers, arrays, objects); anything else is passed as text.

Configuration files are loaded from (later sources win):
1. <config dir>/toolweave/config.toml   Global config
2. ./toolweave.toml                     Project-level config
3. --config <path>                      Explicit config file
4. TOOLWEAVE_* environment variables    (TOOLWEAVE_AGENT__MAX_STEPS=5)

Example:
  toolweave functions
  toolweave call add --arg a=5.4 --arg b=4.8
  toolweave pipeline --stage add --stage 'prompt:The sum is {{$sum}}.' --arg a=1 --arg b=2
  toolweave map-reduce --mapper string_length --reducer sum --arg 'text=["Apple","Pear"]'
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files and environment overrides
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the builtin functions' schemas as JSON
    Functions,

    /// Execute one builtin function
    Call {
        /// Function name
        tool: String,

        /// Parameter as name=value (repeatable)
        #[arg(short, long = "arg", value_name = "NAME=VALUE")]
        args: Vec<String>,
    },

    /// Run tools in sequence, each output feeding the next stage
    Pipeline {
        /// Function name, or prompt:<template> for a prompt stage (repeatable, in order)
        #[arg(short, long = "stage", value_name = "STAGE", required = true)]
        stages: Vec<String>,

        /// Parameter as name=value (repeatable)
        #[arg(short, long = "arg", value_name = "NAME=VALUE")]
        args: Vec<String>,
    },

    /// Run a mapper over list arguments, then reduce the outputs
    MapReduce {
        /// Function applied to each element
        #[arg(long, value_name = "TOOL")]
        mapper: String,

        /// Function receiving the list of mapper outputs
        #[arg(long, value_name = "TOOL")]
        reducer: String,

        /// Parameter as name=<json list> (repeatable)
        #[arg(short, long = "arg", value_name = "NAME=VALUE")]
        args: Vec<String>,

        /// Mapper calls in flight at once (0 = unbounded), overrides the config
        #[arg(long, value_name = "N")]
        max_concurrency: Option<usize>,
    },

    /// Show configuration sources and the effective configuration
    Config,
}
