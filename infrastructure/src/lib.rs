//! Infrastructure layer for toolweave
//!
//! This crate contains adapters for the application layer: native function
//! tools and the builtin function set, an in-memory search engine, and
//! configuration file loading.

pub mod config;
pub mod functions;
pub mod search;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileAgentConfig, FileConfig, FileLoggingConfig,
    FileMapReduceConfig, StrategyKind,
};
pub use functions::{BuiltinFunctions, FunctionTool, builtin_collection};
pub use search::InMemorySearchEngine;
