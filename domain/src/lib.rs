//! Domain layer for toolweave
//!
//! This crate contains the core abstractions of the tool engine.
//! It has no dependencies on language models, I/O or configuration.
//!
//! # Core Concepts
//!
//! ## Tools
//!
//! Every executable unit (prompt renderer, model query, native function,
//! search, pipeline, map-reduce) implements [`Tool`] and is interchangeable
//! behind `Arc<dyn Tool>`. The provided [`Tool::execute`] validates
//! parameters, runs the core logic, records `Result.<name>` in the
//! [`ExecutionContext`] and never fails: errors come back as `ERROR:` strings.
//!
//! ## Agent Actions
//!
//! An agent step is an [`AgentAction`]: run a tool, or finish with an output
//! or an error.

pub mod agent;
pub mod context;
pub mod core;
pub mod prompt;
pub mod session;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use agent::{AgentAction, AgentState, FinishAction, ToolAction};
pub use context::{ExecutionContext, INPUT_PREFIX, RESULT_PREFIX, result_key};
pub use core::error::DomainError;
pub use prompt::{AgentPromptTemplate, PromptTemplate};
pub use session::{FunctionCall, Message, ModelResponse, Role};
pub use tool::{
    ERROR_PREFIX, FunctionDescriptor, ParameterDescriptor, ProviderError, ScalarType, Tool,
    ToolError, ToolSet, ToolsCollection, TypeDescriptor, error_sentinel, is_error_output,
    number_value, serialize_output,
};
