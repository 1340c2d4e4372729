//! Application layer for toolweave
//!
//! This crate contains the composition tools, model-backed tools, the agent
//! loop and the ports they talk through. It depends only on the domain layer.

pub mod agent;
pub mod composition;
pub mod config;
pub mod ports;
pub mod tools;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use agent::{
    Agent, AgentStep, ChainOfThoughtStrategy, DecisionStrategy, FunctionCallingStrategy,
};
pub use composition::{MapReduce, Pipeline};
pub use config::AgentParams;
pub use ports::{
    language_model::{LanguageModel, ModelError},
    search_engine::{SearchEngine, SearchError, SearchHit},
};
pub use tools::{ExternalTool, PromptTool, QueryTool, SearchTool};
