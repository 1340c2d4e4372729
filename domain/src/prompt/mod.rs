//! Prompt domain
//!
//! `{{$variable}}` templates rendered against an execution context, and the
//! system/user prompts of the agent decision strategies.

pub mod agent;
mod template;

pub use agent::AgentPromptTemplate;
pub use template::PromptTemplate;
