//! Application-level configuration.
//!
//! - [`AgentParams`]: agent loop control (step budget, temperature, system prompt)

pub mod agent_params;

pub use agent_params::AgentParams;
