//! Agent domain module
//!
//! Actions an agent decides on and its lifecycle state. The loop that
//! produces them lives in the application layer.

pub mod entities;

pub use entities::{AgentAction, AgentState, FinishAction, ToolAction};
