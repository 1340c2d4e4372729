//! Agent parameters: loop control.
//!
//! [`AgentParams`] groups the static parameters that control the decision
//! loop in [`Agent`](crate::agent::Agent).

use serde::{Deserialize, Serialize};

/// Agent loop control parameters.
///
/// | Field | Default | Effect |
/// |-------|---------|--------|
/// | `max_steps` | 10 | tool steps before the agent gives up |
/// | `temperature` | 0.0 | passed to every model request |
/// | `system_prompt` | none | custom system prompt template (`{{$tools}}` is the tool list) |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentParams {
    pub max_steps: usize,
    pub temperature: f32,
    pub system_prompt: Option<String>,
}

impl Default for AgentParams {
    fn default() -> Self {
        Self {
            max_steps: 10,
            temperature: 0.0,
            system_prompt: None,
        }
    }
}

impl AgentParams {
    // ==================== Builder Methods ====================

    pub fn with_max_steps(mut self, max: usize) -> Self {
        self.max_steps = max;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_system_prompt(mut self, template: impl Into<String>) -> Self {
        self.system_prompt = Some(template.into());
        self
    }
}
