//! Executed agent steps

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One executed tool call of an agent run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentStep {
    pub tool: String,
    pub rationale: Option<String>,
    pub output: String,
    pub timestamp: DateTime<Utc>,
}

impl AgentStep {
    pub fn new(tool: impl Into<String>, rationale: Option<String>, output: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            rationale,
            output: output.into(),
            timestamp: Utc::now(),
        }
    }
}
