//! Agent domain entities

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::context::ExecutionContext;
use crate::tool::traits::Tool;

/// Lifecycle state of an agent
///
/// ```text
/// Idle ──execute()──▶ Running ──Finish──▶ Finished
///                      │   ▲
///          empty output│   │update_agent_action_response()
///                      ▼   │
///                     Paused
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentState {
    #[default]
    Idle,
    Running,
    /// Waiting for the caller to run a tool and report its output
    Paused,
    Finished,
}

impl AgentState {
    pub fn as_str(&self) -> &str {
        match self {
            AgentState::Idle => "idle",
            AgentState::Running => "running",
            AgentState::Paused => "paused",
            AgentState::Finished => "finished",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AgentState::Finished)
    }
}

impl std::fmt::Display for AgentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Next thing an agent should do
#[derive(Debug, Clone)]
pub enum AgentAction {
    Tool(ToolAction),
    Finish(FinishAction),
}

impl AgentAction {
    pub fn is_finish(&self) -> bool {
        matches!(self, AgentAction::Finish(_))
    }

    pub fn as_tool(&self) -> Option<&ToolAction> {
        match self {
            AgentAction::Tool(action) => Some(action),
            AgentAction::Finish(_) => None,
        }
    }

    pub fn as_finish(&self) -> Option<&FinishAction> {
        match self {
            AgentAction::Finish(action) => Some(action),
            AgentAction::Tool(_) => None,
        }
    }

    pub fn rationale(&self) -> Option<&str> {
        match self {
            AgentAction::Tool(action) => action.rationale.as_deref(),
            AgentAction::Finish(action) => action.rationale.as_deref(),
        }
    }
}

impl From<ToolAction> for AgentAction {
    fn from(action: ToolAction) -> Self {
        AgentAction::Tool(action)
    }
}

impl From<FinishAction> for AgentAction {
    fn from(action: FinishAction) -> Self {
        AgentAction::Finish(action)
    }
}

/// Run `tool` with `context`
#[derive(Clone)]
pub struct ToolAction {
    pub tool: Arc<dyn Tool>,
    pub context: ExecutionContext,
    pub rationale: Option<String>,
}

impl ToolAction {
    pub fn new(tool: Arc<dyn Tool>, context: ExecutionContext) -> Self {
        Self {
            tool,
            context,
            rationale: None,
        }
    }

    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = Some(rationale.into());
        self
    }

    pub fn tool_name(&self) -> &str {
        self.tool.name()
    }

    /// Execute the tool against this action's own context.
    pub async fn execute(&mut self) -> String {
        self.tool.execute(&mut self.context).await
    }
}

impl std::fmt::Debug for ToolAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolAction")
            .field("tool", &self.tool.name())
            .field("context", &self.context)
            .field("rationale", &self.rationale)
            .finish()
    }
}

/// Terminal action: either a final output or an error
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishAction {
    pub output: Option<String>,
    pub error: Option<String>,
    pub rationale: Option<String>,
}

impl FinishAction {
    pub fn output(output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
            ..Default::default()
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Default::default()
        }
    }

    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = Some(rationale.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
