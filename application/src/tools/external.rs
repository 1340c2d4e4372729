//! External tool: executed by the caller, not in-process

use async_trait::async_trait;
use serde_json::Value;
use toolweave_domain::{ExecutionContext, FunctionDescriptor, Tool, ToolError};

/// A tool only the caller can run (user interaction, a remote system, ...).
///
/// Its output is always empty, which pauses an agent until the caller reports
/// the real output through `Agent::update_agent_action_response`.
pub struct ExternalTool {
    descriptor: FunctionDescriptor,
}

impl ExternalTool {
    pub fn new(descriptor: FunctionDescriptor) -> Self {
        Self { descriptor }
    }
}

#[async_trait]
impl Tool for ExternalTool {
    fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, _context: &mut ExecutionContext) -> Result<Value, ToolError> {
        Ok(Value::String(String::new()))
    }
}
