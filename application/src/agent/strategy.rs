//! Decision strategy: turns model output into the next agent action

use async_trait::async_trait;
use toolweave_domain::{
    AgentAction, AgentPromptTemplate, FunctionDescriptor, Message, ModelResponse, ToolsCollection,
};

use crate::ports::language_model::{LanguageModel, ModelError};

/// Pluggable decision logic of an [`Agent`](super::Agent).
///
/// The agent owns the loop; a strategy only knows how to prompt the model and
/// how to read its replies. Parsing never fails: anything unusable becomes a
/// [`FinishAction`](toolweave_domain::FinishAction) carrying an error.
#[async_trait]
pub trait DecisionStrategy: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// System prompt describing the available tools
    fn system_prompt(&self, functions: &[FunctionDescriptor]) -> String;

    /// First user message for an objective
    fn user_prompt(&self, objective: &str) -> String {
        AgentPromptTemplate::objective(objective)
    }

    /// Ask the model for its next reply given the full history
    async fn request(
        &self,
        model: &dyn LanguageModel,
        history: &[Message],
        tools: &ToolsCollection,
        temperature: f32,
    ) -> Result<ModelResponse, ModelError>;

    /// Turn a reply into the next action
    fn parse_response(&mut self, response: &ModelResponse, tools: &ToolsCollection)
    -> AgentAction;

    /// Record the output of an executed tool
    fn observe(&mut self, _tool: &str, _output: &str) {}

    /// Forget everything from a previous objective
    fn reset(&mut self) {}
}
