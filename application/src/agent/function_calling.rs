//! Function-calling strategy
//!
//! The model is offered every tool as a function schema and answers either
//! with text (the objective is done) or with a function call.

use async_trait::async_trait;
use toolweave_domain::{
    AgentAction, AgentPromptTemplate, ExecutionContext, FinishAction, FunctionDescriptor, Message,
    ModelResponse, ToolAction, ToolsCollection,
};
use tracing::debug;

use super::strategy::DecisionStrategy;
use crate::ports::language_model::{LanguageModel, ModelError};

#[derive(Debug, Default)]
pub struct FunctionCallingStrategy;

impl FunctionCallingStrategy {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DecisionStrategy for FunctionCallingStrategy {
    fn name(&self) -> &str {
        "function_calling"
    }

    fn system_prompt(&self, functions: &[FunctionDescriptor]) -> String {
        AgentPromptTemplate::function_calling_system(functions)
    }

    async fn request(
        &self,
        model: &dyn LanguageModel,
        history: &[Message],
        tools: &ToolsCollection,
        temperature: f32,
    ) -> Result<ModelResponse, ModelError> {
        model
            .get_response_with_functions(history, &tools.function_schemas(), temperature)
            .await
    }

    fn parse_response(
        &mut self,
        response: &ModelResponse,
        tools: &ToolsCollection,
    ) -> AgentAction {
        match response {
            ModelResponse::Done { text } | ModelResponse::Partial { text } => {
                FinishAction::output(text.clone()).into()
            }
            ModelResponse::Failed { reason } => {
                FinishAction::error(format!("Model failed to respond: {}", reason)).into()
            }
            ModelResponse::FunctionCall(call) => {
                let Some(tool) = tools.get_tool(&call.name) else {
                    return FinishAction::error(format!(
                        "Model called unknown function '{}'",
                        call.name
                    ))
                    .into();
                };

                match call.parse_arguments() {
                    Ok(arguments) => {
                        debug!(tool = %call.name, "Model requested function call");
                        let context: ExecutionContext = arguments.into_iter().collect();
                        ToolAction::new(tool, context).into()
                    }
                    Err(reason) => FinishAction::error(format!(
                        "Invalid arguments for function '{}': {}",
                        call.name, reason
                    ))
                    .into(),
                }
            }
        }
    }
}
