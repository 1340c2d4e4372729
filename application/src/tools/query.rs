//! Query tool: renders a prompt and asks a language model

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use toolweave_domain::{
    ExecutionContext, FunctionDescriptor, Message, ModelResponse, PromptTemplate, Tool, ToolError,
};

use super::prompt::template_descriptor;
use crate::ports::language_model::LanguageModel;

/// Model-backed tool: the rendered template becomes the user message, the
/// model's reply text becomes the output.
pub struct QueryTool {
    descriptor: FunctionDescriptor,
    template: PromptTemplate,
    model: Arc<dyn LanguageModel>,
    system_prompt: Option<String>,
    temperature: f32,
}

impl QueryTool {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        template: impl Into<String>,
        model: Arc<dyn LanguageModel>,
    ) -> Self {
        let template = PromptTemplate::new(template);
        Self {
            descriptor: template_descriptor(name, description, &template),
            template,
            model,
            system_prompt: None,
            temperature: 0.0,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
impl Tool for QueryTool {
    fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, context: &mut ExecutionContext) -> Result<Value, ToolError> {
        let prompt = self.template.render(context)?;

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system_prompt {
            messages.push(Message::system(system.clone()));
        }
        messages.push(Message::user(prompt));

        debug!(tool = %self.descriptor.name, "Querying language model");

        let response = self
            .model
            .get_response(&messages, self.temperature)
            .await
            .map_err(|e| ToolError::execution_failed(e.to_string()))?;

        match response {
            ModelResponse::Done { text } | ModelResponse::Partial { text } => Ok(Value::String(text)),
            ModelResponse::FunctionCall(call) => Err(ToolError::execution_failed(format!(
                "Model requested function '{}' instead of answering",
                call.name
            ))),
            ModelResponse::Failed { reason } => Err(ToolError::execution_failed(reason)),
        }
    }
}
