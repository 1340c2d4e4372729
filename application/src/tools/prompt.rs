//! Prompt tool: renders a `{{$variable}}` template

use async_trait::async_trait;
use serde_json::Value;
use toolweave_domain::{
    ExecutionContext, FunctionDescriptor, ParameterDescriptor, PromptTemplate, Tool, ToolError,
};

/// Renders its template against the context; every template variable is a
/// required string parameter.
pub struct PromptTool {
    descriptor: FunctionDescriptor,
    template: PromptTemplate,
}

impl PromptTool {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        let template = PromptTemplate::new(template);
        Self {
            descriptor: template_descriptor(name, description, &template),
            template,
        }
    }

    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }
}

/// Descriptor whose parameters are the template's variables
pub(crate) fn template_descriptor(
    name: impl Into<String>,
    description: impl Into<String>,
    template: &PromptTemplate,
) -> FunctionDescriptor {
    FunctionDescriptor::new(name, description).with_parameters(
        template
            .variables()
            .iter()
            .map(|v| ParameterDescriptor::new(v.clone(), format!("Value for {{{{${}}}}}", v), true)),
    )
}

#[async_trait]
impl Tool for PromptTool {
    fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, context: &mut ExecutionContext) -> Result<Value, ToolError> {
        Ok(Value::String(self.template.render(context)?))
    }
}
