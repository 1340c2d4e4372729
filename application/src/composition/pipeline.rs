//! Pipeline: sequential tool composition
//!
//! Each stage after the first gets a fresh context whose parameters are bound
//! by name:
//!
//! | Stage parameter | Bound to |
//! |-----------------|----------|
//! | `Input.<x>` | `x` of the pipeline's own (original) context |
//! | `Result.<tool>` | the stored result of `tool` in the original context |
//! | anything else | the previous stage's raw output |
//!
//! ```text
//! context ─▶ [stage 0] ──output──▶ [stage 1] ──output──▶ [stage 2] ─▶ last output
//!               │                      │                     │
//!               └── Result.<stage> ────┴─────────────────────┴──▶ original context
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};
use toolweave_domain::{
    ExecutionContext, FunctionDescriptor, INPUT_PREFIX, ParameterDescriptor, RESULT_PREFIX, Tool,
    ToolError, is_error_output,
};

/// Sequential composition of tools behind one tool interface
pub struct Pipeline {
    descriptor: FunctionDescriptor,
    stages: Vec<Arc<dyn Tool>>,
}

impl Pipeline {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            descriptor: FunctionDescriptor::new(name, description),
            stages: Vec::new(),
        }
    }

    /// Append a stage.
    ///
    /// A non-first stage may have at most one required parameter that is not
    /// bound through `Input.`/`Result.`, since only one value (the previous
    /// output) is threaded between stages. Such a stage is rejected and
    /// `false` is returned.
    pub fn add_tool(&mut self, tool: Arc<dyn Tool>) -> bool {
        if !self.stages.is_empty() {
            let free = tool
                .descriptor()
                .required_parameters()
                .filter(|p| is_free(p))
                .count();
            if free > 1 {
                warn!(
                    pipeline = %self.descriptor.name,
                    tool = %tool.name(),
                    free_parameters = free,
                    "Rejected pipeline stage: more than one required parameter cannot be bound to the previous output"
                );
                return false;
            }
        } else {
            self.descriptor.parameters = tool.descriptor().parameters.clone();
        }

        debug!(pipeline = %self.descriptor.name, tool = %tool.name(), "Added pipeline stage");
        self.stages.push(tool);
        true
    }

    /// Builder-style [`add_tool`](Self::add_tool); a rejected stage is dropped.
    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.add_tool(tool);
        self
    }

    pub fn stages(&self) -> &[Arc<dyn Tool>] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

fn is_free(param: &ParameterDescriptor) -> bool {
    !param.name.starts_with(INPUT_PREFIX) && !param.name.starts_with(RESULT_PREFIX)
}

/// Build the context of a non-first stage.
///
/// The previous output goes to the first free required parameter, or to the
/// first free parameter if none is required.
fn derive_context(
    stage: &dyn Tool,
    original: &ExecutionContext,
    previous: &str,
) -> ExecutionContext {
    let mut context = ExecutionContext::new();
    let params = &stage.descriptor().parameters;

    for param in params {
        if let Some(name) = param.name.strip_prefix(INPUT_PREFIX) {
            if let Some(value) = original.try_get(name) {
                context.set(param.name.clone(), value.clone());
            }
        } else if let Some(tool) = param.name.strip_prefix(RESULT_PREFIX) {
            if let Some(value) = original.try_get_result(tool) {
                context.add_result(tool, value.clone());
            }
        }
    }

    let target = params
        .iter()
        .filter(|p| is_free(p))
        .find(|p| p.required)
        .or_else(|| params.iter().find(|p| is_free(p)));
    if let Some(param) = target {
        context.set(param.name.clone(), previous);
    }

    context
}

#[async_trait]
impl Tool for Pipeline {
    fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, context: &mut ExecutionContext) -> Result<Value, ToolError> {
        if self.stages.is_empty() {
            return Err(ToolError::invalid_argument(format!(
                "Pipeline '{}' has no stages",
                self.descriptor.name
            )));
        }

        let mut previous = String::new();

        for (index, stage) in self.stages.iter().enumerate() {
            let output = if index == 0 {
                stage.execute(context).await
            } else {
                let mut stage_context = derive_context(stage.as_ref(), context, &previous);
                let output = stage.execute(&mut stage_context).await;
                if let Some(value) = stage_context.try_get_result(stage.name()) {
                    context.add_result(stage.name(), value.clone());
                }
                output
            };

            if is_error_output(&output) {
                return Err(ToolError::execution_failed(format!(
                    "Stage {} ('{}') failed",
                    index,
                    stage.name()
                ))
                .with_details(output));
            }

            debug!(pipeline = %self.descriptor.name, stage = index, tool = %stage.name(), "Stage completed");
            previous = output;
        }

        Ok(Value::String(previous))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Add, StringLength};
    use crate::tools::PromptTool;
    use serde_json::json;
    use std::sync::atomic::Ordering;
    use toolweave_domain::TypeDescriptor;

    #[tokio::test]
    async fn test_add_then_prompt() {
        let pipeline = Pipeline::new("describe_sum", "Add and describe")
            .with_tool(Add::new())
            .with_tool(Arc::new(PromptTool::new(
                "describe",
                "Describe a sum",
                "The addition of two numbers is {{$sum}}.",
            )));
        assert_eq!(pipeline.len(), 2);

        let mut context = ExecutionContext::new().with("a", 5.4).with("b", 4.8);
        let output = pipeline.execute(&mut context).await;

        assert_eq!(output, "The addition of two numbers is 10.2.");
        assert_eq!(context.try_get_result("add"), Some(&json!(10.2)));
        assert_eq!(
            context.try_get_result("describe"),
            Some(&json!("The addition of two numbers is 10.2."))
        );
        assert_eq!(
            context.try_get_result("describe_sum"),
            Some(&json!("The addition of two numbers is 10.2."))
        );
    }

    #[tokio::test]
    async fn test_single_stage_equals_direct_invocation() {
        let pipeline = Pipeline::new("just_add", "Add").with_tool(Add::new());

        let mut direct = ExecutionContext::new().with("a", 2).with("b", 3);
        let mut piped = direct.clone();

        let direct_output = Add::new().execute(&mut direct).await;
        let piped_output = pipeline.execute(&mut piped).await;

        assert_eq!(direct_output, piped_output);
        assert_eq!(direct.try_get_result("add"), piped.try_get_result("add"));
    }

    #[tokio::test]
    async fn test_descriptor_mirrors_first_stage() {
        let pipeline = Pipeline::new("p", "A pipeline").with_tool(Add::new());
        let names: Vec<&str> = pipeline
            .descriptor()
            .parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(pipeline.name(), "p");
    }

    #[test]
    fn test_rejects_stage_with_two_free_required_parameters() {
        let mut pipeline = Pipeline::new("p", "");
        assert!(pipeline.add_tool(StringLength::new()));
        // add(a, b) cannot be fed from a single previous output
        assert!(!pipeline.add_tool(Add::new()));
        assert_eq!(pipeline.len(), 1);
    }

    #[tokio::test]
    async fn test_input_and_result_bindings() {
        let stage = PromptTool::new(
            "report",
            "Report",
            "{{$Input.name}} measured {{$length}}, first sum was {{$Result.add}}",
        );
        let mut pipeline = Pipeline::new("p", "");
        assert!(pipeline.add_tool(Add::new()));
        assert!(pipeline.add_tool(StringLength::new()));
        assert!(pipeline.add_tool(Arc::new(stage)));

        let mut context = ExecutionContext::new()
            .with("a", 1)
            .with("b", 2)
            .with("name", "Kiwi");
        let output = pipeline.execute(&mut context).await;

        // string_length receives add's output "3"
        assert_eq!(output, "Kiwi measured 1, first sum was 3");
        assert_eq!(context.try_get_result("add"), Some(&json!(3)));
        assert_eq!(context.try_get_result("string_length"), Some(&json!(1)));
        assert_eq!(
            context.try_get_result("report"),
            Some(&json!("Kiwi measured 1, first sum was 3"))
        );
    }

    #[tokio::test]
    async fn test_failing_stage_stops_the_chain() {
        let measure = StringLength::new();
        let pipeline = Pipeline::new("p", "")
            .with_tool(StringLength::new())
            .with_tool(Arc::new(PromptTool::new("wrap", "", "len={{$n}}")))
            .with_tool(measure.clone());

        let mut context = ExecutionContext::new().with("text", "boom");
        let output = pipeline.execute(&mut context).await;

        assert!(is_error_output(&output));
        assert!(output.contains("[EXECUTION_FAILED]"));
        assert_eq!(measure.calls.load(Ordering::SeqCst), 0);
        assert!(context.try_get_result("p").is_none());
    }

    #[tokio::test]
    async fn test_empty_pipeline_is_invalid() {
        let pipeline = Pipeline::new("empty", "");
        let mut context = ExecutionContext::new();

        let err = pipeline.invoke(&mut context).await.unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_derive_context_prefers_required_free_parameter() {
        let stage = PromptTool::new("t", "", "{{$x}}");
        let mut descriptor = stage.descriptor().clone();
        descriptor.parameters.insert(
            0,
            ParameterDescriptor::new("opt", "", false).with_type(TypeDescriptor::string()),
        );
        let original = ExecutionContext::new();

        struct Shape(FunctionDescriptor);
        #[async_trait]
        impl Tool for Shape {
            fn descriptor(&self) -> &FunctionDescriptor {
                &self.0
            }
            async fn invoke(&self, _: &mut ExecutionContext) -> Result<Value, ToolError> {
                Ok(Value::Null)
            }
        }

        let context = derive_context(&Shape(descriptor), &original, "prev");
        assert_eq!(context.get("x").unwrap(), &json!("prev"));
        assert!(!context.contains("opt"));
    }
}
