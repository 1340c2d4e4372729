//! Native function tool
//!
//! Wraps a Rust closure behind the [`Tool`] trait. The closure receives a
//! copy of the already-validated context, so parameters arrive in their
//! declared shape.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;
use toolweave_domain::{ExecutionContext, FunctionDescriptor, Tool, ToolError};

/// Type-erased async function body
pub type FunctionHandler =
    Arc<dyn Fn(ExecutionContext) -> BoxFuture<'static, Result<Value, ToolError>> + Send + Sync>;

/// A tool backed by a native function
#[derive(Clone)]
pub struct FunctionTool {
    descriptor: FunctionDescriptor,
    handler: FunctionHandler,
}

impl FunctionTool {
    /// Create a tool from an async function body
    pub fn new<F, Fut>(descriptor: FunctionDescriptor, handler: F) -> Self
    where
        F: Fn(ExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ToolError>> + Send + 'static,
    {
        Self {
            descriptor,
            handler: Arc::new(move |context| handler(context).boxed()),
        }
    }

    /// Create a tool from a synchronous function body
    pub fn sync<F>(descriptor: FunctionDescriptor, handler: F) -> Self
    where
        F: Fn(&ExecutionContext) -> Result<Value, ToolError> + Send + Sync + 'static,
    {
        let handler = Arc::new(handler);
        Self::new(descriptor, move |context| {
            let handler = Arc::clone(&handler);
            async move { handler(&context) }
        })
    }
}

impl std::fmt::Debug for FunctionTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionTool")
            .field("name", &self.descriptor.name)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Tool for FunctionTool {
    fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, context: &mut ExecutionContext) -> Result<Value, ToolError> {
        (self.handler)(context.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use toolweave_domain::{ParameterDescriptor, TypeDescriptor};

    fn next_year() -> FunctionTool {
        FunctionTool::sync(
            FunctionDescriptor::new("next_year", "The year after").with_parameter(
                ParameterDescriptor::new("year", "A year", true)
                    .with_type(TypeDescriptor::integer()),
            ),
            |context| {
                let year: i64 = context.get_as("year")?;
                Ok(json!(year + 1))
            },
        )
    }

    #[tokio::test]
    async fn test_sync_function() {
        let mut context = ExecutionContext::new().with("year", "2023");

        assert_eq!(next_year().execute(&mut context).await, "2024");
        assert_eq!(context.get("year").unwrap(), &json!(2023));
        assert_eq!(context.try_get_result("next_year"), Some(&json!(2024)));
    }

    #[tokio::test]
    async fn test_async_function() {
        let tool = FunctionTool::new(
            FunctionDescriptor::new("later", "Answer after a while"),
            |_context| async {
                tokio::time::sleep(std::time::Duration::from_millis(5)).await;
                Ok(json!("done"))
            },
        );

        assert_eq!(tool.execute(&mut ExecutionContext::new()).await, "done");
    }

    #[tokio::test]
    async fn test_missing_parameter_skips_function() {
        let output = next_year().execute(&mut ExecutionContext::new()).await;
        assert!(output.starts_with("ERROR: tool 'next_year' failed: [INVALID_ARGUMENT]"));
    }

    #[test]
    fn test_debug() {
        assert_eq!(
            format!("{:?}", next_year()),
            "FunctionTool { name: \"next_year\", .. }"
        );
    }
}
