//! Tool trait and the shared base contract
//!
//! Implementors supply a [`FunctionDescriptor`] and the tool-specific core
//! logic ([`Tool::invoke`]). Callers only ever use [`Tool::execute`], which
//! wraps the core logic in the uniform contract:
//!
//! ```text
//! execute(context)
//!   ├─ validate_parameters()   missing/unparseable → "ERROR: ..."
//!   ├─ invoke(context)         Err / panic         → "ERROR: ..." (logged)
//!   ├─ context["Result.<name>"] = output
//!   └─ serialize_output(output)
//! ```
//!
//! The returned string is never null. An empty string is reserved for tools
//! that cannot run in-process: the caller has to execute them.

use std::panic::AssertUnwindSafe;

use async_trait::async_trait;
use futures::FutureExt;
use serde_json::Value;
use tracing::{debug, error, warn};

use super::entities::FunctionDescriptor;
use super::validation::validate_parameters;
use super::value_objects::{ToolError, error_sentinel, serialize_output};
use crate::context::ExecutionContext;
use crate::util::preview;

/// Uniform executable unit
#[async_trait]
pub trait Tool: Send + Sync {
    /// Static shape metadata; `descriptor().name` is the registry key
    fn descriptor(&self) -> &FunctionDescriptor;

    fn name(&self) -> &str {
        &self.descriptor().name
    }

    /// Tool-specific core logic. Runs only after parameters validated.
    async fn invoke(&self, context: &mut ExecutionContext) -> Result<Value, ToolError>;

    /// Execute with validation, result recording and error normalization.
    async fn execute(&self, context: &mut ExecutionContext) -> String {
        run_tool(self, context).await
    }
}

/// The base contract behind [`Tool::execute`].
pub async fn run_tool<T: Tool + ?Sized>(tool: &T, context: &mut ExecutionContext) -> String {
    let name = tool.name().to_string();

    if let Err(e) = validate_parameters(tool.descriptor(), context) {
        warn!(tool = %name, error = %e, "Parameter validation failed");
        return error_sentinel(&name, &e);
    }

    debug!(tool = %name, "Executing tool");

    match AssertUnwindSafe(tool.invoke(context)).catch_unwind().await {
        Ok(Ok(value)) => {
            let output = serialize_output(&value);
            debug!(tool = %name, output = %preview(&output, 200), "Tool succeeded");
            context.add_result(&name, value);
            output
        }
        Ok(Err(e)) => {
            warn!(tool = %name, error = %e, "Tool execution failed");
            error_sentinel(&name, &e)
        }
        Err(panic) => {
            let message = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            error!(tool = %name, panic = %message, "Tool panicked");
            error_sentinel(
                &name,
                &ToolError::execution_failed(format!("panicked: {}", message)),
            )
        }
    }
}
