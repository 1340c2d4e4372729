//! Native function tools
//!
//! | Item | Role |
//! |------|------|
//! | [`FunctionTool`] | Adapts a Rust closure to the `Tool` contract |
//! | [`BuiltinFunctions`] | The `"builtin"` tool set (arithmetic, text) |

pub mod builtin;
mod function_tool;

pub use builtin::BuiltinFunctions;
pub use function_tool::{FunctionHandler, FunctionTool};

use toolweave_domain::{ProviderError, ToolsCollection};

/// Collection holding every builtin function
pub async fn builtin_collection() -> Result<ToolsCollection, ProviderError> {
    let mut tools = ToolsCollection::new();
    tools.register_set(&BuiltinFunctions::new()).await?;
    Ok(tools)
}
