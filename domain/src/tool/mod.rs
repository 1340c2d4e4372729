//! Tool domain module
//!
//! Defines the **uniform tool contract** every executable unit honours:
//! prompt renderers, model-backed queries, native functions, searches,
//! pipelines and map-reduce graphs are all just `Arc<dyn Tool>`.
//!
//! ```text
//! ┌────────────────────┐    ┌──────────────────┐    ┌──────────────┐
//! │ FunctionDescriptor │───▶│ Tool::execute    │───▶│ String       │
//! │ (name, params)     │    │ validate+invoke  │    │ output/ERROR │
//! └────────────────────┘    └────────┬─────────┘    └──────────────┘
//!                                    │
//!                                    └─ Result.<name> written to context
//! ```
//!
//! # Key Types
//!
//! - [`FunctionDescriptor`]: LLM-facing name, description and parameters
//! - [`TypeDescriptor`]: closed parameter type (scalar, enum, array, object)
//! - [`Tool`]: trait with the provided [`Tool::execute`] base contract
//! - [`ToolsCollection`]: name → tool registry
//! - [`ToolSet`]: source of discovered/builtin tools
//! - [`ToolError`]: coded error produced by core logic
//!
//! # Output Conventions
//!
//! | Output | Meaning |
//! |--------|---------|
//! | `ERROR: ...` | validation or execution failed; details are logged |
//! | `""` | the tool cannot run in-process; the caller must run it |
//! | anything else | success |

pub mod collection;
pub mod entities;
pub mod provider;
pub mod traits;
pub mod validation;
pub mod value_objects;

pub use collection::ToolsCollection;
pub use entities::{FunctionDescriptor, ParameterDescriptor, ScalarType, TypeDescriptor};
pub use provider::{ProviderError, ToolSet};
pub use traits::{Tool, run_tool};
pub use validation::{coerce_value, validate_parameters};
pub use value_objects::{
    ERROR_PREFIX, ToolError, error_sentinel, is_error_output, number_value, serialize_output,
};
