//! Builtin function set
//!
//! Small arithmetic and text functions that are always available. They are
//! enough to drive pipelines, map-reduce jobs and agents from the command
//! line without any external tool source.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use toolweave_domain::{
    ExecutionContext, FunctionDescriptor, ParameterDescriptor, ProviderError, Tool, ToolError,
    ToolSet, TypeDescriptor, number_value,
};
use tracing::debug;

use super::function_tool::FunctionTool;

pub const ADD: &str = "add";
pub const SUBTRACT: &str = "subtract";
pub const MULTIPLY: &str = "multiply";
pub const DIVIDE: &str = "divide";
pub const SUM: &str = "sum";
pub const STRING_LENGTH: &str = "string_length";
pub const CONCAT: &str = "concat";

/// The builtin functions as a [`ToolSet`]
#[derive(Debug, Clone)]
pub struct BuiltinFunctions {
    functions: Vec<FunctionTool>,
}

impl BuiltinFunctions {
    /// Create the set with every builtin function
    pub fn new() -> Self {
        Self {
            functions: vec![
                binary(ADD, "Add two numbers", |a, b| Ok(a + b)),
                binary(SUBTRACT, "Subtract b from a", |a, b| Ok(a - b)),
                binary(MULTIPLY, "Multiply two numbers", |a, b| Ok(a * b)),
                binary(DIVIDE, "Divide a by b", |a, b| {
                    if b == 0.0 {
                        Err(ToolError::invalid_argument("Division by zero"))
                    } else {
                        Ok(a / b)
                    }
                }),
                sum(),
                string_length(),
                concat(),
            ],
        }
    }

    /// Names of the functions in this set
    pub fn names(&self) -> Vec<&str> {
        self.functions.iter().map(|f| f.name()).collect()
    }
}

impl Default for BuiltinFunctions {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolSet for BuiltinFunctions {
    fn id(&self) -> &str {
        "builtin"
    }

    async fn discover_tools(&self) -> Result<Vec<Arc<dyn Tool>>, ProviderError> {
        debug!(count = self.functions.len(), "Discovered builtin functions");
        Ok(self
            .functions
            .iter()
            .cloned()
            .map(|f| Arc::new(f) as Arc<dyn Tool>)
            .collect())
    }
}

fn number_param(name: &str, description: &str) -> ParameterDescriptor {
    ParameterDescriptor::new(name, description, true).with_type(TypeDescriptor::number())
}

fn binary<F>(name: &str, description: &str, op: F) -> FunctionTool
where
    F: Fn(f64, f64) -> Result<f64, ToolError> + Send + Sync + 'static,
{
    FunctionTool::sync(
        FunctionDescriptor::new(name, description).with_parameters([
            number_param("a", "First number"),
            number_param("b", "Second number"),
        ]),
        move |context: &ExecutionContext| {
            let a: f64 = context.get_as("a")?;
            let b: f64 = context.get_as("b")?;
            op(a, b).map(number_value)
        },
    )
}

fn sum() -> FunctionTool {
    FunctionTool::sync(
        FunctionDescriptor::new(SUM, "Sum a list of numbers").with_parameter(
            ParameterDescriptor::new("numbers", "Numbers to add", true)
                .with_type(TypeDescriptor::array(TypeDescriptor::number())),
        ),
        |context| {
            let numbers: Vec<f64> = context.get_as("numbers")?;
            Ok(number_value(numbers.iter().sum()))
        },
    )
}

fn string_length() -> FunctionTool {
    FunctionTool::sync(
        FunctionDescriptor::new(STRING_LENGTH, "Number of characters in a string")
            .with_parameter(ParameterDescriptor::new("text", "Text to measure", true)),
        |context| {
            let text: String = context.get_as("text")?;
            Ok(json!(text.chars().count()))
        },
    )
}

fn concat() -> FunctionTool {
    FunctionTool::sync(
        FunctionDescriptor::new(CONCAT, "Join two strings with an optional separator")
            .with_parameters([
                ParameterDescriptor::new("first", "Leading text", true),
                ParameterDescriptor::new("second", "Trailing text", true),
                ParameterDescriptor::new("separator", "Text placed between the two", false),
            ]),
        |context| {
            let first: String = context.get_as("first")?;
            let second: String = context.get_as("second")?;
            let separator = match context.try_get("separator") {
                Some(Value::String(s)) => s.as_str(),
                _ => "",
            };
            Ok(Value::String(format!("{first}{separator}{second}")))
        },
    )
}
