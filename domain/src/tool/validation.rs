//! Parameter validation and coercion
//!
//! Runs before every tool's core logic. LLMs (and humans on a command line)
//! routinely hand over `"2023"` where an integer is declared or a JSON array
//! serialized as a string; validation coerces such values in place so core
//! logic can read the declared shape.
//!
//! | Declared | Present as | Result |
//! |----------|-----------|--------|
//! | any, required | absent / null | error, core logic skipped |
//! | any, optional | absent | set to `null` |
//! | string | anything | textual/JSON form |
//! | enum | anything | textual form, must be one of the options |
//! | number / integer / boolean | string | parsed, failure is an error |
//! | integer | whole float | integer |
//! | array / object | string | JSON-decoded, failure is an error |
//! | array | array | element-wise cast, uncastable elements pass through |
//!
//! Parameters named `Result.<tool>` are checked but never written back: they
//! alias another tool's stored result, which only that tool may set.

use super::entities::{FunctionDescriptor, ScalarType, TypeDescriptor};
use super::value_objects::{ToolError, number_value, serialize_output};
use crate::context::{ExecutionContext, RESULT_PREFIX};
use serde_json::Value;

/// Validate and coerce every declared parameter of `descriptor` in `context`.
pub fn validate_parameters(
    descriptor: &FunctionDescriptor,
    context: &mut ExecutionContext,
) -> Result<(), ToolError> {
    for param in &descriptor.parameters {
        let aliases_result = param.name.starts_with(RESULT_PREFIX);
        let value = match context.try_get(&param.name) {
            None | Some(Value::Null) => {
                if param.required {
                    return Err(ToolError::invalid_argument(format!(
                        "Missing required parameter '{}' for tool '{}'",
                        param.name, descriptor.name
                    )));
                }
                if !aliases_result {
                    context.set(param.name.clone(), Value::Null);
                }
                continue;
            }
            Some(value) => value,
        };

        let coerced = coerce_value(&param.ty, value).map_err(|reason| {
            ToolError::invalid_argument(format!(
                "Invalid value for parameter '{}' of tool '{}': {}",
                param.name, descriptor.name, reason
            ))
        })?;
        if !aliases_result {
            context.set(param.name.clone(), coerced);
        }
    }

    Ok(())
}

/// Coerce a single value into the declared shape.
pub fn coerce_value(ty: &TypeDescriptor, value: &Value) -> Result<Value, String> {
    match ty {
        TypeDescriptor::Scalar(ScalarType::String) => Ok(Value::String(to_text(value))),
        TypeDescriptor::Enum { options } => {
            let text = to_text(value);
            if options.iter().any(|o| *o == text) {
                Ok(Value::String(text))
            } else {
                Err(format!("'{}' is not one of [{}]", text, options.join(", ")))
            }
        }
        TypeDescriptor::Scalar(ScalarType::Number) => match value {
            Value::String(s) => parse_number(s),
            other => Ok(other.clone()),
        },
        TypeDescriptor::Scalar(ScalarType::Integer) => match value {
            Value::String(s) => parse_integer(s),
            Value::Number(n) if !n.is_i64() && !n.is_u64() => match n.as_f64() {
                Some(f) if f.fract() == 0.0 => Ok(number_value(f)),
                _ => Err(format!("{} is not an integer", n)),
            },
            other => Ok(other.clone()),
        },
        TypeDescriptor::Scalar(ScalarType::Boolean) => match value {
            Value::String(s) => parse_bool(s),
            other => Ok(other.clone()),
        },
        TypeDescriptor::Array { items } => match value {
            Value::String(s) => match serde_json::from_str::<Value>(s) {
                Ok(Value::Array(elements)) => Ok(cast_elements(items, &elements)),
                Ok(_) => Err(format!("'{}' is not a JSON array", s)),
                Err(e) => Err(format!("'{}' is not a JSON array: {}", s, e)),
            },
            Value::Array(elements) => Ok(cast_elements(items, elements)),
            other => Ok(other.clone()),
        },
        TypeDescriptor::Object { .. } => match value {
            Value::String(s) => match serde_json::from_str::<Value>(s) {
                Ok(object @ Value::Object(_)) => Ok(object),
                Ok(_) => Err(format!("'{}' is not a JSON object", s)),
                Err(e) => Err(format!("'{}' is not a JSON object: {}", s, e)),
            },
            other => Ok(other.clone()),
        },
    }
}

fn cast_elements(items: &TypeDescriptor, elements: &[Value]) -> Value {
    Value::Array(
        elements
            .iter()
            .map(|element| coerce_value(items, element).unwrap_or_else(|_| element.clone()))
            .collect(),
    )
}

fn to_text(value: &Value) -> String {
    serialize_output(value)
}

fn parse_number(s: &str) -> Result<Value, String> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(number_value)
        .ok_or_else(|| format!("'{}' is not a number", s))
}

fn parse_integer(s: &str) -> Result<Value, String> {
    let trimmed = s.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Ok(Value::from(n));
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 => Ok(number_value(f)),
        _ => Err(format!("'{}' is not an integer", s)),
    }
}

fn parse_bool(s: &str) -> Result<Value, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        _ => Err(format!("'{}' is not a boolean", s)),
    }
}
