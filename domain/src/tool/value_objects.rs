//! Tool domain value objects: error type and output serialization
//!
//! Every tool's core logic produces `Result<Value, ToolError>`. The base
//! contract turns that into the string crossing the tool boundary:
//!
//! | Outcome | Returned string |
//! |---------|-----------------|
//! | `Ok(Value::String(s))` | `s` verbatim |
//! | `Ok(number / bool / null)` | natural text (`10.2`, `26`, `true`, `null`) |
//! | `Ok(array / object)` | JSON |
//! | `Err(e)` | `ERROR: tool '<name>' failed: [<CODE>] <message>` |

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix of the sentinel string returned by a failed tool execution
pub const ERROR_PREFIX: &str = "ERROR:";

/// Error that occurred during tool execution.
///
/// | Code | Description |
/// |------|-------------|
/// | `INVALID_ARGUMENT` | Missing/unparseable parameters, bad composition shape |
/// | `NOT_FOUND` | Unknown tool or resource |
/// | `EXECUTION_FAILED` | Runtime failure inside the tool |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "NOT_FOUND", "INVALID_ARGUMENT")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Common error constructors
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            "NOT_FOUND",
            format!("Resource not found: {}", resource.into()),
        )
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new("INVALID_ARGUMENT", message)
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new("EXECUTION_FAILED", message)
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.code == "INVALID_ARGUMENT"
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {}

impl From<crate::core::error::DomainError> for ToolError {
    fn from(err: crate::core::error::DomainError) -> Self {
        use crate::core::error::DomainError;
        match &err {
            DomainError::UnknownTool(name) => ToolError::not_found(name.as_str()),
            DomainError::ParameterNotFound(_) | DomainError::InvalidParameter { .. } => {
                ToolError::invalid_argument(err.to_string())
            }
            DomainError::DuplicateTool(_) => ToolError::execution_failed(err.to_string()),
        }
    }
}

/// Render a tool output for the string boundary.
pub fn serialize_output(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Build the `ERROR:` sentinel naming the failed tool
pub fn error_sentinel(tool: &str, error: &ToolError) -> String {
    format!("{} tool '{}' failed: {}", ERROR_PREFIX, tool, error)
}

/// Check whether a raw tool output is an error sentinel
pub fn is_error_output(output: &str) -> bool {
    output.starts_with(ERROR_PREFIX)
}

/// Convert an `f64` into a JSON number, preferring an integer when the value
/// is whole so it renders as `26` rather than `26.0`.
pub fn number_value(n: f64) -> Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_error() {
        let err = ToolError::not_found("weather").with_details("no such tool registered");

        assert_eq!(err.code, "NOT_FOUND");
        assert!(err.message.contains("weather"));
        assert_eq!(
            err.to_string(),
            "[NOT_FOUND] Resource not found: weather (no such tool registered)"
        );
    }

    #[test]
    fn test_serialize_primitives_use_natural_text() {
        assert_eq!(serialize_output(&json!("hello")), "hello");
        assert_eq!(serialize_output(&json!(10.2)), "10.2");
        assert_eq!(serialize_output(&json!(26)), "26");
        assert_eq!(serialize_output(&json!(true)), "true");
        assert_eq!(serialize_output(&Value::Null), "null");
    }

    #[test]
    fn test_serialize_structured_output_round_trips() {
        let values = [
            json!([1, 2, 3]),
            json!(["Apple", "Banana"]),
            json!({"name": "Mango", "length": 5, "ripe": true}),
            json!([{"a": 1.5}, {"a": null}]),
        ];

        for value in values {
            let text = serialize_output(&value);
            let decoded: Value = serde_json::from_str(&text).unwrap();
            assert_eq!(decoded, value);
        }
    }

    #[test]
    fn test_error_sentinel() {
        let sentinel = error_sentinel("add", &ToolError::invalid_argument("missing 'a'"));
        assert!(is_error_output(&sentinel));
        assert_eq!(
            sentinel,
            "ERROR: tool 'add' failed: [INVALID_ARGUMENT] missing 'a'"
        );
        assert!(!is_error_output("10.2"));
    }

    #[test]
    fn test_number_value() {
        assert_eq!(number_value(26.0), json!(26));
        assert_eq!(number_value(10.2), json!(10.2));
        assert_eq!(number_value(-3.0), json!(-3));
        assert_eq!(number_value(f64::NAN), Value::Null);
    }

    #[test]
    fn test_from_domain_error() {
        use crate::core::error::DomainError;

        let err: ToolError = DomainError::UnknownTool("nope".to_string()).into();
        assert_eq!(err.code, "NOT_FOUND");

        let err: ToolError = DomainError::ParameterNotFound("a".to_string()).into();
        assert!(err.is_invalid_argument());
    }
}
