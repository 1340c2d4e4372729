//! Language model response types
//!
//! A model reply is one of four closed kinds:
//!
//! ```text
//! get_response()                 → Done | Partial | Failed
//! get_response_with_functions()  → Done | Partial | FunctionCall | Failed
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A function the model asked to call.
///
/// `arguments` is the raw JSON object text exactly as the model produced it;
/// it is only decoded when the call is turned into an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    /// Decode `arguments` into a name → value map.
    ///
    /// Blank arguments are treated as an empty object.
    pub fn parse_arguments(&self) -> Result<Map<String, Value>, String> {
        if self.arguments.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&self.arguments) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(format!("arguments must be a JSON object, got: {}", other)),
            Err(e) => Err(format!("arguments are not valid JSON: {}", e)),
        }
    }
}

/// Reply from a language model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelResponse {
    /// Complete reply
    Done { text: String },
    /// Reply cut short (e.g. by a length limit); still usable text
    Partial { text: String },
    /// The model asked to call a function
    FunctionCall(FunctionCall),
    /// The model could not produce a reply
    Failed { reason: String },
}

impl ModelResponse {
    pub fn done(text: impl Into<String>) -> Self {
        Self::Done { text: text.into() }
    }

    pub fn partial(text: impl Into<String>) -> Self {
        Self::Partial { text: text.into() }
    }

    pub fn function_call(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self::FunctionCall(FunctionCall::new(name, arguments))
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    /// Text of a `Done`/`Partial` reply
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Done { text } | Self::Partial { text } => Some(text),
            Self::FunctionCall(_) | Self::Failed { .. } => None,
        }
    }
}
