//! Execution context entity

use crate::core::error::DomainError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Reserved prefix for namespaced tool results (`Result.<toolName>`)
pub const RESULT_PREFIX: &str = "Result.";

/// Prefix a pipeline stage uses to bind a value from the original top-level
/// context (`Input.<name>`)
pub const INPUT_PREFIX: &str = "Input.";

/// Parameter/result bag passed to every tool execution.
///
/// Values are dynamically typed ([`serde_json::Value`]) so that one context can
/// carry strings, numbers, booleans, arrays and nested objects side by side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionContext {
    parameters: HashMap<String, Value>,
    /// Keyed by tool name (without the `Result.` prefix)
    results: HashMap<String, Value>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style parameter insertion
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a parameter. A `Result.<tool>` name is stored as that tool's result.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        match name.strip_prefix(RESULT_PREFIX) {
            Some(tool) => {
                self.results.insert(tool.to_string(), value.into());
            }
            None => {
                self.parameters.insert(name, value.into());
            }
        }
    }

    /// Read a value by name, failing if it is absent.
    pub fn get(&self, name: &str) -> Result<&Value, DomainError> {
        self.try_get(name)
            .ok_or_else(|| DomainError::ParameterNotFound(name.to_string()))
    }

    /// Read a value by name without failing.
    pub fn try_get(&self, name: &str) -> Option<&Value> {
        match name.strip_prefix(RESULT_PREFIX) {
            Some(tool) => self.results.get(tool),
            None => self.parameters.get(name),
        }
    }

    /// Read a value and deserialize it into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<T, DomainError> {
        let value = self.get(name)?;
        serde_json::from_value(value.clone()).map_err(|e| DomainError::InvalidParameter {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.try_get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        match name.strip_prefix(RESULT_PREFIX) {
            Some(tool) => self.results.remove(tool),
            None => self.parameters.remove(name),
        }
    }

    /// Store a tool's own output under `Result.<tool>`
    pub fn add_result(&mut self, tool: &str, value: impl Into<Value>) {
        self.results.insert(tool.to_string(), value.into());
    }

    /// Read a tool's stored output without failing
    pub fn try_get_result(&self, tool: &str) -> Option<&Value> {
        self.results.get(tool)
    }

    /// Iterate over user parameters (results excluded)
    pub fn parameters(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.parameters.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over stored results as `(tool_name, value)`
    pub fn results(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.results.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy every result of `other` into this context, overwriting on conflict.
    pub fn merge_results_from(&mut self, other: &ExecutionContext) {
        for (tool, value) in &other.results {
            self.results.insert(tool.clone(), value.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty() && self.results.is_empty()
    }
}

/// Namespaced key for a tool result (`Result.<tool>`)
pub fn result_key(tool: &str) -> String {
    format!("{}{}", RESULT_PREFIX, tool)
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ExecutionContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Self::new();
        for (name, value) in iter {
            context.set(name, value);
        }
        context
    }
}
