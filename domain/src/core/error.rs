//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Parameter not found: {0}")]
    ParameterNotFound(String),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Tool already registered: {0}")]
    DuplicateTool(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

impl DomainError {
    /// Check if this error was caused by a caller-supplied argument
    /// (unknown tool name, bad parameter value) rather than missing state.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            DomainError::UnknownTool(_) | DomainError::InvalidParameter { .. }
        )
    }
}
