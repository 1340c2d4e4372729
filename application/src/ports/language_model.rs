//! Language model port
//!
//! Defines the interface for asking a language model for a reply.
//! The wire protocol lives behind implementations of this trait.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use toolweave_domain::{Message, ModelResponse};

/// Errors that can occur while talking to a language model
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// A language model
///
/// Implementations (adapters) live outside the application layer; tests use
/// scripted fakes.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Get a text reply for `messages`
    async fn get_response(
        &self,
        messages: &[Message],
        temperature: f32,
    ) -> Result<ModelResponse, ModelError>;

    /// Get a reply that may instead be a call to one of `functions`
    /// (LLM-facing JSON schemas).
    async fn get_response_with_functions(
        &self,
        messages: &[Message],
        functions: &[Value],
        temperature: f32,
    ) -> Result<ModelResponse, ModelError>;
}
