//! Conversation domain.
//!
//! - [`entities::Message`]: a single message exchanged with a language model
//! - [`response::ModelResponse`]: a model's reply, possibly a function call

pub mod entities;
pub mod response;

pub use entities::{Message, Role};
pub use response::{FunctionCall, ModelResponse};
