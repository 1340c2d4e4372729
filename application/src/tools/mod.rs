//! Application tools
//!
//! | Tool | Output |
//! |------|--------|
//! | [`PromptTool`] | the rendered template |
//! | [`QueryTool`] | the model's reply to the rendered template |
//! | [`SearchTool`] | JSON array of search hits |
//! | [`ExternalTool`] | always empty: the caller runs it |

pub mod external;
pub mod prompt;
pub mod query;
pub mod search;

pub use external::ExternalTool;
pub use prompt::PromptTool;
pub use query::QueryTool;
pub use search::SearchTool;
