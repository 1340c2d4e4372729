//! Tool set abstraction
//!
//! A [`ToolSet`] is any source of ready-made tools: the builtin function set,
//! a reflection-style discovery over a plugin library, a remote catalogue.
//! The engine only ever sees the discovered [`Tool`] instances, never how they
//! were found.
//!
//! ```text
//! ┌──────────────┐   discover_tools()   ┌──────────────────┐
//! │ ToolSet      │ ───────────────────▶ │ ToolsCollection  │
//! │ (builtin,    │   Vec<Arc<dyn Tool>> │  name → tool     │
//! │  plugins...) │                      └──────────────────┘
//! └──────────────┘
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use super::traits::Tool;
use crate::core::error::DomainError;

/// Error type for tool set operations
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Failed to discover tools from the set
    #[error("Discovery failed: {0}")]
    DiscoveryFailed(String),

    /// A discovered tool could not be registered
    #[error(transparent)]
    Registration(#[from] DomainError),
}

/// Source of tools that can be registered into a collection
#[async_trait]
pub trait ToolSet: Send + Sync {
    /// Unique identifier for this set (e.g. "builtin", "plugin:math")
    fn id(&self) -> &str;

    /// Discover every tool this set offers
    async fn discover_tools(&self) -> Result<Vec<Arc<dyn Tool>>, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ExecutionContext;
    use crate::tool::entities::FunctionDescriptor;
    use crate::tool::value_objects::ToolError;
    use serde_json::Value;

    struct Constant {
        descriptor: FunctionDescriptor,
    }

    #[async_trait]
    impl Tool for Constant {
        fn descriptor(&self) -> &FunctionDescriptor {
            &self.descriptor
        }

        async fn invoke(&self, _context: &mut ExecutionContext) -> Result<Value, ToolError> {
            Ok(Value::from(42))
        }
    }

    /// A mock set for testing
    struct MockSet {
        available: bool,
    }

    #[async_trait]
    impl ToolSet for MockSet {
        fn id(&self) -> &str {
            "mock"
        }

        async fn discover_tools(&self) -> Result<Vec<Arc<dyn Tool>>, ProviderError> {
            if !self.available {
                return Err(ProviderError::DiscoveryFailed("library not loaded".into()));
            }
            Ok(vec![Arc::new(Constant {
                descriptor: FunctionDescriptor::new("answer", "The answer"),
            })])
        }
    }

    #[tokio::test]
    async fn test_discovery() {
        let tools = MockSet { available: true }.discover_tools().await.unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name(), "answer");
    }

    #[tokio::test]
    async fn test_discovery_failure() {
        let err = MockSet { available: false }
            .discover_tools()
            .await
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "Discovery failed: library not loaded");
    }
}
