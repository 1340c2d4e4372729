//! Search tool: queries a [`SearchEngine`]

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use toolweave_domain::{
    ExecutionContext, FunctionDescriptor, ParameterDescriptor, Tool, ToolError, TypeDescriptor,
};

use crate::ports::search_engine::SearchEngine;

const DEFAULT_LIMIT: usize = 5;

/// Returns the hits for `query` as a JSON array of `{id, text, score}`
pub struct SearchTool {
    descriptor: FunctionDescriptor,
    engine: Arc<dyn SearchEngine>,
    default_limit: usize,
}

impl SearchTool {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        engine: Arc<dyn SearchEngine>,
    ) -> Self {
        Self {
            descriptor: FunctionDescriptor::new(name, description).with_parameters([
                ParameterDescriptor::new("query", "Search query", true),
                ParameterDescriptor::new("limit", "Maximum number of results", false)
                    .with_type(TypeDescriptor::integer()),
            ]),
            engine,
            default_limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }
}

#[async_trait]
impl Tool for SearchTool {
    fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, context: &mut ExecutionContext) -> Result<Value, ToolError> {
        let query: String = context.get_as("query")?;
        let limit: Option<usize> = context.get_as("limit")?;

        let hits = self
            .engine
            .search(&query, limit.unwrap_or(self.default_limit))
            .await
            .map_err(|e| ToolError::execution_failed(e.to_string()))?;

        serde_json::to_value(hits).map_err(|e| ToolError::execution_failed(e.to_string()))
    }
}
