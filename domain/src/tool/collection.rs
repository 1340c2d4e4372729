//! Tools collection: named registry of tools

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::entities::FunctionDescriptor;
use super::provider::{ProviderError, ToolSet};
use super::traits::Tool;
use crate::context::ExecutionContext;
use crate::core::error::DomainError;

/// Name → tool registry.
///
/// Purely a registry: beyond [`execute`](Self::execute) dispatch it adds no
/// execution semantics. Mutation is not synchronized; share a collection
/// read-only through `Arc` and do not mutate it while it is being read.
#[derive(Clone, Default)]
pub struct ToolsCollection {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolsCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool; fails if the name is already taken.
    pub fn add_tool(&mut self, tool: Arc<dyn Tool>) -> Result<(), DomainError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(DomainError::DuplicateTool(name));
        }
        debug!(tool = %name, "Registered tool");
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Register every tool discovered from a tool set, returning how many were added.
    ///
    /// All or nothing: if any name clashes with a registered tool or with
    /// another tool of the same set, the collection is left unchanged.
    pub async fn register_set(&mut self, set: &dyn ToolSet) -> Result<usize, ProviderError> {
        let tools = set.discover_tools().await?;
        let mut seen = HashSet::with_capacity(tools.len());
        for tool in &tools {
            let name = tool.name();
            if self.tools.contains_key(name) || !seen.insert(name) {
                return Err(DomainError::DuplicateTool(name.to_string()).into());
            }
        }

        let count = tools.len();
        for tool in tools {
            debug!(tool = %tool.name(), "Registered tool");
            self.tools.insert(tool.name().to_string(), tool);
        }
        debug!(set = set.id(), count, "Registered tool set");
        Ok(count)
    }

    pub fn remove_tool(&mut self, name: &str) -> bool {
        self.tools.remove(name).is_some()
    }

    pub fn get_tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Snapshot of every descriptor, sorted by name
    pub fn functions(&self) -> Vec<FunctionDescriptor> {
        let mut functions: Vec<FunctionDescriptor> =
            self.tools.values().map(|t| t.descriptor().clone()).collect();
        functions.sort_by(|a, b| a.name.cmp(&b.name));
        functions
    }

    /// LLM-facing JSON schemas, sorted by name
    pub fn function_schemas(&self) -> Vec<Value> {
        self.functions().iter().map(|f| f.to_json_schema()).collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.tools.values()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Dispatch to a tool by name.
    pub async fn execute(
        &self,
        name: &str,
        context: &mut ExecutionContext,
    ) -> Result<String, DomainError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| DomainError::UnknownTool(name.to_string()))?;
        Ok(tool.execute(context).await)
    }
}

impl std::fmt::Debug for ToolsCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("ToolsCollection").field("tools", &names).finish()
    }
}

impl<'a> IntoIterator for &'a ToolsCollection {
    type Item = &'a Arc<dyn Tool>;
    type IntoIter = std::collections::hash_map::Values<'a, String, Arc<dyn Tool>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tools.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::ParameterDescriptor;
    use crate::tool::value_objects::ToolError;
    use async_trait::async_trait;
    use serde_json::json;

    struct Upper {
        descriptor: FunctionDescriptor,
    }

    impl Upper {
        fn named(name: &str) -> Arc<dyn Tool> {
            Arc::new(Self {
                descriptor: FunctionDescriptor::new(name, "Uppercase text")
                    .with_parameter(ParameterDescriptor::new("text", "Input", true)),
            })
        }
    }

    #[async_trait]
    impl Tool for Upper {
        fn descriptor(&self) -> &FunctionDescriptor {
            &self.descriptor
        }

        async fn invoke(&self, context: &mut ExecutionContext) -> Result<Value, ToolError> {
            let text: String = context.get_as("text")?;
            Ok(json!(text.to_uppercase()))
        }
    }

    #[test]
    fn test_add_and_get() {
        let mut tools = ToolsCollection::new();
        tools.add_tool(Upper::named("upper")).unwrap();

        assert!(tools.get_tool("upper").is_some());
        assert!(tools.get_tool("lower").is_none());
        assert_eq!(tools.len(), 1);
        assert!(!tools.is_empty());
    }

    #[test]
    fn test_duplicate_add_fails() {
        let mut tools = ToolsCollection::new();
        tools.add_tool(Upper::named("upper")).unwrap();

        let err = tools.add_tool(Upper::named("upper")).unwrap_err();
        assert_eq!(err, DomainError::DuplicateTool("upper".to_string()));
        assert_eq!(tools.len(), 1);
    }

    struct Fixed(Vec<&'static str>);

    #[async_trait]
    impl ToolSet for Fixed {
        fn id(&self) -> &str {
            "fixed"
        }

        async fn discover_tools(&self) -> Result<Vec<Arc<dyn Tool>>, ProviderError> {
            Ok(self.0.iter().map(|name| Upper::named(name)).collect())
        }
    }

    #[tokio::test]
    async fn test_register_set_is_all_or_nothing() {
        let mut tools = ToolsCollection::new();
        tools.add_tool(Upper::named("upper")).unwrap();

        let err = tools
            .register_set(&Fixed(vec!["shout", "upper", "yell"]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Registration(DomainError::DuplicateTool(ref name)) if name == "upper"
        ));
        assert_eq!(tools.len(), 1);
        assert!(!tools.contains("shout"));

        let err = tools
            .register_set(&Fixed(vec!["shout", "shout"]))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Registration(_)));
        assert_eq!(tools.len(), 1);

        let added = tools.register_set(&Fixed(vec!["shout", "yell"])).await.unwrap();
        assert_eq!(added, 2);
        assert!(tools.contains("shout") && tools.contains("yell"));
    }

    #[test]
    fn test_remove_tool() {
        let mut tools = ToolsCollection::new();
        tools.add_tool(Upper::named("upper")).unwrap();

        assert!(tools.remove_tool("upper"));
        assert!(!tools.remove_tool("upper"));
        assert!(tools.is_empty());
    }

    #[test]
    fn test_functions_sorted_snapshot() {
        let mut tools = ToolsCollection::new();
        tools.add_tool(Upper::named("zeta")).unwrap();
        tools.add_tool(Upper::named("alpha")).unwrap();

        let names: Vec<String> = tools.functions().into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);

        let schemas = tools.function_schemas();
        assert_eq!(schemas[0]["name"], "alpha");
        assert_eq!(schemas[0]["parameters"]["required"], json!(["text"]));
    }

    #[tokio::test]
    async fn test_execute_dispatch() {
        let mut tools = ToolsCollection::new();
        tools.add_tool(Upper::named("upper")).unwrap();

        let mut context = ExecutionContext::new().with("text", "mango");
        let output = tools.execute("upper", &mut context).await.unwrap();
        assert_eq!(output, "MANGO");
    }

    #[tokio::test]
    async fn test_execute_unknown_tool() {
        let tools = ToolsCollection::new();
        let mut context = ExecutionContext::new();

        let err = tools.execute("missing", &mut context).await.unwrap_err();
        assert_eq!(err, DomainError::UnknownTool("missing".to_string()));
        assert!(err.is_argument_error());
    }

    #[test]
    fn test_debug_lists_sorted_names() {
        let mut tools = ToolsCollection::new();
        tools.add_tool(Upper::named("b")).unwrap();
        tools.add_tool(Upper::named("a")).unwrap();
        assert_eq!(format!("{:?}", tools), r#"ToolsCollection { tools: ["a", "b"] }"#);
    }
}
