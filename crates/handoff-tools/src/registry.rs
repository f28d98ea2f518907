//! Tool registry for managing available tools

use crate::{Tool, schema::validate_arguments};
use handoff_core::{Error, Result, ToolCatalog, ToolDefinition};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Registry for managing tools
///
/// Shared read-only between runs once populated; registration takes a write
/// lock so a registry can still be filled from several places at startup.
pub struct ToolRegistry {
    tools: RwLock<HashMap<String, Arc<dyn Tool>>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self {
            tools: RwLock::new(HashMap::new()),
        }
    }
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if a tool with the same name is
    /// already registered.
    pub fn register(&self, tool: Arc<dyn Tool>) -> Result<()> {
        let mut tools = self.tools.write().unwrap_or_else(PoisonError::into_inner);
        let name = tool.name().to_string();
        if tools.contains_key(&name) {
            return Err(Error::Configuration(format!(
                "tool '{name}' is already registered"
            )));
        }
        debug!(tool = %name, "Registered tool");
        tools.insert(name, tool);
        Ok(())
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.get(name).cloned()
    }

    /// Whether a tool with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.contains_key(name)
    }

    /// Validate `arguments` against the tool's schema, then run it
    ///
    /// # Errors
    ///
    /// - [`Error::ToolNotFound`] for an unknown name
    /// - [`Error::SchemaViolation`] when the arguments do not conform
    /// - whatever the tool body returns, typically [`Error::ToolFailed`]
    pub async fn invoke(&self, name: &str, arguments: Value) -> Result<Value> {
        let tool = self
            .get(name)
            .ok_or_else(|| Error::ToolNotFound(name.to_string()))?;

        validate_arguments(name, &tool.input_schema(), &arguments)?;

        debug!(tool = %name, "Invoking tool");
        tool.execute(arguments).await
    }

    /// List all registered tools, sorted by name
    pub fn list_tools(&self) -> Vec<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        let mut list: Vec<_> = tools.values().cloned().collect();
        list.sort_by(|a, b| a.name().cmp(b.name()));
        list
    }

    /// Definitions of every registered tool, sorted by name
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.list_tools().iter().map(|t| t.definition()).collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.is_empty()
    }
}

impl ToolCatalog for ToolRegistry {
    fn definition(&self, name: &str) -> Option<ToolDefinition> {
        self.get(name).map(|tool| tool.definition())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use handoff_core::tool::schema;
    use serde_json::json;

    struct Lookup;

    #[async_trait]
    impl Tool for Lookup {
        async fn execute(&self, params: Value) -> Result<Value> {
            let key = params["key"].as_str().unwrap_or_default();
            if key == "boom" {
                return Err(Error::tool_failed("lookup", "backend refused"));
            }
            Ok(json!([format!("value for {key}")]))
        }

        fn name(&self) -> &str {
            "lookup"
        }

        fn description(&self) -> &str {
            "Look a key up"
        }

        fn input_schema(&self) -> Value {
            schema::object(json!({ "key": schema::string("Key") }), vec!["key"])
        }
    }

    fn registry() -> ToolRegistry {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(Lookup)).unwrap();
        registry
    }

    #[test]
    fn test_register_and_get() {
        let registry = registry();
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
        assert!(registry.contains("lookup"));
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let registry = registry();
        let err = registry.register(Arc::new(Lookup)).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_invoke_runs_tool() {
        let result = registry().invoke("lookup", json!({"key": "a"})).await.unwrap();
        assert_eq!(result, json!(["value for a"]));
    }

    #[tokio::test]
    async fn test_invoke_unknown_tool() {
        let err = registry().invoke("nope", json!({})).await.unwrap_err();
        assert!(matches!(err, Error::ToolNotFound(ref name) if name == "nope"));
    }

    #[tokio::test]
    async fn test_invoke_validates_before_executing() {
        let err = registry().invoke("lookup", json!({"key": 1})).await.unwrap_err();
        assert!(matches!(err, Error::SchemaViolation { ref tool, .. } if tool == "lookup"));
    }

    #[test]
    fn test_tool_failure_is_passed_through() {
        let err = tokio_test::block_on(registry().invoke("lookup", json!({"key": "boom"})))
            .unwrap_err();
        assert!(matches!(err, Error::ToolFailed { .. }));
    }

    #[test]
    fn test_catalog_definitions() {
        let registry = registry();
        let definition = ToolCatalog::definition(&registry, "lookup").unwrap();
        assert_eq!(definition.name, "lookup");
        assert_eq!(definition.input_schema["required"][0], "key");
        assert!(ToolCatalog::definition(&registry, "missing").is_none());
        assert_eq!(registry.definitions().len(), 1);
    }
}
