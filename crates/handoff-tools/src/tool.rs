//! Tool trait definition

use async_trait::async_trait;
use handoff_core::{Result, ToolDefinition};
use serde_json::Value;

/// Trait for tools that agents can execute
///
/// Tools are functions that agents call to ground their answers in
/// structured data. A tool must not touch the conversation or the agent
/// graph; the runner is the only component that appends its result.
///
/// Bodies report failure with [`Error::ToolFailed`](handoff_core::Error::ToolFailed).
/// The runner records that as an error tool result and keeps going. Tools
/// with a documented "not found" policy return their sentinel value instead
/// of failing.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with already-validated parameters
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Get the tool's name
    ///
    /// Must be unique within a [`ToolRegistry`](crate::ToolRegistry)
    fn name(&self) -> &str;

    /// Get the tool's description
    ///
    /// This description helps the model decide when to call the tool
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    ///
    /// # Example
    ///
    /// ```
    /// use handoff_core::tool::schema;
    /// use serde_json::json;
    ///
    /// let schema = schema::object(
    ///     json!({ "destination": schema::string("City or region") }),
    ///     vec!["destination"],
    /// );
    /// assert_eq!(schema["additionalProperties"], false);
    /// ```
    fn input_schema(&self) -> Value;

    /// Definition advertised to the model
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description(), self.input_schema())
    }
}
