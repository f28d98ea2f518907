//! Tool definitions as presented to the model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tool definition for a model request
///
/// This is the signature half of a tool: name, description, and the JSON
/// schema of its input. The executable half lives in `handoff-tools`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (must match the tool in the registry)
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON schema for the tool's input parameters
    pub input_schema: Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Helper module to build JSON schemas for tools
pub mod schema {
    use serde_json::{Value, json};

    /// Create a JSON schema for an object with properties
    ///
    /// # Example
    ///
    /// ```
    /// use handoff_core::tool::schema;
    /// use serde_json::json;
    ///
    /// let schema = schema::object(
    ///     json!({
    ///         "destination": schema::string("City or region"),
    ///     }),
    ///     vec!["destination"],
    /// );
    /// assert_eq!(schema["required"][0], "destination");
    /// ```
    pub fn object(properties: Value, required: Vec<&str>) -> Value {
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }

    /// Object schema with no properties
    pub fn empty_object() -> Value {
        object(json!({}), vec![])
    }

    /// String property schema
    pub fn string(description: &str) -> Value {
        json!({
            "type": "string",
            "description": description,
        })
    }

    /// Number property schema
    pub fn number(description: &str) -> Value {
        json!({
            "type": "number",
            "description": description,
        })
    }

    /// Integer property schema
    pub fn integer(description: &str) -> Value {
        json!({
            "type": "integer",
            "description": description,
        })
    }

    /// Boolean property schema
    pub fn boolean(description: &str) -> Value {
        json!({
            "type": "boolean",
            "description": description,
        })
    }

    /// Array property schema
    pub fn array(description: &str, items: Value) -> Value {
        json!({
            "type": "array",
            "description": description,
            "items": items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_definition_creation() {
        let schema = schema::object(
            json!({
                "destination": schema::string("Where to"),
            }),
            vec!["destination"],
        );

        let tool = ToolDefinition::new("get_flights", "Find flights", schema.clone());
        assert_eq!(tool.name, "get_flights");
        assert_eq!(tool.description, "Find flights");
        assert_eq!(tool.input_schema, schema);
    }

    #[test]
    fn test_schema_builders() {
        assert_eq!(schema::string("s")["type"], "string");
        assert_eq!(schema::number("n")["type"], "number");
        assert_eq!(schema::integer("i")["type"], "integer");
        assert_eq!(schema::boolean("b")["type"], "boolean");
        assert_eq!(schema::array("a", schema::string("s"))["items"]["type"], "string");

        let empty = schema::empty_object();
        assert_eq!(empty["type"], "object");
        assert_eq!(empty["required"], json!([]));
        assert_eq!(empty["additionalProperties"], false);
    }
}
