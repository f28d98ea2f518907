//! Agent definitions
//!
//! An [`Agent`] is a passive configuration object: a named, instructed role
//! bound to a model, a set of tool names it may call, and a set of peer agents
//! it may hand off to. Agents live in an [`AgentGraph`](crate::AgentGraph)
//! arena and refer to each other by [`AgentId`], never by embedding.

use crate::tool::{ToolDefinition, schema};
use crate::{Error, ModelSettings, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

const HANDOFF_TOOL_PREFIX: &str = "transfer_to_";

/// Stable identifier of an agent inside an [`AgentGraph`](crate::AgentGraph)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub(crate) usize);

impl AgentId {
    /// Position of the agent in its graph
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent#{}", self.0)
    }
}

/// Lookup of tool signatures by name
///
/// Implemented by the tool registry; used to describe an agent to the model
/// without this crate depending on tool execution.
pub trait ToolCatalog {
    /// Definition of the named tool, if registered
    fn definition(&self, name: &str) -> Option<ToolDefinition>;
}

/// One role in a multi-agent run
#[derive(Debug, Clone)]
pub struct Agent {
    name: String,
    instructions: String,
    handoff_description: Option<String>,
    model: Arc<ModelSettings>,
    tools: Vec<String>,
    pub(crate) handoffs: Vec<AgentId>,
}

impl Agent {
    /// Create a builder for an agent
    pub fn builder(name: impl Into<String>, model: Arc<ModelSettings>) -> AgentBuilder {
        AgentBuilder::new(name, model)
    }

    /// Get the agent's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the agent's system instructions
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Get the description shown to agents that may hand off to this one
    pub fn handoff_description(&self) -> Option<&str> {
        self.handoff_description.as_deref()
    }

    /// Get the shared model binding
    pub fn model(&self) -> &Arc<ModelSettings> {
        &self.model
    }

    /// Get the names of the tools this agent may call, in order
    pub fn tools(&self) -> &[String] {
        &self.tools
    }

    /// Check whether this agent may call the named tool
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t == name)
    }

    /// Get the agents this agent may hand off to
    pub fn handoffs(&self) -> &[AgentId] {
        &self.handoffs
    }

    /// Whether this agent can only answer, never delegate
    pub fn is_terminal_only(&self) -> bool {
        self.handoffs.is_empty()
    }
}

/// Builder for [`Agent`]
pub struct AgentBuilder {
    name: String,
    instructions: String,
    handoff_description: Option<String>,
    model: Arc<ModelSettings>,
    tools: Vec<String>,
}

impl AgentBuilder {
    /// Create a new builder
    pub fn new(name: impl Into<String>, model: Arc<ModelSettings>) -> Self {
        Self {
            name: name.into(),
            instructions: String::new(),
            handoff_description: None,
            model,
            tools: Vec::new(),
        }
    }

    /// Set the system instructions
    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Set the description other agents see when offered a handoff here
    pub fn handoff_description(mut self, description: impl Into<String>) -> Self {
        self.handoff_description = Some(description.into());
        self
    }

    /// Allow a tool by name; duplicates are ignored
    pub fn tool(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.tools.contains(&name) {
            self.tools.push(name);
        }
        self
    }

    /// Allow several tools by name
    pub fn tools<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().fold(self, AgentBuilder::tool)
    }

    /// Build the agent
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the name is blank
    pub fn build(self) -> Result<Agent> {
        if self.name.trim().is_empty() {
            return Err(Error::Configuration("Agent name must not be empty".to_string()));
        }

        Ok(Agent {
            name: self.name,
            instructions: self.instructions,
            handoff_description: self.handoff_description,
            model: self.model,
            tools: self.tools,
            handoffs: Vec::new(),
        })
    }
}

/// A handoff target as presented to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandoffDefinition {
    /// Name of the target agent
    pub agent_name: String,

    /// Function name the model calls to request this handoff
    pub tool_name: String,

    /// Description shown to the model
    pub description: String,
}

impl HandoffDefinition {
    /// Describe a handoff to the given agent
    pub fn to_agent(agent: &Agent) -> Self {
        let mut description = format!(
            "Handoff to the {} agent to handle the request.",
            agent.name()
        );
        if let Some(extra) = agent.handoff_description() {
            description.push(' ');
            description.push_str(extra);
        }

        Self {
            agent_name: agent.name().to_string(),
            tool_name: handoff_tool_name(agent.name()),
            description,
        }
    }

    /// The handoff as a function-tool definition taking no arguments
    pub fn as_tool(&self) -> ToolDefinition {
        ToolDefinition::new(&self.tool_name, &self.description, schema::empty_object())
    }
}

/// Function name under which a handoff to `agent_name` is offered
///
/// Non-alphanumeric characters become underscores and the result is
/// lowercased: `"AI Travel Designer"` becomes `transfer_to_ai_travel_designer`.
pub fn handoff_tool_name(agent_name: &str) -> String {
    let slug: String = agent_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{HANDOFF_TOOL_PREFIX}{slug}")
}

/// What the model is permitted to see and call for one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    /// Agent name
    pub name: String,

    /// System instructions
    pub instructions: String,

    /// Signatures of the tools the agent may call
    pub tools: Vec<ToolDefinition>,

    /// Handoff targets the agent may delegate to
    pub handoffs: Vec<HandoffDefinition>,
}

impl AgentView {
    /// Find the handoff offered under the given function name
    pub fn handoff_for_tool(&self, tool_name: &str) -> Option<&HandoffDefinition> {
        self.handoffs.iter().find(|h| h.tool_name == tool_name)
    }

    /// Names of the handoff targets
    pub fn handoff_names(&self) -> Vec<&str> {
        self.handoffs.iter().map(|h| h.agent_name.as_str()).collect()
    }

    /// Tool definitions followed by one function definition per handoff
    pub fn all_tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .cloned()
            .chain(self.handoffs.iter().map(HandoffDefinition::as_tool))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> Arc<ModelSettings> {
        Arc::new(ModelSettings::default())
    }

    #[test]
    fn test_builder() {
        let agent = Agent::builder("BookingAgent", model())
            .instructions("You book flights and hotels.")
            .tools(["get_flights", "suggest_hotels", "get_flights"])
            .build()
            .unwrap();

        assert_eq!(agent.name(), "BookingAgent");
        assert_eq!(agent.instructions(), "You book flights and hotels.");
        assert_eq!(agent.tools(), &["get_flights", "suggest_hotels"]);
        assert!(agent.has_tool("suggest_hotels"));
        assert!(!agent.has_tool("explore_local"));
        assert!(agent.is_terminal_only());
    }

    #[test]
    fn test_blank_name_rejected() {
        let result = Agent::builder("  ", model()).build();
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_model_binding_is_shared() {
        let shared = model();
        let a = Agent::builder("A", shared.clone()).build().unwrap();
        let b = Agent::builder("B", shared.clone()).build().unwrap();
        assert!(Arc::ptr_eq(a.model(), b.model()));
    }

    #[test]
    fn test_handoff_tool_name() {
        assert_eq!(handoff_tool_name("BookingAgent"), "transfer_to_bookingagent");
        assert_eq!(
            handoff_tool_name("AI Travel Designer Agent"),
            "transfer_to_ai_travel_designer_agent"
        );
    }

    #[test]
    fn test_handoff_definition() {
        let agent = Agent::builder("ExploreAgent", model())
            .handoff_description("Suggests attractions and food.")
            .build()
            .unwrap();

        let handoff = HandoffDefinition::to_agent(&agent);
        assert_eq!(handoff.agent_name, "ExploreAgent");
        assert_eq!(handoff.tool_name, "transfer_to_exploreagent");
        assert!(handoff.description.ends_with("Suggests attractions and food."));

        let tool = handoff.as_tool();
        assert_eq!(tool.name, "transfer_to_exploreagent");
        assert_eq!(tool.input_schema["type"], "object");
    }
}
