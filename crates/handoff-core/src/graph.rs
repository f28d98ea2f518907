//! Arena of agents and the handoff edges between them
//!
//! Handoff edges may form cycles; the graph does not prevent them. Bounding
//! traversal is the run loop's job.

use crate::agent::{Agent, AgentId, AgentView, HandoffDefinition, ToolCatalog, handoff_tool_name};
use crate::{Error, Result};
use std::collections::HashMap;
use tracing::debug;

/// Directed handoff graph over an arena of agents
///
/// # Example
///
/// ```
/// use handoff_core::{Agent, AgentGraph, ModelSettings};
/// use std::sync::Arc;
///
/// let model = Arc::new(ModelSettings::default());
/// let mut graph = AgentGraph::new();
/// let triage = graph.add(Agent::builder("Triage", model.clone()).build()?)?;
/// let booking = graph.add(Agent::builder("Booking", model).build()?)?;
/// graph.connect(triage, booking)?;
///
/// assert_eq!(graph.resolve_handoff(triage, "Booking")?, booking);
/// assert!(graph.resolve_handoff(booking, "Triage").is_err());
/// # Ok::<(), handoff_core::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct AgentGraph {
    agents: Vec<Agent>,
    by_name: HashMap<String, AgentId>,
}

impl AgentGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an agent to the arena
    ///
    /// # Errors
    ///
    /// Returns a configuration error if an agent with the same name exists
    pub fn add(&mut self, agent: Agent) -> Result<AgentId> {
        if self.by_name.contains_key(agent.name()) {
            return Err(Error::Configuration(format!(
                "Duplicate agent name '{}'",
                agent.name()
            )));
        }

        let id = AgentId(self.agents.len());
        self.by_name.insert(agent.name().to_string(), id);
        self.agents.push(agent);
        Ok(id)
    }

    /// Allow `from` to hand off to `to`; adding an existing edge is a no-op
    ///
    /// # Errors
    ///
    /// Returns a configuration error if either id is not in this graph, or if
    /// `to` would be offered under the same function name as another of
    /// `from`'s handoffs
    pub fn connect(&mut self, from: AgentId, to: AgentId) -> Result<()> {
        let target = self.agent(to)?;
        let source = self.agent(from)?;
        if source.handoffs().contains(&to) {
            return Ok(());
        }

        let tool_name = handoff_tool_name(target.name());
        if let Some(clash) = source
            .handoffs()
            .iter()
            .filter_map(|id| self.get(*id))
            .find(|existing| handoff_tool_name(existing.name()) == tool_name)
        {
            return Err(Error::Configuration(format!(
                "Agent '{}' cannot hand off to both '{}' and '{}': both are offered as '{tool_name}'",
                source.name(),
                clash.name(),
                target.name()
            )));
        }

        let agent = self
            .agents
            .get_mut(from.0)
            .ok_or_else(|| Error::Configuration(format!("Unknown agent id {from}")))?;
        agent.handoffs.push(to);
        debug!(from = %agent.name(), to = %to, "Handoff edge added");
        Ok(())
    }

    /// Get an agent by id
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.0)
    }

    /// Get an agent by id, failing with a configuration error if absent
    pub fn agent(&self, id: AgentId) -> Result<&Agent> {
        self.get(id)
            .ok_or_else(|| Error::Configuration(format!("Unknown agent id {id}")))
    }

    /// Look up an agent id by name
    pub fn id_of(&self, name: &str) -> Option<AgentId> {
        self.by_name.get(name).copied()
    }

    /// Number of agents in the graph
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Iterate over all agents with their ids
    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &Agent)> {
        self.agents.iter().enumerate().map(|(i, a)| (AgentId(i), a))
    }

    /// Resolve a handoff target by name against `from`'s handoff set
    ///
    /// Only the current agent's own handoffs are consulted; a name that exists
    /// elsewhere in the graph is still rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHandoff`] if `target` is not one of `from`'s handoffs
    pub fn resolve_handoff(&self, from: AgentId, target: &str) -> Result<AgentId> {
        let agent = self.agent(from)?;
        agent
            .handoffs()
            .iter()
            .copied()
            .find(|id| self.get(*id).is_some_and(|a| a.name() == target))
            .ok_or_else(|| Error::InvalidHandoff {
                from: agent.name().to_string(),
                target: target.to_string(),
            })
    }

    /// Build the view of an agent that is sent to the model
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToolNotFound`] if the agent lists a tool the catalog
    /// does not know, and a configuration error if one of its tools shares a
    /// name with one of its handoff functions
    pub fn describe(&self, id: AgentId, catalog: &dyn ToolCatalog) -> Result<AgentView> {
        let agent = self.agent(id)?;

        let tools = agent
            .tools()
            .iter()
            .map(|name| {
                catalog
                    .definition(name)
                    .ok_or_else(|| Error::ToolNotFound(name.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        let handoffs = agent
            .handoffs()
            .iter()
            .map(|target| self.agent(*target).map(HandoffDefinition::to_agent))
            .collect::<Result<Vec<_>>>()?;

        if let Some(handoff) = handoffs
            .iter()
            .find(|h| agent.tools().iter().any(|t| *t == h.tool_name))
        {
            return Err(Error::Configuration(format!(
                "Agent '{}' has a tool named '{}', which is also its handoff to '{}'",
                agent.name(),
                handoff.tool_name,
                handoff.agent_name
            )));
        }

        Ok(AgentView {
            name: agent.name().to_string(),
            instructions: agent.instructions().to_string(),
            tools,
            handoffs,
        })
    }
}
