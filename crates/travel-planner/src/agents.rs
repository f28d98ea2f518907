//! The travel agent graph
//!
//! ```text
//!                 AI Travel Designer Agent
//!                 /          |           \
//!       BookingAgent   ExploreAgent   DestinationAgent
//! ```
//!
//! Specialists cannot hand back; each answers the traveller directly.

use crate::prompts::{
    BOOKING_AGENT_NAME, BOOKING_INSTRUCTIONS, DESTINATION_AGENT_NAME, DESTINATION_INSTRUCTIONS,
    EXPLORE_AGENT_NAME, EXPLORE_INSTRUCTIONS, PLANNER_INSTRUCTIONS, PLANNER_NAME,
};
use crate::tools::register_travel_tools;
use handoff_core::{Agent, AgentGraph, AgentId, ModelSettings, Result};
use handoff_runtime::{CancellationToken, RunConfig, RunFailure, RunHooks, RunResult, Runner};
use handoff_tools::ToolRegistry;
use std::sync::Arc;
use tracing::debug;

/// Ids of the travel agents inside their graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TravelAgents {
    pub planner: AgentId,
    pub destination: AgentId,
    pub booking: AgentId,
    pub explore: AgentId,
}

/// Add the four travel agents to `graph`, all sharing `model`
pub fn build_agents(graph: &mut AgentGraph, model: &Arc<ModelSettings>) -> Result<TravelAgents> {
    let destination = graph.add(
        Agent::builder(DESTINATION_AGENT_NAME, model.clone())
            .instructions(DESTINATION_INSTRUCTIONS)
            .handoff_description("Recommends destinations that match the traveller's mood")
            .build()?,
    )?;

    let booking = graph.add(
        Agent::builder(BOOKING_AGENT_NAME, model.clone())
            .instructions(BOOKING_INSTRUCTIONS)
            .handoff_description("Finds flight and hotel options for a chosen destination")
            .tools(["get_flights", "suggest_hotels"])
            .build()?,
    )?;

    let explore = graph.add(
        Agent::builder(EXPLORE_AGENT_NAME, model.clone())
            .instructions(EXPLORE_INSTRUCTIONS)
            .handoff_description("Suggests attractions and food in a chosen destination")
            .tool("explore_local")
            .build()?,
    )?;

    let planner = graph.add(
        Agent::builder(PLANNER_NAME, model.clone())
            .instructions(PLANNER_INSTRUCTIONS)
            .build()?,
    )?;

    for target in [booking, explore, destination] {
        graph.connect(planner, target)?;
    }

    debug!(agents = graph.len(), "Travel agent graph built");

    Ok(TravelAgents {
        planner,
        destination,
        booking,
        explore,
    })
}

/// Ready-to-run travel planner: agents, tools and a runner
pub struct TravelPlanner {
    runner: Runner,
    agents: TravelAgents,
}

impl TravelPlanner {
    /// Build the graph and register the travel tools
    pub fn new(model: ModelSettings) -> Result<Self> {
        let model = Arc::new(model);
        let mut graph = AgentGraph::new();
        let agents = build_agents(&mut graph, &model)?;

        let tools = ToolRegistry::new();
        register_travel_tools(&tools)?;

        // Fail at startup, not mid-run, if an agent lists an unknown tool
        for (id, _) in graph.iter() {
            graph.describe(id, &tools)?;
        }

        Ok(Self {
            runner: Runner::new(Arc::new(graph), Arc::new(tools)),
            agents,
        })
    }

    /// Attach lifecycle hooks
    pub fn with_hooks(mut self, hooks: Arc<dyn RunHooks>) -> Self {
        self.runner = self.runner.with_hooks(hooks);
        self
    }

    /// Agent ids
    pub fn agents(&self) -> TravelAgents {
        self.agents
    }

    /// Underlying runner
    pub fn runner(&self) -> &Runner {
        &self.runner
    }

    /// Plan a trip starting at the coordinator
    pub async fn plan(
        &self,
        request: impl Into<String>,
        config: &RunConfig,
    ) -> std::result::Result<RunResult, RunFailure> {
        self.runner.run(self.agents.planner, request, config).await
    }

    /// Plan a trip, stopping early once `cancel` fires
    pub async fn plan_with_cancel(
        &self,
        request: impl Into<String>,
        config: &RunConfig,
        cancel: CancellationToken,
    ) -> std::result::Result<RunResult, RunFailure> {
        self.runner
            .run_with_cancel(self.agents.planner, request, config, cancel)
            .await
    }

    /// Blocking variant of [`plan`](Self::plan)
    pub fn plan_sync(
        &self,
        request: impl Into<String>,
        config: &RunConfig,
    ) -> std::result::Result<RunResult, RunFailure> {
        self.runner.run_sync(self.agents.planner, request, config)
    }
}
