//! Travel planning agents
//!
//! A coordinator agent hands a traveller's request to three specialists:
//!
//! - `DestinationAgent` suggests places for a mood (no tools)
//! - `BookingAgent` looks up flights and hotels
//! - `ExploreAgent` suggests attractions and food
//!
//! The tools return fixed mock data for Bali, Paris and Las Vegas and a
//! documented "not found" value for anything else.
//!
//! # Example
//!
//! ```no_run
//! use handoff_llm::providers::ScriptedProvider;
//! use handoff_runtime::RunConfig;
//! use std::sync::Arc;
//! use travel_planner::TravelPlanner;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = TravelPlanner::new(handoff_core::ModelSettings::default())?;
//! let config = RunConfig::new(Arc::new(ScriptedProvider::new()));
//! let result = planner.plan_sync(travel_planner::prompts::SAMPLE_REQUEST, &config)?;
//! println!("{}", result.final_output);
//! # Ok(())
//! # }
//! ```

pub mod agents;
pub mod prompts;
pub mod tools;

pub use agents::{TravelAgents, TravelPlanner, build_agents};
pub use tools::{ExploreLocalTool, GetFlightsTool, SuggestHotelsTool, register_travel_tools};
