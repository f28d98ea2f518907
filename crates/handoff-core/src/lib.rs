//! Core abstractions for handoff-rs
//!
//! This crate defines the vocabulary shared by every other crate in the
//! workspace: agent definitions and the handoff graph they form, the
//! tool-definition contract the model sees, model settings, and the error
//! taxonomy a run can fail with.

pub mod agent;
pub mod error;
pub mod graph;
pub mod model;
pub mod tool;

pub use agent::{
    Agent, AgentBuilder, AgentId, AgentView, HandoffDefinition, ToolCatalog, handoff_tool_name,
};
pub use error::{Budget, Error, ErrorKind, Result};
pub use graph::AgentGraph;
pub use model::ModelSettings;
pub use tool::ToolDefinition;
