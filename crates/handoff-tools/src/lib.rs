//! Tool management and execution for handoff-rs
//!
//! Tools are first-class values implementing [`Tool`], stored in a
//! [`ToolRegistry`] keyed by name. The registry validates call arguments
//! against each tool's declared input schema before running the tool body.

pub mod registry;
pub mod schema;
pub mod tool;

pub use registry::ToolRegistry;
pub use schema::validate_arguments;
pub use tool::Tool;
