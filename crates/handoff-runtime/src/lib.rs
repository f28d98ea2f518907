//! Run loop for handoff-rs
//!
//! A [`Runner`] drives one user request through an [`AgentGraph`]: it calls
//! the current agent's model, executes requested tools, follows handoffs
//! between agents, and stops at the first plain-text answer. Budgets,
//! timeouts, retries and cancellation are set per run through [`RunConfig`].
//!
//! [`AgentGraph`]: handoff_core::AgentGraph

pub mod config;
pub mod hooks;
pub mod result;
pub mod retry;
pub mod runner;

pub use config::{RunConfig, RunConfigBuilder};
pub use hooks::{NoopRunHooks, RunHooks};
pub use result::{RunFailure, RunResult};
pub use retry::RetryPolicy;
pub use runner::Runner;

// Cancellation handle accepted by `Runner::run_with_cancel`
pub use tokio_util::sync::CancellationToken;
