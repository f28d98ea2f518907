//! Lifecycle callbacks for a run
//!
//! Implement [`RunHooks`] to observe a run as it moves between agents and
//! tools, e.g. to stream progress to a client. Every method has a no-op
//! default. Hooks observe; they cannot alter the run.

use async_trait::async_trait;
use handoff_core::Error;
use handoff_llm::ToolCall;
use serde_json::Value;

/// Observer of run lifecycle events
#[async_trait]
pub trait RunHooks: Send + Sync {
    /// Called when an agent becomes the active agent
    async fn on_agent_start(&self, _agent: &str) {}

    /// Called after a handoff from one agent to another is applied
    async fn on_handoff(&self, _from: &str, _to: &str) {}

    /// Called before a tool is invoked
    async fn on_tool_start(&self, _agent: &str, _call: &ToolCall) {}

    /// Called when a tool invocation finishes, successfully or not
    async fn on_tool_end(
        &self,
        _agent: &str,
        _call: &ToolCall,
        _result: std::result::Result<&Value, &str>,
        _duration_ms: u64,
    ) {
    }

    /// Called when the run produces its final output
    async fn on_complete(&self, _agent: &str, _output: &str) {}

    /// Called when the run fails
    async fn on_error(&self, _agent: &str, _error: &Error) {}
}

/// Hooks that do nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRunHooks;

#[async_trait]
impl RunHooks for NoopRunHooks {}
