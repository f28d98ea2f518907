//! Outcome of a run

use handoff_core::{AgentId, Error, ErrorKind};
use handoff_llm::{Conversation, TokenUsage};
use thiserror::Error;

/// A run that reached a final answer
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Final text answer
    pub final_output: String,

    /// Agent that produced the answer
    pub last_agent: AgentId,

    /// Name of that agent
    pub last_agent_name: String,

    /// Full conversation, ending with the final answer
    pub conversation: Conversation,

    /// Token usage summed over every model call
    pub usage: TokenUsage,

    /// Number of handoffs applied
    pub handoffs: usize,

    /// Number of model responses that requested tools
    pub tool_iterations: usize,
}

/// A run that failed
///
/// Carries the conversation as it stood after the last completed step; a
/// step that failed midway contributes nothing to it.
#[derive(Debug, Clone, Error)]
#[error("run failed in agent '{agent}': {error}")]
pub struct RunFailure {
    /// Classified cause
    #[source]
    pub error: Error,

    /// Agent that was active when the run failed
    pub agent: String,

    /// Last stable conversation
    pub conversation: Conversation,
}

impl RunFailure {
    /// Kind of the underlying error
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}
