//! Error types for handoff-core
//!
//! [`Error`] is the taxonomy every failed run is classified into. Provider
//! and tool crates convert their own errors into it at the run loop boundary.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for handoff-core
pub type Result<T> = std::result::Result<T, Error>;

/// Which run budget was exhausted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    /// Agent-to-agent transitions
    Handoffs,
    /// Model responses classified as tool calls
    ToolIterations,
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Budget::Handoffs => f.write_str("handoff"),
            Budget::ToolIterations => f.write_str("tool iteration"),
        }
    }
}

/// Error type for run operations
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// Tool arguments do not conform to the tool's input schema
    #[error("Schema violation for tool '{tool}': {reason}")]
    SchemaViolation {
        /// Tool whose schema was violated
        tool: String,
        /// What did not type-check
        reason: String,
    },

    /// The model named a tool the current agent cannot call
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// A tool invocation did not finish within its timeout
    #[error("Tool '{tool}' timed out after {timeout:?}")]
    ToolTimeout {
        /// Tool that timed out
        tool: String,
        /// Timeout that elapsed
        timeout: Duration,
    },

    /// A tool body reported a failure
    ///
    /// Not fatal: the run loop records it as an error tool result.
    #[error("Tool '{tool}' failed: {reason}")]
    ToolFailed {
        /// Tool that failed
        tool: String,
        /// Failure reported by the tool
        reason: String,
    },

    /// Handoff target is not among the current agent's handoffs
    #[error("Agent '{from}' cannot hand off to '{target}'")]
    InvalidHandoff {
        /// Agent that issued the handoff
        from: String,
        /// Requested target
        target: String,
    },

    /// The provider answered but the answer cannot be classified
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    /// Network, timeout, or provider-side failure
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// A run budget was exhausted
    #[error("Run budget exceeded: {budget} limit of {limit} reached")]
    RunBudgetExceeded {
        /// Exhausted budget
        budget: Budget,
        /// Configured limit
        limit: usize,
    },

    /// The run was cancelled
    #[error("Run cancelled")]
    Cancelled,

    /// Startup-time configuration problem
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Fieldless discriminant of [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    SchemaViolation,
    ToolNotFound,
    ToolTimeout,
    ToolFailed,
    InvalidHandoff,
    MalformedResponse,
    ProviderUnavailable,
    RunBudgetExceeded,
    Cancelled,
    Configuration,
}

impl Error {
    /// Create a schema violation error
    pub fn schema_violation(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SchemaViolation {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    /// Create a tool failure error
    pub fn tool_failed(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    /// Get the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::SchemaViolation { .. } => ErrorKind::SchemaViolation,
            Error::ToolNotFound(_) => ErrorKind::ToolNotFound,
            Error::ToolTimeout { .. } => ErrorKind::ToolTimeout,
            Error::ToolFailed { .. } => ErrorKind::ToolFailed,
            Error::InvalidHandoff { .. } => ErrorKind::InvalidHandoff,
            Error::MalformedResponse(_) => ErrorKind::MalformedResponse,
            Error::ProviderUnavailable(_) => ErrorKind::ProviderUnavailable,
            Error::RunBudgetExceeded { .. } => ErrorKind::RunBudgetExceeded,
            Error::Cancelled => ErrorKind::Cancelled,
            Error::Configuration(_) => ErrorKind::Configuration,
        }
    }

    /// Whether a bounded retry may be attempted for this error
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::ProviderUnavailable(_) | Error::ToolTimeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidHandoff {
            from: "Triage".to_string(),
            target: "Ghost".to_string(),
        };
        assert_eq!(err.to_string(), "Agent 'Triage' cannot hand off to 'Ghost'");

        let err = Error::RunBudgetExceeded {
            budget: Budget::Handoffs,
            limit: 3,
        };
        assert_eq!(err.to_string(), "Run budget exceeded: handoff limit of 3 reached");
    }

    #[test]
    fn test_retryable_kinds() {
        assert!(Error::ProviderUnavailable("down".to_string()).is_retryable());
        assert!(
            Error::ToolTimeout {
                tool: "lookup".to_string(),
                timeout: Duration::from_secs(1),
            }
            .is_retryable()
        );

        assert!(!Error::MalformedResponse("?".to_string()).is_retryable());
        assert!(!Error::ToolNotFound("x".to_string()).is_retryable());
        assert!(!Error::schema_violation("x", "missing field").is_retryable());
        assert!(!Error::Cancelled.is_retryable());
    }

    #[test]
    fn test_kind() {
        assert_eq!(
            Error::schema_violation("get_flights", "bad").kind(),
            ErrorKind::SchemaViolation
        );
        assert_eq!(
            Error::tool_failed("get_flights", "boom").kind(),
            ErrorKind::ToolFailed
        );
        assert_eq!(Error::Cancelled.kind(), ErrorKind::Cancelled);
    }
}
