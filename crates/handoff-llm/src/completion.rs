//! Completion request, raw model output, and response classification

use crate::{ContentBlock, Message};
use handoff_core::{AgentView, Error, ModelSettings};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request for one model invocation
///
/// Carries everything the model is allowed to see: the current agent's
/// instructions, its tool and handoff signatures, and the full conversation.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    /// Model binding used for this call
    pub model: ModelSettings,

    /// The current agent as presented to the model
    pub agent: AgentView,

    /// Conversation history
    pub messages: Vec<Message>,
}

impl CompletionRequest {
    /// Create a request for the given agent view and history
    pub fn new(model: ModelSettings, agent: AgentView, messages: Vec<Message>) -> Self {
        Self {
            model,
            agent,
            messages,
        }
    }
}

/// Reason the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural completion (end of turn)
    EndTurn,

    /// Hit max tokens limit
    MaxTokens,

    /// Stop sequence encountered
    StopSequence,

    /// Tool use requested
    ToolUse,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of input tokens
    pub input_tokens: usize,

    /// Number of output tokens
    pub output_tokens: usize,
}

impl TokenUsage {
    /// Total tokens used (input + output)
    pub fn total(&self) -> usize {
        self.input_tokens + self.output_tokens
    }

    /// Add another usage record into this one
    pub fn add(&mut self, other: TokenUsage) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
    }
}

/// A tool call signalled by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-assigned call ID
    pub id: String,
    /// Tool name
    pub name: String,
    /// Arguments (expected to be a JSON object)
    pub arguments: Value,
}

/// A handoff signalled by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandoffCall {
    /// Provider-assigned call ID
    pub id: String,
    /// Name of the requested target agent
    pub target: String,
}

/// Provider output normalized into provider-independent signals
///
/// Providers fill in whatever the endpoint returned; nothing is decided here.
/// [`ModelOutput::classify`] turns it into exactly one [`ModelResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOutput {
    /// Free text, if any
    pub text: Option<String>,

    /// Tool calls in the order the model issued them
    pub tool_calls: Vec<ToolCall>,

    /// Handoff calls in the order the model issued them
    pub handoffs: Vec<HandoffCall>,

    /// Why generation stopped
    pub stop_reason: StopReason,

    /// Token usage for this call
    pub usage: TokenUsage,
}

/// One model response, classified
#[derive(Debug, Clone, PartialEq)]
pub enum ModelResponse {
    /// Final answer; the run terminates
    Text(String),

    /// Tools to execute before the same agent is invoked again
    ///
    /// `then_handoff` holds a handoff issued in the same response; it is
    /// applied only after every tool result has been appended.
    ToolCalls {
        /// Calls in issue order
        calls: Vec<ToolCall>,
        /// Handoff deferred behind the tool calls
        then_handoff: Option<HandoffCall>,
    },

    /// Delegate to another agent
    Handoff(HandoffCall),
}

impl ModelOutput {
    /// Output containing only text
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            tool_calls: Vec::new(),
            handoffs: Vec::new(),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        }
    }

    /// Output with nothing in it
    pub fn empty() -> Self {
        Self {
            text: None,
            tool_calls: Vec::new(),
            handoffs: Vec::new(),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        }
    }

    /// Output containing a single tool call
    pub fn tool_call(id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self::empty().with_tool_call(id, name, arguments)
    }

    /// Output containing a single handoff
    pub fn handoff(id: impl Into<String>, target: impl Into<String>) -> Self {
        Self::empty().with_handoff(id, target)
    }

    /// Add a tool call
    pub fn with_tool_call(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: Value,
    ) -> Self {
        self.tool_calls.push(ToolCall {
            id: id.into(),
            name: name.into(),
            arguments,
        });
        self.stop_reason = StopReason::ToolUse;
        self
    }

    /// Add a handoff
    pub fn with_handoff(mut self, id: impl Into<String>, target: impl Into<String>) -> Self {
        self.handoffs.push(HandoffCall {
            id: id.into(),
            target: target.into(),
        });
        self.stop_reason = StopReason::ToolUse;
        self
    }

    /// Set the stop reason
    pub fn with_stop_reason(mut self, stop_reason: StopReason) -> Self {
        self.stop_reason = stop_reason;
        self
    }

    /// Set the token usage
    pub fn with_usage(mut self, input_tokens: usize, output_tokens: usize) -> Self {
        self.usage = TokenUsage {
            input_tokens,
            output_tokens,
        };
        self
    }

    /// Non-empty text, if any
    fn non_empty_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// The assistant message recording this output in the conversation
    pub fn to_message(&self) -> Message {
        let mut blocks = Vec::new();

        if let Some(text) = self.non_empty_text() {
            blocks.push(ContentBlock::Text {
                text: text.to_string(),
            });
        }
        blocks.extend(self.tool_calls.iter().map(|call| ContentBlock::ToolUse {
            id: call.id.clone(),
            name: call.name.clone(),
            input: call.arguments.clone(),
        }));
        blocks.extend(self.handoffs.iter().map(|call| ContentBlock::Handoff {
            id: call.id.clone(),
            target: call.target.clone(),
        }));

        Message::assistant_blocks(blocks)
    }

    /// Classify this output into exactly one response class
    ///
    /// Rules, in order:
    /// 1. Output cut off by the token limit is malformed.
    /// 2. More than one handoff is malformed.
    /// 3. Any tool call makes this [`ModelResponse::ToolCalls`]; a handoff in
    ///    the same output rides along as `then_handoff`.
    /// 4. A single handoff makes this [`ModelResponse::Handoff`].
    /// 5. Non-empty text makes this [`ModelResponse::Text`].
    /// 6. Anything else is malformed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedResponse`] when no class applies
    pub fn classify(self) -> Result<ModelResponse, Error> {
        if self.stop_reason == StopReason::MaxTokens {
            return Err(Error::MalformedResponse(
                "Response truncated at the token limit".to_string(),
            ));
        }

        if self.handoffs.len() > 1 {
            let targets: Vec<_> = self.handoffs.iter().map(|h| h.target.as_str()).collect();
            return Err(Error::MalformedResponse(format!(
                "Multiple handoffs in one response: {targets:?}"
            )));
        }

        let handoff = self.handoffs.into_iter().next();

        if !self.tool_calls.is_empty() {
            return Ok(ModelResponse::ToolCalls {
                calls: self.tool_calls,
                then_handoff: handoff,
            });
        }

        if let Some(handoff) = handoff {
            return Ok(ModelResponse::Handoff(handoff));
        }

        match self.text {
            Some(text) if !text.trim().is_empty() => Ok(ModelResponse::Text(text)),
            _ => Err(Error::MalformedResponse(
                "Response has no text, tool call, or handoff".to_string(),
            )),
        }
    }
}
