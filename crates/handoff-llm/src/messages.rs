//! Message types for model communication
//!
//! A conversation is a sequence of [`Message`]s with roles user, assistant
//! (an agent speaking), and tool (a tool result or a handoff marker).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User message
    User,
    /// Agent (model) message
    Assistant,
    /// Tool result or handoff marker
    Tool,
}

/// Content block in a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text content
    Text {
        /// Text content
        text: String,
    },

    /// Tool call requested by the model
    ToolUse {
        /// Unique ID for this tool call
        id: String,
        /// Tool name
        name: String,
        /// Tool arguments (JSON)
        input: Value,
    },

    /// Result of a tool call
    ToolResult {
        /// ID of the tool call this responds to
        tool_use_id: String,
        /// Tool that produced the result
        name: String,
        /// Structured result, or an error description
        content: Value,
        /// Whether this is an error result
        #[serde(skip_serializing_if = "Option::is_none")]
        is_error: Option<bool>,
    },

    /// Handoff requested by the model
    Handoff {
        /// Unique ID for this handoff call
        id: String,
        /// Name of the agent to delegate to
        target: String,
    },

    /// Marker recording that control moved between agents
    HandoffMarker {
        /// ID of the handoff call this answers
        handoff_id: String,
        /// Agent that handed off
        from: String,
        /// Agent now in control
        to: String,
    },
}

/// Message content: either simple text or structured blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Simple text content
    Text(String),
    /// Structured content blocks
    Blocks(Vec<ContentBlock>),
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Message role
    pub role: Role,

    /// Message content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<MessageContent>,
}

impl Message {
    /// Create a user message with text
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Some(MessageContent::Text(text.into())),
        }
    }

    /// Create an assistant message with text
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: Some(MessageContent::Text(text.into())),
        }
    }

    /// Create an assistant message from content blocks
    pub fn assistant_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::Assistant,
            content: Some(MessageContent::Blocks(blocks)),
        }
    }

    /// Create a tool message carrying a tool's structured result
    pub fn tool_result(tool_use_id: impl Into<String>, name: impl Into<String>, result: Value) -> Self {
        Self::tool_block(ContentBlock::ToolResult {
            tool_use_id: tool_use_id.into(),
            name: name.into(),
            content: result,
            is_error: None,
        })
    }

    /// Create a tool message carrying an error result
    pub fn tool_error(tool_use_id: impl Into<String>, name: impl Into<String>, error: impl Into<String>) -> Self {
        Self::tool_block(ContentBlock::ToolResult {
            tool_use_id: tool_use_id.into(),
            name: name.into(),
            content: Value::String(error.into()),
            is_error: Some(true),
        })
    }

    /// Create the transition marker appended when control moves between agents
    pub fn handoff_marker(
        handoff_id: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self::tool_block(ContentBlock::HandoffMarker {
            handoff_id: handoff_id.into(),
            from: from.into(),
            to: to.into(),
        })
    }

    fn tool_block(block: ContentBlock) -> Self {
        Self {
            role: Role::Tool,
            content: Some(MessageContent::Blocks(vec![block])),
        }
    }

    /// Content blocks of this message (text content yields none)
    pub fn blocks(&self) -> &[ContentBlock] {
        match &self.content {
            Some(MessageContent::Blocks(blocks)) => blocks,
            _ => &[],
        }
    }

    /// Extract text content from the message (convenience method)
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Some(MessageContent::Text(s)) => Some(s),
            Some(MessageContent::Blocks(blocks)) => blocks.iter().find_map(|b| match b {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            }),
            None => None,
        }
    }

    /// Extract tool call requests from assistant messages
    pub fn tool_uses(&self) -> Vec<&ContentBlock> {
        self.blocks()
            .iter()
            .filter(|b| matches!(b, ContentBlock::ToolUse { .. }))
            .collect()
    }

    /// Check if this message contains any tool calls
    pub fn has_tool_uses(&self) -> bool {
        !self.tool_uses().is_empty()
    }

    /// Check if this message is a tool result
    pub fn is_tool_result(&self) -> bool {
        self.blocks()
            .iter()
            .any(|b| matches!(b, ContentBlock::ToolResult { .. }))
    }

    /// Check if this message is a handoff marker
    pub fn is_handoff_marker(&self) -> bool {
        self.blocks()
            .iter()
            .any(|b| matches!(b, ContentBlock::HandoffMarker { .. }))
    }
}
