//! Append-only conversation history for a single run

use crate::{ContentBlock, Message};
use serde::Serialize;

/// Ordered, append-only message history shared by every model call in a run
///
/// There is no way to remove or edit a message once appended. Batches are
/// appended with [`Conversation::extend`] so that a step either lands whole
/// or not at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Start a conversation seeded with the user's input
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(user_input)],
        }
    }

    /// Start a conversation from prior messages
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Append one message
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Append a batch of messages
    pub fn extend(&mut self, messages: impl IntoIterator<Item = Message>) {
        self.messages.extend(messages);
    }

    /// All messages, oldest first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if the conversation is empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Most recent message
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Tool result blocks in the order they were appended
    pub fn tool_results(&self) -> Vec<&ContentBlock> {
        self.blocks()
            .filter(|b| matches!(b, ContentBlock::ToolResult { .. }))
            .collect()
    }

    /// Handoff marker blocks in the order they were appended
    pub fn handoff_markers(&self) -> Vec<&ContentBlock> {
        self.blocks()
            .filter(|b| matches!(b, ContentBlock::HandoffMarker { .. }))
            .collect()
    }

    fn blocks(&self) -> impl Iterator<Item = &ContentBlock> {
        self.messages.iter().flat_map(Message::blocks)
    }

    /// Consume the conversation, returning its messages
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_seeded_with_user_input() {
        let conversation = Conversation::new("Plan a trip");
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.messages()[0].text(), Some("Plan a trip"));
    }

    #[test]
    fn test_append_order() {
        let mut conversation = Conversation::new("hi");
        conversation.push(Message::assistant("hello"));
        conversation.extend([
            Message::tool_result("c1", "a", json!(1)),
            Message::handoff_marker("h1", "A", "B"),
            Message::tool_result("c2", "b", json!(2)),
        ]);

        assert_eq!(conversation.len(), 5);
        assert_eq!(conversation.handoff_markers().len(), 1);

        let names: Vec<_> = conversation
            .tool_results()
            .into_iter()
            .filter_map(|b| match b {
                ContentBlock::ToolResult { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(conversation.last().map(Message::is_tool_result), Some(true));
    }
}
