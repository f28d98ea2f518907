//! Model provider abstraction layer for handoff-rs
//!
//! This crate provides provider-agnostic abstractions for talking to a
//! chat-completion endpoint. It includes:
//!
//! - Message types and the append-only [`Conversation`]
//! - Completion request types and the normalized [`ModelOutput`]
//! - Classification of an output into a [`ModelResponse`]
//! - The [`ModelProvider`] trait
//! - Concrete providers: an OpenAI-compatible HTTP provider (behind the
//!   `openai` feature) and a scripted provider for tests

pub mod completion;
pub mod conversation;
pub mod error;
pub mod messages;
pub mod provider;
pub mod providers;

// Re-export main types
pub use completion::{
    CompletionRequest, HandoffCall, ModelOutput, ModelResponse, StopReason, TokenUsage, ToolCall,
};
pub use conversation::Conversation;
pub use error::{LLMError, Result};
pub use messages::{ContentBlock, Message, MessageContent, Role};
pub use provider::ModelProvider;
