//! Model provider trait definition

use crate::{CompletionRequest, ModelOutput, Result};
use async_trait::async_trait;

/// Trait for model providers
///
/// Implementations translate a [`CompletionRequest`] into a provider-specific
/// call and normalize the answer into a [`ModelOutput`]. Providers do not
/// retry; retry policy belongs to the run configuration.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Generate one completion for the current agent and conversation
    ///
    /// # Arguments
    ///
    /// * `request` - The agent view, conversation history, and model settings
    ///
    /// # Returns
    ///
    /// The normalized output, not yet classified
    async fn complete(&self, request: CompletionRequest) -> Result<ModelOutput>;

    /// Get the provider name (e.g., "openai", "scripted")
    fn name(&self) -> &str;
}
