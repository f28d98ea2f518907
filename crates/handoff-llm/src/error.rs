//! Error types for model provider operations

use thiserror::Error;

/// Result type for provider operations
pub type Result<T> = std::result::Result<T, LLMError>;

/// Errors that can occur while talking to a model provider
#[derive(Error, Debug)]
pub enum LLMError {
    /// API request failed (network, 5xx, timeout)
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Invalid API key or authentication failed
    #[error("Invalid API key or authentication failed")]
    AuthenticationFailed,

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Model not found
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// HTTP error
    #[cfg(feature = "openai")]
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Unexpected response format
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// Tool call arguments that are not a JSON object
    #[error("Invalid arguments for tool '{tool}': {reason}")]
    InvalidToolArguments {
        /// Tool the model tried to call
        tool: String,
        /// Why the arguments were rejected
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Classify a provider error into the run error taxonomy
impl From<LLMError> for handoff_core::Error {
    fn from(err: LLMError) -> Self {
        use handoff_core::Error;

        match err {
            LLMError::RequestFailed(_) | LLMError::RateLimitExceeded(_) => {
                Error::ProviderUnavailable(err.to_string())
            }
            #[cfg(feature = "openai")]
            LLMError::HttpError(_) => Error::ProviderUnavailable(err.to_string()),
            LLMError::UnexpectedResponse(_) | LLMError::SerializationError(_) => {
                Error::MalformedResponse(err.to_string())
            }
            LLMError::InvalidToolArguments { tool, reason } => {
                Error::SchemaViolation { tool, reason }
            }
            LLMError::AuthenticationFailed
            | LLMError::InvalidRequest(_)
            | LLMError::ModelNotFound(_)
            | LLMError::ConfigurationError(_) => Error::Configuration(err.to_string()),
        }
    }
}
