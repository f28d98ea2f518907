//! Model binding shared between agents

use serde::{Deserialize, Serialize};

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_MAX_TOKENS: usize = 1024;

/// Model configuration an agent is bound to
///
/// Agents hold this behind an `Arc` so that several agents can share one
/// binding, as the travel agents all do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Model identifier (provider-specific)
    pub model: String,

    /// Maximum tokens to generate per completion
    pub max_tokens: usize,

    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl ModelSettings {
    /// Create settings for the given model with default limits
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
        }
    }

    /// Set the maximum tokens
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ModelSettings::default();
        assert_eq!(settings.model, "gemini-2.0-flash");
        assert_eq!(settings.max_tokens, 1024);
        assert!(settings.temperature.is_none());
    }

    #[test]
    fn test_builder() {
        let settings = ModelSettings::new("gpt-4o")
            .with_max_tokens(2048)
            .with_temperature(0.2);
        assert_eq!(settings.model, "gpt-4o");
        assert_eq!(settings.max_tokens, 2048);
        assert_eq!(settings.temperature, Some(0.2));
    }
}
