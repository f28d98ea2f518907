//! Run configuration
//!
//! A [`RunConfig`] is built once before a run and only read afterwards. It is
//! cheap to clone and may be shared by any number of concurrent runs.

use crate::RetryPolicy;
use handoff_core::ModelSettings;
use handoff_llm::ModelProvider;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_MAX_HANDOFFS: usize = 10;
const DEFAULT_MAX_TOOL_ITERATIONS: usize = 16;
const DEFAULT_MODEL_TIMEOUT: Duration = Duration::from_secs(120);
const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings applied identically to every model call of a run
#[derive(Clone)]
pub struct RunConfig {
    /// Provider every model call goes through
    pub provider: Arc<dyn ModelProvider>,

    /// Model settings used for every agent instead of the agent's own
    pub model: Option<ModelSettings>,

    /// Wrap the run and each step in tracing spans
    pub tracing_enabled: bool,

    /// Maximum number of agent-to-agent transitions
    pub max_handoffs: usize,

    /// Maximum number of model responses classified as tool calls
    pub max_tool_iterations: usize,

    /// Timeout for one model call attempt
    pub model_timeout: Duration,

    /// Timeout for one tool invocation attempt
    pub tool_timeout: Duration,

    /// Retry policy for model and tool calls
    pub retry: RetryPolicy,
}

impl RunConfig {
    /// Start building a configuration bound to `provider`
    pub fn builder(provider: Arc<dyn ModelProvider>) -> RunConfigBuilder {
        RunConfigBuilder::new(provider)
    }

    /// Configuration with every default, bound to `provider`
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self::builder(provider).build()
    }

    /// Model settings for an agent, honouring the run-wide override
    pub fn model_for(&self, agent_model: &ModelSettings) -> ModelSettings {
        self.model.clone().unwrap_or_else(|| agent_model.clone())
    }
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("model", &self.model)
            .field("tracing_enabled", &self.tracing_enabled)
            .field("max_handoffs", &self.max_handoffs)
            .field("max_tool_iterations", &self.max_tool_iterations)
            .field("model_timeout", &self.model_timeout)
            .field("tool_timeout", &self.tool_timeout)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

/// Builder for [`RunConfig`]
pub struct RunConfigBuilder {
    config: RunConfig,
}

impl RunConfigBuilder {
    /// Create a builder with default limits
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            config: RunConfig {
                provider,
                model: None,
                tracing_enabled: false,
                max_handoffs: DEFAULT_MAX_HANDOFFS,
                max_tool_iterations: DEFAULT_MAX_TOOL_ITERATIONS,
                model_timeout: DEFAULT_MODEL_TIMEOUT,
                tool_timeout: DEFAULT_TOOL_TIMEOUT,
                retry: RetryPolicy::no_retry(),
            },
        }
    }

    /// Use these model settings for every agent
    pub fn model(mut self, model: ModelSettings) -> Self {
        self.config.model = Some(model);
        self
    }

    /// Enable or disable run and step spans
    pub fn tracing(mut self, enabled: bool) -> Self {
        self.config.tracing_enabled = enabled;
        self
    }

    /// Set the handoff budget
    pub fn max_handoffs(mut self, max: usize) -> Self {
        self.config.max_handoffs = max;
        self
    }

    /// Set the tool-iteration budget
    pub fn max_tool_iterations(mut self, max: usize) -> Self {
        self.config.max_tool_iterations = max;
        self
    }

    /// Set the per-attempt model timeout
    pub fn model_timeout(mut self, timeout: Duration) -> Self {
        self.config.model_timeout = timeout;
        self
    }

    /// Set the per-attempt tool timeout
    pub fn tool_timeout(mut self, timeout: Duration) -> Self {
        self.config.tool_timeout = timeout;
        self
    }

    /// Set the retry policy
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.config.retry = retry;
        self
    }

    /// Finish building
    pub fn build(self) -> RunConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handoff_llm::providers::ScriptedProvider;

    fn provider() -> Arc<dyn ModelProvider> {
        Arc::new(ScriptedProvider::new())
    }

    #[test]
    fn test_defaults() {
        let config = RunConfig::new(provider());
        assert!(config.model.is_none());
        assert!(!config.tracing_enabled);
        assert_eq!(config.max_handoffs, 10);
        assert_eq!(config.max_tool_iterations, 16);
        assert_eq!(config.model_timeout, Duration::from_secs(120));
        assert_eq!(config.tool_timeout, Duration::from_secs(30));
        assert_eq!(config.retry, RetryPolicy::no_retry());
    }

    #[test]
    fn test_builder_overrides() {
        let config = RunConfig::builder(provider())
            .model(ModelSettings::new("gpt-4o-mini"))
            .tracing(true)
            .max_handoffs(2)
            .max_tool_iterations(4)
            .model_timeout(Duration::from_secs(5))
            .tool_timeout(Duration::from_millis(250))
            .retry(RetryPolicy::fast())
            .build();

        assert!(config.tracing_enabled);
        assert_eq!(config.max_handoffs, 2);
        assert_eq!(config.max_tool_iterations, 4);
        assert_eq!(config.tool_timeout, Duration::from_millis(250));
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn test_model_override_applies_to_every_agent() {
        let agent_model = ModelSettings::default();

        let plain = RunConfig::new(provider());
        assert_eq!(plain.model_for(&agent_model), agent_model);

        let overridden = RunConfig::builder(provider())
            .model(ModelSettings::new("gpt-4o-mini"))
            .build();
        assert_eq!(overridden.model_for(&agent_model).model, "gpt-4o-mini");
    }

    #[test]
    fn test_debug_skips_provider() {
        let rendered = format!("{:?}", RunConfig::new(provider()));
        assert!(rendered.contains("max_handoffs: 10"));
        assert!(!rendered.contains("ScriptedProvider"));
    }
}
