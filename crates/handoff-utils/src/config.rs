//! Provider configuration loaded from the environment
//!
//! | Variable | Default |
//! |---|---|
//! | `API_KEY` | required |
//! | `API_BASE` | `https://generativelanguage.googleapis.com/v1beta/openai/` |
//! | `MODEL` | `gemini-2.0-flash` |
//! | `REQUEST_TIMEOUT_SECS` | `120` |
//!
//! An optional `.env` file in the working directory is read first; values
//! already present in the process environment win.

use handoff_core::ModelSettings;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Default OpenAI-compatible endpoint (Gemini)
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai/";

/// Default model name
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default HTTP request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Configuration loading errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank
    #[error("{0} is not set; add it to the environment or a .env file")]
    Missing(&'static str),

    /// A variable is set but cannot be used
    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        /// Variable name
        var: &'static str,
        /// Offending value
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// A `.env` file exists but could not be read or parsed
    #[error(".env file could not be loaded: {0}")]
    EnvFile(String),
}

impl From<ConfigError> for handoff_core::Error {
    fn from(err: ConfigError) -> Self {
        handoff_core::Error::Configuration(err.to_string())
    }
}

/// Settings needed to reach the model endpoint
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    /// Credential sent as a bearer token
    pub api_key: String,
    /// Base URL of the OpenAI-compatible API
    pub api_base: String,
    /// Model name used by every agent
    pub model: String,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
}

impl ProviderSettings {
    /// Read a `.env` file if present, then load from the environment
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = load_dotenv()? {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_env()
    }

    /// Load from the process environment only
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = get("API_KEY").ok_or(ConfigError::Missing("API_KEY"))?;
        let api_base = get("API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        if !api_base.starts_with("http://") && !api_base.starts_with("https://") {
            return Err(ConfigError::Invalid {
                var: "API_BASE",
                value: api_base,
                reason: "must be an http(s) URL".to_string(),
            });
        }

        let model = get("MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let request_timeout_secs = match get("REQUEST_TIMEOUT_SECS") {
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        var: "REQUEST_TIMEOUT_SECS",
                        value: raw,
                        reason: "must be greater than 0".to_string(),
                    });
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        var: "REQUEST_TIMEOUT_SECS",
                        value: raw,
                        reason: e.to_string(),
                    });
                }
            },
        };

        Ok(Self {
            api_key,
            api_base,
            model,
            request_timeout_secs,
        })
    }

    /// Model settings shared by every agent
    pub fn model_settings(&self) -> ModelSettings {
        ModelSettings::new(self.model.clone())
    }

    /// Replace the model name
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Replace the API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Load `.env` from the working directory or its parents
///
/// Returns the file that was read, or `None` when there is no such file. A
/// file that exists but does not parse is an error rather than being skipped.
pub fn load_dotenv() -> Result<Option<PathBuf>, ConfigError> {
    dotenv_outcome(dotenvy::dotenv())
}

fn dotenv_outcome(
    result: Result<PathBuf, dotenvy::Error>,
) -> Result<Option<PathBuf>, ConfigError> {
    match result {
        Ok(path) => Ok(Some(path)),
        Err(dotenvy::Error::Io(err)) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(ConfigError::EnvFile(err.to_string())),
    }
}
