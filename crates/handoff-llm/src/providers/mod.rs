//! Concrete model provider implementations
//!
//! The scripted provider is always available; HTTP providers are behind
//! feature flags.

pub mod mock;

#[cfg(feature = "openai")]
pub mod openai;

pub use mock::ScriptedProvider;

#[cfg(feature = "openai")]
pub use openai::{OpenAIConfig, OpenAIProvider};
