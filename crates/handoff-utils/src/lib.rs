//! Shared utilities for handoff-rs
//!
//! Logging setup and the provider settings read from the environment at
//! startup.

pub mod config;
pub mod logging;

pub use config::{ConfigError, ProviderSettings};
pub use logging::{LogFormat, init_tracing, init_tracing_json, init_tracing_with};
