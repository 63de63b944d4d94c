//! Configuration management for the screening assistant
//!
//! Supports loading configuration from:
//! - YAML files (`config/default.yaml`, `config/{env}.yaml`)
//! - Environment variables (`OVACARE__` prefix, `__` separator)
//! - Serde defaults for everything left unset

pub mod agent;
pub mod prompts;
pub mod settings;

pub use agent::{AgentConfig, DayRange};
pub use prompts::PromptTemplates;
pub use settings::{
    load_settings, load_settings_from, ModelConfig, ObservabilityConfig, RuntimeEnvironment,
    ServerConfig, SessionConfig, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::NotFound(path) => ConfigError::FileNotFound(path),
            other => ConfigError::ParseError(other.to_string()),
        }
    }
}
