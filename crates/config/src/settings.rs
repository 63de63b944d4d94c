//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{AgentConfig, ConfigError, PromptTemplates};

/// Prefix for environment overrides, e.g. `OVACARE__SERVER__PORT=9000`
const ENV_PREFIX: &str = "OVACARE";

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation, warnings only
    #[default]
    Development,
    /// Staging mode - stricter validation
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if strict validation should be applied
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Session store configuration
    #[serde(default)]
    pub sessions: SessionConfig,

    /// Conversation controller configuration
    #[serde(default)]
    pub agent: AgentConfig,

    /// Assistant message templates
    #[serde(default)]
    pub prompts: PromptTemplates,

    /// Form prediction model
    #[serde(default)]
    pub model: ModelConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_sessions()?;
        self.agent.validate()?;
        self.prompts.validate()?;
        self.validate_model()?;

        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        let server = &self.server;

        if server.port == 0 {
            return Err(ConfigError::invalid("server.port", "Port cannot be 0"));
        }

        if server.timeout_seconds == 0 {
            return Err(ConfigError::invalid(
                "server.timeout_seconds",
                "Timeout must be at least 1 second",
            ));
        }

        if server.cors_enabled && server.cors_origins.is_empty() && self.environment.is_strict() {
            tracing::warn!(
                environment = ?self.environment,
                "CORS enabled with no origins; falling back to localhost defaults"
            );
        }

        Ok(())
    }

    fn validate_sessions(&self) -> Result<(), ConfigError> {
        let sessions = &self.sessions;

        if sessions.max_sessions == 0 {
            return Err(ConfigError::invalid(
                "sessions.max_sessions",
                "Must allow at least one session",
            ));
        }

        if sessions.timeout_seconds == 0 {
            return Err(ConfigError::invalid(
                "sessions.timeout_seconds",
                "Session timeout must be at least 1 second",
            ));
        }

        if sessions.cleanup_interval_seconds == 0 {
            return Err(ConfigError::invalid(
                "sessions.cleanup_interval_seconds",
                "Cleanup interval must be at least 1 second",
            ));
        }

        Ok(())
    }

    fn validate_model(&self) -> Result<(), ConfigError> {
        if self.model.enabled && self.model.path.trim().is_empty() {
            return Err(ConfigError::invalid(
                "model.path",
                "A model path is required when the model is enabled",
            ));
        }

        if !self.model.enabled && self.environment.is_production() {
            tracing::warn!("Prediction model disabled in production; /api/predict will return 503");
        }

        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// CORS allowed origins
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_timeout() -> u64 {
    30
}
fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_seconds: default_timeout(),
            cors_enabled: true,
            cors_origins: Vec::new(),
        }
    }
}

/// Session store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Maximum concurrent sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Inactivity timeout in seconds
    #[serde(default = "default_session_timeout")]
    pub timeout_seconds: u64,

    /// How often expired sessions are swept
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_seconds: u64,
}

fn default_max_sessions() -> usize {
    1000
}
fn default_session_timeout() -> u64 {
    1800
}
fn default_cleanup_interval() -> u64 {
    60
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
            timeout_seconds: default_session_timeout(),
            cleanup_interval_seconds: default_cleanup_interval(),
        }
    }
}

/// Form prediction model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Load the model at startup; a load failure aborts startup
    #[serde(default)]
    pub enabled: bool,

    /// Path to the JSON coefficient file
    #[serde(default = "default_model_path")]
    pub path: String,
}

fn default_model_path() -> String {
    "models/pcos_linear.json".to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_model_path(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,

    /// Enable Prometheus metrics
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

/// Load settings from `config/` relative to the working directory
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from("config", env)
}

/// Load settings from a config directory
///
/// Priority (highest first): `OVACARE__*` environment variables,
/// `{dir}/{env}.yaml`, `{dir}/default.yaml`, serde defaults.
pub fn load_settings_from(dir: impl AsRef<Path>, env: Option<&str>) -> Result<Settings, ConfigError> {
    let dir = dir.as_ref();
    let mut builder = Config::builder();

    // Load default config
    let default_path = dir.join("default");
    builder = builder.add_source(File::with_name(&default_path.to_string_lossy()).required(false));

    // Load environment-specific config
    if let Some(env_name) = env {
        let env_path = dir.join(env_name);
        builder = builder.add_source(File::with_name(&env_path.to_string_lossy()).required(false));
    }

    // Load from environment variables
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("server.cors_origins")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    tracing::debug!(
        dir = %dir.display(),
        env = env.unwrap_or("none"),
        environment = ?settings.environment,
        "Settings loaded"
    );

    Ok(settings)
}
