//! Application State
//!
//! Shared state across all handlers.

use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

use ovacare_agent::ScreeningAgent;
use ovacare_config::{ModelConfig, Settings};
use ovacare_model::{FormPredictor, LinearModel, ModelError};

use crate::session::SessionManager;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Configuration, fixed for the process lifetime
    pub config: Arc<Settings>,
    /// Session manager
    pub sessions: Arc<SessionManager>,
    /// Conversation controller shared by all sessions
    pub agent: Arc<ScreeningAgent>,
    /// Form predictor, absent when the model is disabled
    pub predictor: Option<FormPredictor>,
    /// Prometheus handle, absent when metrics are disabled
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create application state from settings, without a model or metrics
    pub fn new(config: Settings) -> Self {
        let agent = ScreeningAgent::new(config.agent.clone(), config.prompts.clone());
        let sessions = SessionManager::from_settings(&config.sessions);

        Self {
            config: Arc::new(config),
            sessions: Arc::new(sessions),
            agent: Arc::new(agent),
            predictor: None,
            metrics: None,
        }
    }

    pub fn with_predictor(mut self, predictor: FormPredictor) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    pub fn get_config(&self) -> &Settings {
        &self.config
    }

    /// Ready when the model is loaded or not required
    pub fn is_ready(&self) -> bool {
        self.predictor.is_some() || !self.get_config().model.enabled
    }
}

/// Load the configured model, if enabled
///
/// A failure here is an unrecoverable startup error for the caller.
pub fn load_predictor(config: &ModelConfig) -> Result<Option<FormPredictor>, ModelError> {
    if !config.enabled {
        tracing::info!("Prediction model disabled");
        return Ok(None);
    }

    let model = LinearModel::load(&config.path)?;
    Ok(Some(FormPredictor::new(Arc::new(model))))
}
