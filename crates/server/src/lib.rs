//! OvaCare Server
//!
//! HTTP endpoints for the conversational questionnaire and the form
//! prediction, plus health, readiness and Prometheus metrics.

pub mod http;
pub mod metrics;
pub mod session;
pub mod state;

pub use crate::http::create_router;
pub use crate::metrics::{
    init_metrics, record_completion, record_error, record_prediction, record_session_created,
    record_turn,
};
pub use crate::session::{is_valid_session_id, Session, SessionManager};
pub use crate::state::{load_predictor, AppState};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ovacare_model::ModelError;
use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Max sessions reached")]
    CapacityExceeded,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Prediction model not loaded")]
    ModelUnavailable,

    #[error("Model error: {0}")]
    Model(ModelError),
}

impl ServerError {
    /// Short label for the errors counter
    pub fn kind(&self) -> &'static str {
        match self {
            ServerError::SessionNotFound(_) => "session_not_found",
            ServerError::CapacityExceeded => "capacity",
            ServerError::InvalidRequest(_) => "invalid_request",
            ServerError::ModelUnavailable => "model_unavailable",
            ServerError::Model(_) => "model",
        }
    }
}

impl From<ModelError> for ServerError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Input(e) => ServerError::InvalidRequest(e.to_string()),
            other => ServerError::Model(other),
        }
    }
}

impl From<ServerError> for StatusCode {
    fn from(err: ServerError) -> Self {
        (&err).into()
    }
}

impl From<&ServerError> for StatusCode {
    fn from(err: &ServerError) -> Self {
        match err {
            ServerError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            ServerError::CapacityExceeded => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::Model(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = StatusCode::from(&self);
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        record_error(self.kind());

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
