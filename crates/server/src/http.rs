//! HTTP Endpoints
//!
//! REST API for the questionnaire and the form predictor.

use axum::{
    extract::{Json, Path, State},
    http::{HeaderValue, Method, StatusCode},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use ovacare_agent::{ConversationStage, RiskAssessment};
use ovacare_core::FormAnswers;
use ovacare_model::FormPrediction;

use crate::metrics::{self, metrics_handler};
use crate::session::is_valid_session_id;
use crate::state::AppState;
use crate::ServerError;

const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let server = &state.config.server;
    let cors_layer = build_cors_layer(&server.cors_origins, server.cors_enabled);
    let timeout = Duration::from_secs(server.timeout_seconds);

    Router::new()
        // Session endpoints
        .route("/api/sessions", post(create_session).get(list_sessions))
        .route("/api/sessions/:id", get(get_session).delete(delete_session))
        // Conversational questionnaire
        .route("/api/chat/:session_id", post(chat))
        // Form variant
        .route("/api/predict", post(predict))
        // Health check
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        // Prometheus metrics
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns permissive layer (for dev)
/// - If cors_origins is empty or all invalid, allows localhost:3000 only
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    let parsed_origins = if parsed_origins.is_empty() {
        tracing::info!("No usable CORS origins configured, defaulting to {}", DEFAULT_CORS_ORIGIN);
        vec![HeaderValue::from_static(DEFAULT_CORS_ORIGIN)]
    } else {
        tracing::info!("CORS configured with {} origins", parsed_origins.len());
        parsed_origins
    };

    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
}

/// Create a session with a generated id
async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServerError> {
    let session = state.sessions.create()?;
    metrics::record_session_created();

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "session_id": session.id,
            "stage": ConversationStage::NotStarted,
        })),
    ))
}

/// List sessions
async fn list_sessions(State(state): State<AppState>) -> Json<serde_json::Value> {
    let sessions = state.sessions.list();
    Json(serde_json::json!({
        "sessions": sessions,
        "count": sessions.len(),
    }))
}

/// Get session info
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let session = state
        .sessions
        .get(&id)
        .ok_or_else(|| ServerError::SessionNotFound(id.clone()))?;
    let snapshot = session.snapshot();

    Ok(Json(serde_json::json!({
        "session_id": session.id,
        "active": session.is_active(),
        "stage": snapshot.stage(),
        "cursor": snapshot.cursor(),
        "started": snapshot.is_started(),
        "completed": snapshot.is_completed(),
        "answers": snapshot.answers(),
        "transcript": snapshot.transcript(),
    })))
}

/// Delete session
async fn delete_session(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    state.sessions.remove(&id);
    StatusCode::NO_CONTENT
}

/// Chat request
#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: String,
}

/// Chat response
#[derive(Debug, Serialize)]
struct ChatResponse {
    session_id: String,
    messages: Vec<String>,
    stage: ConversationStage,
    cursor: usize,
    completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    assessment: Option<RiskAssessment>,
}

/// Chat endpoint; the session is created on first interaction
async fn chat(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ServerError> {
    if !is_valid_session_id(&session_id) {
        return Err(ServerError::InvalidRequest(format!(
            "Invalid session id: {}",
            session_id
        )));
    }

    let (session, created) = state.sessions.get_or_create(&session_id)?;
    if created {
        metrics::record_session_created();
    }
    session.touch();

    let started = Instant::now();
    let reply = tracing::info_span!("chat", session_id = %session_id)
        .in_scope(|| session.with_state(|s| state.agent.handle(s, &request.message)));
    metrics::record_turn(reply.intent.kind(), started.elapsed());

    if let Some(assessment) = &reply.assessment {
        metrics::record_completion(assessment.tier.as_str());
    }

    tracing::debug!(
        session_id = %session_id,
        intent = reply.intent.kind(),
        stage = reply.stage.as_str(),
        cursor = reply.cursor,
        "Chat turn"
    );

    Ok(Json(ChatResponse {
        session_id,
        completed: reply.stage == ConversationStage::Completed,
        messages: reply.messages,
        stage: reply.stage,
        cursor: reply.cursor,
        assessment: reply.assessment,
    }))
}

/// Form prediction endpoint
async fn predict(
    State(state): State<AppState>,
    Json(form): Json<FormAnswers>,
) -> Result<Json<FormPrediction>, ServerError> {
    let predictor = state.predictor.as_ref().ok_or(ServerError::ModelUnavailable)?;
    let result = predictor.predict(&form)?;
    metrics::record_prediction(result.prediction.as_str());

    Ok(Json(result))
}

/// Liveness check
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let model = state.predictor.as_ref().map(|p| p.model_name().to_string());

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION"),
            "sessions": state.sessions.count(),
            "model": model,
        })),
    )
}

/// Readiness check
async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let model_required = state.get_config().model.enabled;
    let ready = state.is_ready();

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(serde_json::json!({
            "ready": ready,
            "checks": {
                "sessions": { "status": "ok", "count": state.sessions.count() },
                "model": {
                    "status": if state.predictor.is_some() { "loaded" } else { "absent" },
                    "required": model_required,
                },
            },
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ovacare_config::Settings;

    #[test]
    fn test_router_creation() {
        let state = AppState::new(Settings::default());
        let _ = create_router(state);
    }

    #[test]
    fn test_cors_layer_variants() {
        let _ = build_cors_layer(&[], true);
        let _ = build_cors_layer(&["https://ovacare.example".to_string()], true);
        let _ = build_cors_layer(&["bad\norigin".to_string()], true);
        let _ = build_cors_layer(&[], false);
    }
}
