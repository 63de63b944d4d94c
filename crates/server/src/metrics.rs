//! Prometheus metrics
//!
//! Counters and histograms are recorded through the `metrics` facade; when no
//! recorder is installed the calls are no-ops.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

use crate::state::AppState;

/// Install the global Prometheus recorder
///
/// Returns `None` when a recorder is already installed.
pub fn init_metrics() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install Prometheus recorder");
            None
        }
    }
}

/// One handled chat turn
pub fn record_turn(intent: &'static str, latency: Duration) {
    counter!("ovacare_turns_total", "intent" => intent).increment(1);
    histogram!("ovacare_turn_latency_seconds").record(latency.as_secs_f64());
}

/// A questionnaire run reached its verdict
pub fn record_completion(tier: &'static str) {
    counter!("ovacare_completions_total", "tier" => tier).increment(1);
}

/// A form prediction was served
pub fn record_prediction(label: &'static str) {
    counter!("ovacare_predictions_total", "label" => label).increment(1);
}

pub fn record_session_created() {
    counter!("ovacare_sessions_created_total").increment(1);
}

pub fn record_error(kind: &'static str) {
    counter!("ovacare_errors_total", "kind" => kind).increment(1);
}

/// Prometheus exposition; empty when metrics are disabled
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let body = state
        .metrics
        .as_ref()
        .map(PrometheusHandle::render)
        .unwrap_or_default();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
}
