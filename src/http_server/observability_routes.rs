//! Observability HTTP Routes
//!
//! Health check and metrics.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::api::InferenceService;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub active_sessions: usize,
}

/// Create observability routes
pub fn observability_routes(service: Arc<InferenceService>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(service)
}

async fn health_handler(State(service): State<Arc<InferenceService>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        active_sessions: service.sessions().session_count(),
    };

    (StatusCode::OK, Json(response))
}

/// Counters as JSON
async fn metrics_handler(State(service): State<Arc<InferenceService>>) -> impl IntoResponse {
    (StatusCode::OK, Json(service.metrics().snapshot()))
}
