//! Health HTTP Route
//!
//! `/health` answers 200 while the store's views respond and 503 once they
//! stop, so a load balancer can take the instance out of rotation.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use tracing::warn;

use super::state::AppState;
use crate::observability::Event;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub started_at: String,
    pub uptime_secs: i64,
    pub pages: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Create the health route
pub fn health_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (status, code, error) = match state.catalog.ping() {
        Ok(()) => ("ok", StatusCode::OK, None),
        Err(e) => {
            warn!(event = Event::ViewQueryFailed.as_str(), error = %e, "health probe failed");
            ("unavailable", StatusCode::SERVICE_UNAVAILABLE, Some(e.to_string()))
        }
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        started_at: state.started_at.to_rfc3339(),
        uptime_secs: (Utc::now() - state.started_at).num_seconds(),
        pages: state.templates.page_names().len(),
        error,
    };

    (code, Json(response))
}
