//! Liveness probe.

use axum::{Json, Router, response::IntoResponse, routing::get};
use serde_json::json;

use crate::AppState;

/// Creates the health routes (public, no admin gate).
pub fn routes() -> Router<AppState> {
    Router::new().route("/healthz", get(healthz))
}

/// GET `/healthz` - Liveness probe.
async fn healthz() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
