//! Bookkeeping data-health route.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};

use boekhoud_core::health::HealthService;

use crate::error::ApiError;
use crate::middleware::AdminUser;
use crate::AppState;

/// Creates the data-health routes (requires the admin gate to be applied
/// externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/data-health", get(data_health))
}

/// GET `/data-health` - Audit the document set for missing mandatory fields.
async fn data_health(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state.store.load().await?;
    let health = HealthService::audit(&snapshot);
    Ok(Json(health))
}
