//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::require_admin};

pub mod data_health;
pub mod documents;
pub mod health;
pub mod vat;

/// Creates the API router: a public liveness probe plus the admin-gated
/// application routes.
pub fn api_routes() -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(documents::routes())
        .merge(vat::routes())
        .merge(data_health::routes())
        .layer(middleware::from_fn(require_admin));

    Router::new().merge(health::routes()).merge(protected_routes)
}
