//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for ingestion, review, aggregation, and export
//! - The admin-gate middleware
//! - Response/error mapping

pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use boekhoud_core::document::{DocumentService, DocumentStore};
use boekhoud_core::extraction::ExtractionClient;
use boekhoud_db::DocumentRepository;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Document ingestion and queries.
    pub documents: Arc<DocumentService<DocumentRepository>>,
    /// Snapshot of the full document set, invalidated on every mutation.
    pub store: Arc<DocumentStore<DocumentRepository>>,
    /// Client for the extraction assist service.
    pub extraction: Arc<ExtractionClient>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
