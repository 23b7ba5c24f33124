//! Boekhoud API Server
//!
//! Main entry point for the Boekhoud backend service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use boekhoud_api::{AppState, create_router};
use boekhoud_core::document::{DocumentService, DocumentStore};
use boekhoud_core::extraction::ExtractionClient;
use boekhoud_core::storage::{StorageConfig, StorageService};
use boekhoud_db::{DocumentRepository, connect};
use boekhoud_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boekhoud=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Object storage for uploaded documents
    let storage_config = StorageConfig::from_settings(&config.storage)
        .map_err(|e| anyhow::anyhow!("invalid storage configuration: {e}"))?;
    let storage = Arc::new(
        StorageService::from_config(storage_config)
            .map_err(|e| anyhow::anyhow!("failed to initialize storage: {e}"))?,
    );
    info!(provider = storage.config().provider.name(), "Storage configured");

    // Extraction assist client
    let extraction = Arc::new(
        ExtractionClient::from_settings(&config.extraction)
            .map_err(|e| anyhow::anyhow!("failed to build extraction client: {e}"))?,
    );
    info!(endpoint = %config.extraction.endpoint, "Extraction assist configured");

    // Repository, services, and the document snapshot store
    let repo = Arc::new(DocumentRepository::new(db));
    let documents = Arc::new(DocumentService::new(storage, repo.clone()));
    let store = Arc::new(DocumentStore::new(repo));

    // Create application state
    let state = AppState {
        documents,
        store,
        extraction,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
