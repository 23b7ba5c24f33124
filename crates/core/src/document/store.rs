//! In-memory document snapshot with explicit invalidation.
//!
//! Aggregation, audit, and export all compute over a snapshot of the full
//! document set. The snapshot is re-fetched after every mutation; that
//! re-fetch is the system's only consistency mechanism, so it is an explicit,
//! named operation here rather than implicit page-lifecycle behavior.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use super::error::DocumentError;
use super::service::DocumentRepository;
use super::types::FinancialDocument;

/// Snapshot owner over the full document set.
///
/// `load()` returns the cached snapshot or fetches one; `invalidate()` drops
/// it so the next reader re-fetches. No eviction, no TTL: staleness is
/// bounded only by the invalidate-on-mutation discipline of the callers.
pub struct DocumentStore<R: DocumentRepository> {
    repo: Arc<R>,
    snapshot: RwLock<Option<Arc<Vec<FinancialDocument>>>>,
}

impl<R: DocumentRepository> DocumentStore<R> {
    /// Create a new store over a repository.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            snapshot: RwLock::new(None),
        }
    }

    /// Return the current snapshot, fetching it if none is cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails; a previously cached snapshot is
    /// left untouched in that case.
    pub async fn load(&self) -> Result<Arc<Vec<FinancialDocument>>, DocumentError> {
        if let Some(snapshot) = self.snapshot.read().await.as_ref() {
            return Ok(Arc::clone(snapshot));
        }

        let documents = Arc::new(self.repo.list_all().await?);
        debug!(count = documents.len(), "document snapshot loaded");

        *self.snapshot.write().await = Some(Arc::clone(&documents));
        Ok(documents)
    }

    /// Drop the cached snapshot so the next `load()` re-fetches.
    ///
    /// Call after every mutation (ingestion, review save).
    pub async fn invalidate(&self) {
        *self.snapshot.write().await = None;
        debug!("document snapshot invalidated");
    }

    /// Drop the snapshot and immediately fetch a fresh one.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails.
    pub async fn refresh(&self) -> Result<Arc<Vec<FinancialDocument>>, DocumentError> {
        self.invalidate().await;
        self.load().await
    }
}
