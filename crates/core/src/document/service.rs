//! Document service: ingestion and queries.

use std::sync::Arc;

use tracing::{error, info};

use boekhoud_shared::types::DocumentId;

use super::error::DocumentError;
use super::types::{DocumentKind, DocumentStatus, DocumentUpdate, FinancialDocument};
use crate::storage::StorageService;

/// Repository trait for document persistence.
///
/// This trait is implemented by the db crate to provide actual database
/// operations.
pub trait DocumentRepository: Send + Sync {
    /// Create a new document record.
    fn create(
        &self,
        document: FinancialDocument,
    ) -> impl std::future::Future<Output = Result<FinancialDocument, DocumentError>> + Send;

    /// Find a document by ID.
    fn find_by_id(
        &self,
        id: DocumentId,
    ) -> impl std::future::Future<Output = Result<Option<FinancialDocument>, DocumentError>> + Send;

    /// List documents in a given status, ordered by invoice date descending
    /// (nulls last), then creation time.
    fn list_by_status(
        &self,
        status: DocumentStatus,
    ) -> impl std::future::Future<Output = Result<Vec<FinancialDocument>, DocumentError>> + Send;

    /// List every document, same ordering as [`Self::list_by_status`].
    fn list_all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<FinancialDocument>, DocumentError>> + Send;

    /// Apply a review resolution in a single update by primary key.
    ///
    /// Last write wins; there is no conflict detection between concurrent
    /// reviewers.
    fn update_review(
        &self,
        id: DocumentId,
        update: DocumentUpdate,
    ) -> impl std::future::Future<Output = Result<FinancialDocument, DocumentError>> + Send;

    /// Count documents in a given status.
    fn count_by_status(
        &self,
        status: DocumentStatus,
    ) -> impl std::future::Future<Output = Result<u64, DocumentError>> + Send;
}

/// One file of an ingestion batch.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original filename.
    pub filename: String,
    /// MIME type as reported by the client.
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Per-file result of an ingestion batch.
///
/// A failed file aborts only its own record; sibling files in the same batch
/// are unaffected and are not rolled back. The caller retries per file.
#[derive(Debug)]
pub enum IngestOutcome {
    /// File stored and record created.
    Created(FinancialDocument),
    /// This file failed; the filename identifies which upload to retry.
    Failed {
        /// Original filename of the failed upload.
        filename: String,
        /// What went wrong.
        error: DocumentError,
    },
}

/// Document service for ingestion and queries.
pub struct DocumentService<R: DocumentRepository> {
    storage: Arc<StorageService>,
    repo: Arc<R>,
}

impl<R: DocumentRepository> DocumentService<R> {
    /// Create a new document service.
    #[must_use]
    pub fn new(storage: Arc<StorageService>, repo: Arc<R>) -> Self {
        Self { storage, repo }
    }

    /// Ingest a batch of uploaded files as documents of the given kind.
    ///
    /// Each file is stored and recorded independently: the returned vector
    /// has one [`IngestOutcome`] per input file, in order. No file content
    /// validation happens here; every record starts in `needs_review` with
    /// all business fields null except kind and the storage reference.
    ///
    /// # Errors
    ///
    /// Returns an error only when the batch itself is empty; per-file
    /// failures are reported in the outcome list.
    pub async fn ingest(
        &self,
        kind: DocumentKind,
        files: Vec<UploadedFile>,
    ) -> Result<Vec<IngestOutcome>, DocumentError> {
        if files.is_empty() {
            return Err(DocumentError::EmptyBatch);
        }

        let mut outcomes = Vec::with_capacity(files.len());
        for file in files {
            outcomes.push(self.ingest_one(kind, file).await);
        }
        Ok(outcomes)
    }

    async fn ingest_one(&self, kind: DocumentKind, file: UploadedFile) -> IngestOutcome {
        let stored = match self
            .storage
            .store(&file.filename, &file.content_type, file.bytes)
            .await
        {
            Ok(stored) => stored,
            Err(e) => {
                error!(filename = %file.filename, error = %e, "upload failed");
                return IngestOutcome::Failed {
                    filename: file.filename,
                    error: e.into(),
                };
            }
        };

        let document = FinancialDocument {
            id: DocumentId::new(),
            kind,
            counterparty: None,
            invoice_number: None,
            invoice_date: None,
            due_date: None,
            period_start: None,
            period_end: None,
            amount_excl_vat: None,
            vat_amount: None,
            amount_incl_vat: None,
            currency: FinancialDocument::DEFAULT_CURRENCY.to_string(),
            status: DocumentStatus::NeedsReview,
            booked_date: None,
            tags: Vec::new(),
            notes: None,
            vat_lines: Vec::new(),
            file_url: Some(stored.url),
            storage_path: Some(stored.key),
            created_at: chrono::Utc::now(),
        };

        match self.repo.create(document).await {
            Ok(created) => {
                info!(document_id = %created.id, kind = %created.kind, "document ingested");
                IngestOutcome::Created(created)
            }
            Err(e) => {
                error!(filename = %file.filename, error = %e, "record creation failed");
                IngestOutcome::Failed {
                    filename: file.filename,
                    error: e,
                }
            }
        }
    }

    /// Get a document by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not exist or the repository
    /// fails.
    pub async fn get(&self, id: DocumentId) -> Result<FinancialDocument, DocumentError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DocumentError::NotFound(id))
    }

    /// List documents in a given status.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails.
    pub async fn list_by_status(
        &self,
        status: DocumentStatus,
    ) -> Result<Vec<FinancialDocument>, DocumentError> {
        self.repo.list_by_status(status).await
    }

    /// List every document.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails.
    pub async fn list_all(&self) -> Result<Vec<FinancialDocument>, DocumentError> {
        self.repo.list_all().await
    }

    /// Apply a resolved review update to a document.
    ///
    /// The document keeps its prior status until the update succeeds, so a
    /// failed save is retryable by re-submitting the same action.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not exist or persistence fails.
    pub async fn apply_review(
        &self,
        id: DocumentId,
        update: DocumentUpdate,
    ) -> Result<FinancialDocument, DocumentError> {
        let updated = self.repo.update_review(id, update).await?;
        info!(document_id = %id, status = %updated.status, "review persisted");
        Ok(updated)
    }

    /// Count documents still pending review.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails.
    pub async fn pending_count(&self) -> Result<u64, DocumentError> {
        self.repo.count_by_status(DocumentStatus::NeedsReview).await
    }
}
