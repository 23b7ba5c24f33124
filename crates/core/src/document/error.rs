//! Document error types.

use thiserror::Error;

use boekhoud_shared::types::DocumentId;

use crate::storage::StorageError;

/// Errors that can occur during document operations.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Document not found.
    #[error("document {0} not found")]
    NotFound(DocumentId),

    /// Uploaded batch contained no files.
    #[error("no files supplied for ingestion")]
    EmptyBatch,

    /// Storage operation failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Persistence failure; the operator may retry the same action.
    #[error("repository error: {0}")]
    Repository(String),
}

impl DocumentError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::EmptyBatch => 400,
            Self::Storage(_) | Self::Repository(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "DOCUMENT_NOT_FOUND",
            Self::EmptyBatch => "EMPTY_BATCH",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Repository(_) => "REPOSITORY_ERROR",
        }
    }
}
