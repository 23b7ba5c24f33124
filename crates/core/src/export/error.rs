//! Export error types.

use thiserror::Error;

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The period-filtered set is empty; there is nothing to export.
    ///
    /// Surfaced to the operator as a blocking message, never a silent no-op.
    #[error("no documents in the selected period to export")]
    NothingToExport,

    /// CSV serialization failed.
    #[error("export serialization failed: {0}")]
    Serialize(String),
}

impl ExportError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NothingToExport => 409,
            Self::Serialize(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NothingToExport => "NOTHING_TO_EXPORT",
            Self::Serialize(_) => "SERIALIZE_ERROR",
        }
    }
}
