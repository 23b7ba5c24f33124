//! Review workflow error types.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::document::DocumentStatus;

/// Errors that can occur when resolving a review.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// The document has already been approved or rejected.
    ///
    /// Resolved documents are terminal; corrections require ingesting a new
    /// document.
    #[error("document is already {status}, only documents in needs_review can be resolved")]
    AlreadyResolved {
        /// The document's current (terminal) status.
        status: DocumentStatus,
    },

    /// A negative tax rate was supplied.
    #[error("tax rate {rate} must not be negative")]
    NegativeRate {
        /// The offending rate.
        rate: Decimal,
    },
}

impl ReviewError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::AlreadyResolved { .. } => 422,
            Self::NegativeRate { .. } => 400,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyResolved { .. } => "ALREADY_RESOLVED",
            Self::NegativeRate { .. } => "NEGATIVE_RATE",
        }
    }
}
