//! Financial document model and ingestion.
//!
//! A [`FinancialDocument`] is one ingested bookkeeping artifact: a sales or
//! purchase invoice, a receipt, or a bank statement. Documents are created in
//! `needs_review` status with most fields null and are populated exactly once
//! by the review workflow.

pub mod error;
pub mod service;
pub mod store;
pub mod types;

pub use error::DocumentError;
pub use service::{DocumentRepository, DocumentService, IngestOutcome, UploadedFile};
pub use store::DocumentStore;
pub use types::{
    AccountingBasis, DocumentKind, DocumentStatus, DocumentUpdate, FinancialDocument, VatLine,
};
