//! CSV export of period-filtered documents.

pub mod error;
pub mod service;

pub use error::ExportError;
pub use service::{CSV_MIME_TYPE, ExportService};
