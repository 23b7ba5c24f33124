//! Review/approval workflow.
//!
//! The two-state gate between ingestion and aggregation: an operator
//! supplies or corrects the authoritative structured fields, then approves
//! or rejects. Only approved documents ever contribute to a financial
//! calculation.

pub mod error;
pub mod service;
pub mod types;

pub use error::ReviewError;
pub use service::ReviewService;
pub use types::{ReviewAction, ReviewForm};
