//! Quarterly VAT period aggregation.
//!
//! Pure functions over an explicit [`Period`] and a document list: filter
//! the approved set to the quarter, sum the revenue/expense bases and VAT
//! amounts, and derive the net VAT position. Nothing here is persisted;
//! every aggregate is recomputed fresh from the document snapshot.

pub mod error;
pub mod period;
pub mod service;
#[cfg(test)]
mod service_props;
pub mod types;

pub use error::VatError;
pub use period::Period;
pub use service::VatService;
pub use types::{RateLine, VatPosition, VatSummary};
