//! Data-health types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-tier severity of the bookkeeping's data health.
///
/// Red is blocking: missing dates/totals or unreviewed documents undermine
/// confidence in the VAT number. Orange is advisory: a missing invoice
/// number is a lesser data-quality issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// No issues found.
    Green,
    /// Advisory issues only (missing invoice numbers).
    Orange,
    /// Blocking issues (missing dates/totals, or documents pending review).
    Red,
}

impl Severity {
    /// Returns the string representation of the severity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Orange => "orange",
            Self::Red => "red",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derived audit of the approved and pending document sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataHealth {
    /// Approved documents with an empty or missing invoice number.
    pub missing_invoice_number: usize,
    /// Approved documents with a missing invoice date.
    pub missing_invoice_date: usize,
    /// Approved documents with a missing total including tax.
    pub missing_total: usize,
    /// Documents still pending review.
    pub pending_review: usize,
    /// Overall severity classification.
    pub severity: Severity,
}
