//! Review workflow types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::document::DocumentKind;

/// How the operator resolves a document under review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
    /// Approve: the document becomes eligible for aggregation.
    Approve,
    /// Reject: field updates are persisted, but the document is excluded
    /// from aggregation and from the review queue.
    Reject,
}

impl ReviewAction {
    /// Returns the string representation of the action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }

    /// Parses an action from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "approve" => Some(Self::Approve),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The operator-facing review form.
///
/// Opened pre-filled from the document under review; the extraction assist
/// may fill blanks, but a value the operator typed always wins. Submitted
/// values are persisted as-is: the form is the authoritative field set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewForm {
    /// Corrected kind; the document keeps its ingested kind when absent.
    #[serde(default)]
    pub kind: Option<DocumentKind>,
    /// Counter-party name: client for sales invoices, vendor otherwise.
    #[serde(default)]
    pub counterparty: Option<String>,
    /// Invoice number.
    #[serde(default)]
    pub invoice_number: Option<String>,
    /// Invoice date.
    #[serde(default)]
    pub invoice_date: Option<NaiveDate>,
    /// Payment due date.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Date recorded in the books.
    #[serde(default)]
    pub booked_date: Option<NaiveDate>,
    /// Single flat tax rate as a percentage (e.g. 21 for 21%).
    #[serde(default)]
    pub vat_rate: Option<Decimal>,
    /// Total including tax.
    #[serde(default)]
    pub total_incl: Option<Decimal>,
    /// Free-text tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
}
