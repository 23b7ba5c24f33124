//! Extraction assist types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::review::ReviewForm;

/// Best-effort structured guess returned by the extraction service.
///
/// Every field is optional; the service returns whatever it could read from
/// the document. Field names follow the service's wire format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionGuess {
    /// Guessed invoice number.
    #[serde(default)]
    pub invoice_number: Option<String>,
    /// Guessed invoice date.
    #[serde(default)]
    pub invoice_date: Option<NaiveDate>,
    /// Guessed due date.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Guessed total including tax, in euros.
    #[serde(default)]
    pub total_incl_eur: Option<Decimal>,
    /// Currency detected on the document.
    #[serde(default)]
    pub currency_original: Option<String>,
}

impl ExtractionGuess {
    /// Returns true when the service could not read anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.invoice_number.is_none()
            && self.invoice_date.is_none()
            && self.due_date.is_none()
            && self.total_incl_eur.is_none()
    }

    /// Merge this guess into an in-progress review form.
    ///
    /// Only blank form fields are filled; anything the operator has already
    /// typed takes precedence.
    pub fn merge_into(&self, form: &mut ReviewForm) {
        if form.invoice_number.is_none() {
            form.invoice_number = self.invoice_number.clone();
        }
        if form.invoice_date.is_none() {
            form.invoice_date = self.invoice_date;
        }
        if form.due_date.is_none() {
            form.due_date = self.due_date;
        }
        if form.total_incl.is_none() {
            form.total_incl = self.total_incl_eur;
        }
    }
}
