//! Data-health audit logic.

use crate::document::{DocumentStatus, FinancialDocument};

use super::types::{DataHealth, Severity};

/// Stateless auditor over a document snapshot.
pub struct HealthService;

impl HealthService {
    /// Audit the snapshot for missing mandatory fields.
    ///
    /// Pure function of the approved set and the pending-review count.
    /// Severity: red when any approved document misses its date or total,
    /// or when anything is still pending review; orange when only invoice
    /// numbers are missing; green otherwise.
    #[must_use]
    pub fn audit(documents: &[FinancialDocument]) -> DataHealth {
        let approved = documents
            .iter()
            .filter(|d| d.status == DocumentStatus::Approved);

        let mut missing_invoice_number = 0;
        let mut missing_invoice_date = 0;
        let mut missing_total = 0;

        for doc in approved {
            if doc
                .invoice_number
                .as_deref()
                .is_none_or(|n| n.trim().is_empty())
            {
                missing_invoice_number += 1;
            }
            if doc.invoice_date.is_none() {
                missing_invoice_date += 1;
            }
            if doc.amount_incl_vat.is_none() {
                missing_total += 1;
            }
        }

        let pending_review = documents
            .iter()
            .filter(|d| d.status == DocumentStatus::NeedsReview)
            .count();

        let severity = if missing_invoice_date + missing_total > 0 || pending_review > 0 {
            Severity::Red
        } else if missing_invoice_number > 0 {
            Severity::Orange
        } else {
            Severity::Green
        };

        DataHealth {
            missing_invoice_number,
            missing_invoice_date,
            missing_total,
            pending_review,
            severity,
        }
    }
}
