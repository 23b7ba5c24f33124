//! Financial document domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use boekhoud_shared::types::DocumentId;

/// Kind of bookkeeping artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Invoice sent to a client; contributes to revenue and VAT collected.
    SalesInvoice,
    /// Invoice received from a vendor; contributes to expenses and VAT paid.
    PurchaseInvoice,
    /// Receipt for a purchase; treated like a purchase invoice.
    Receipt,
    /// Bank statement; record-keeping only, never aggregated.
    BankStatement,
}

impl DocumentKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SalesInvoice => "sales_invoice",
            Self::PurchaseInvoice => "purchase_invoice",
            Self::Receipt => "receipt",
            Self::BankStatement => "bank_statement",
        }
    }

    /// Parses a kind from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sales_invoice" => Some(Self::SalesInvoice),
            "purchase_invoice" => Some(Self::PurchaseInvoice),
            "receipt" => Some(Self::Receipt),
            "bank_statement" => Some(Self::BankStatement),
            _ => None,
        }
    }

    /// Returns true if this kind contributes to revenue / VAT collected.
    #[must_use]
    pub const fn is_revenue(&self) -> bool {
        matches!(self, Self::SalesInvoice)
    }

    /// Returns true if this kind contributes to expenses / VAT paid.
    #[must_use]
    pub const fn is_expense(&self) -> bool {
        matches!(self, Self::PurchaseInvoice | Self::Receipt)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of a document.
///
/// The only valid transitions are:
/// - NeedsReview → Approved (approve)
/// - NeedsReview → Rejected (reject)
///
/// Approved and rejected are terminal; corrections require a new document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Awaiting operator review; excluded from all aggregation.
    NeedsReview,
    /// Reviewed and eligible for aggregation.
    Approved,
    /// Reviewed and excluded from aggregation and from the review queue.
    Rejected,
}

impl DocumentStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NeedsReview => "needs_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "needs_review" => Some(Self::NeedsReview),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true if no further transition is allowed.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which date field determines a document's period membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountingBasis {
    /// Period membership by invoice date.
    Invoice,
    /// Period membership by booked date, falling back to invoice date.
    Booked,
}

impl AccountingBasis {
    /// Parses a basis from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "invoice" => Some(Self::Invoice),
            "booked" => Some(Self::Booked),
            _ => None,
        }
    }
}

/// One entry of a document's tax breakdown.
///
/// Historical documents may carry several lines at different rates; the
/// review workflow only ever writes a single flat-rate line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatLine {
    /// VAT rate as a percentage (e.g. 21 for 21%).
    pub rate: Decimal,
    /// Amount excluding tax at this rate.
    pub base: Decimal,
    /// Tax amount at this rate.
    pub tax: Decimal,
}

/// One ingested bookkeeping artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialDocument {
    /// Unique identifier.
    pub id: DocumentId,
    /// Kind of artifact.
    pub kind: DocumentKind,
    /// Counter-party name: client for sales invoices, vendor otherwise.
    pub counterparty: Option<String>,
    /// Invoice number as printed on the document.
    pub invoice_number: Option<String>,
    /// Invoice date.
    pub invoice_date: Option<NaiveDate>,
    /// Payment due date.
    pub due_date: Option<NaiveDate>,
    /// Optional service-period start.
    pub period_start: Option<NaiveDate>,
    /// Optional service-period end.
    pub period_end: Option<NaiveDate>,
    /// Amount excluding tax.
    pub amount_excl_vat: Option<Decimal>,
    /// Tax total.
    pub vat_amount: Option<Decimal>,
    /// Amount including tax.
    pub amount_incl_vat: Option<Decimal>,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Lifecycle status.
    pub status: DocumentStatus,
    /// Date the document was recorded in the books, distinct from invoice date.
    pub booked_date: Option<NaiveDate>,
    /// Free-text tags.
    pub tags: Vec<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Ordered tax breakdown; entries sum to `vat_amount`.
    pub vat_lines: Vec<VatLine>,
    /// Public retrieval URL of the stored binary artifact.
    pub file_url: Option<String>,
    /// Storage key of the binary artifact.
    pub storage_path: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl FinancialDocument {
    /// Currency used when ingestion has nothing better to go on.
    pub const DEFAULT_CURRENCY: &'static str = "EUR";

    /// Returns the date that places this document in a period under the
    /// given basis, or `None` if the relevant date is missing.
    ///
    /// Booked basis falls back to the invoice date when no booked date was
    /// recorded.
    #[must_use]
    pub fn basis_date(&self, basis: AccountingBasis) -> Option<NaiveDate> {
        match basis {
            AccountingBasis::Invoice => self.invoice_date,
            AccountingBasis::Booked => self.booked_date.or(self.invoice_date),
        }
    }

    /// Returns true unless both totals halves are present and disagree.
    ///
    /// `amount_incl_vat == amount_excl_vat + vat_amount` must hold whenever
    /// all three fields are populated.
    #[must_use]
    pub fn totals_consistent(&self) -> bool {
        match (self.amount_excl_vat, self.vat_amount, self.amount_incl_vat) {
            (Some(excl), Some(vat), Some(incl)) => excl + vat == incl,
            _ => true,
        }
    }

    /// Returns true unless the tax breakdown disagrees with the
    /// document-level totals.
    #[must_use]
    pub fn vat_lines_consistent(&self) -> bool {
        if self.vat_lines.is_empty() {
            return true;
        }
        let tax_sum: Decimal = self.vat_lines.iter().map(|l| l.tax).sum();
        self.vat_amount.is_none_or(|vat| vat == tax_sum)
    }
}

/// Field updates produced by resolving a review.
///
/// Applied to a document in a single persistence operation; the document
/// keeps its prior status until that operation succeeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentUpdate {
    /// Kind after review.
    pub kind: DocumentKind,
    /// Counter-party name.
    pub counterparty: Option<String>,
    /// Invoice number.
    pub invoice_number: Option<String>,
    /// Invoice date.
    pub invoice_date: Option<NaiveDate>,
    /// Payment due date.
    pub due_date: Option<NaiveDate>,
    /// Booked date.
    pub booked_date: Option<NaiveDate>,
    /// Amount excluding tax.
    pub amount_excl_vat: Option<Decimal>,
    /// Tax total.
    pub vat_amount: Option<Decimal>,
    /// Amount including tax.
    pub amount_incl_vat: Option<Decimal>,
    /// Replacement tax breakdown.
    pub vat_lines: Vec<VatLine>,
    /// Free-text tags.
    pub tags: Vec<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Resulting status.
    pub status: DocumentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn blank_document(kind: DocumentKind) -> FinancialDocument {
        FinancialDocument {
            id: DocumentId::new(),
            kind,
            counterparty: None,
            invoice_number: None,
            invoice_date: None,
            due_date: None,
            period_start: None,
            period_end: None,
            amount_excl_vat: None,
            vat_amount: None,
            amount_incl_vat: None,
            currency: FinancialDocument::DEFAULT_CURRENCY.to_string(),
            status: DocumentStatus::NeedsReview,
            booked_date: None,
            tags: Vec::new(),
            notes: None,
            vat_lines: Vec::new(),
            file_url: None,
            storage_path: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_kind_roundtrip() {
        for kind in [
            DocumentKind::SalesInvoice,
            DocumentKind::PurchaseInvoice,
            DocumentKind::Receipt,
            DocumentKind::BankStatement,
        ] {
            assert_eq!(DocumentKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(DocumentKind::parse("RECEIPT"), Some(DocumentKind::Receipt));
        assert_eq!(DocumentKind::parse("invoice"), None);
    }

    #[test]
    fn test_kind_aggregation_sides() {
        assert!(DocumentKind::SalesInvoice.is_revenue());
        assert!(!DocumentKind::SalesInvoice.is_expense());
        assert!(DocumentKind::PurchaseInvoice.is_expense());
        assert!(DocumentKind::Receipt.is_expense());
        assert!(!DocumentKind::BankStatement.is_revenue());
        assert!(!DocumentKind::BankStatement.is_expense());
    }

    #[test]
    fn test_status_roundtrip() {
        for status in [
            DocumentStatus::NeedsReview,
            DocumentStatus::Approved,
            DocumentStatus::Rejected,
        ] {
            assert_eq!(DocumentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(DocumentStatus::parse("pending"), None);
    }

    #[test]
    fn test_status_terminal() {
        assert!(!DocumentStatus::NeedsReview.is_terminal());
        assert!(DocumentStatus::Approved.is_terminal());
        assert!(DocumentStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_basis_date_invoice() {
        let mut doc = blank_document(DocumentKind::SalesInvoice);
        doc.invoice_date = NaiveDate::from_ymd_opt(2025, 2, 10);
        doc.booked_date = NaiveDate::from_ymd_opt(2025, 4, 1);

        assert_eq!(
            doc.basis_date(AccountingBasis::Invoice),
            NaiveDate::from_ymd_opt(2025, 2, 10)
        );
    }

    #[test]
    fn test_basis_date_booked_prefers_booked() {
        let mut doc = blank_document(DocumentKind::SalesInvoice);
        doc.invoice_date = NaiveDate::from_ymd_opt(2025, 2, 10);
        doc.booked_date = NaiveDate::from_ymd_opt(2025, 4, 1);

        assert_eq!(
            doc.basis_date(AccountingBasis::Booked),
            NaiveDate::from_ymd_opt(2025, 4, 1)
        );
    }

    #[test]
    fn test_basis_date_booked_falls_back_to_invoice() {
        let mut doc = blank_document(DocumentKind::SalesInvoice);
        doc.invoice_date = NaiveDate::from_ymd_opt(2025, 2, 10);

        assert_eq!(
            doc.basis_date(AccountingBasis::Booked),
            NaiveDate::from_ymd_opt(2025, 2, 10)
        );
    }

    #[test]
    fn test_basis_date_missing() {
        let doc = blank_document(DocumentKind::SalesInvoice);
        assert_eq!(doc.basis_date(AccountingBasis::Invoice), None);
        assert_eq!(doc.basis_date(AccountingBasis::Booked), None);
    }

    #[test]
    fn test_totals_consistency() {
        let mut doc = blank_document(DocumentKind::SalesInvoice);
        assert!(doc.totals_consistent());

        doc.amount_excl_vat = Some(dec!(100.00));
        doc.vat_amount = Some(dec!(21.00));
        doc.amount_incl_vat = Some(dec!(121.00));
        assert!(doc.totals_consistent());

        doc.amount_incl_vat = Some(dec!(120.00));
        assert!(!doc.totals_consistent());

        // A half-populated document is not inconsistent, just incomplete.
        doc.amount_incl_vat = None;
        assert!(doc.totals_consistent());
    }

    #[test]
    fn test_vat_lines_consistency() {
        let mut doc = blank_document(DocumentKind::PurchaseInvoice);
        assert!(doc.vat_lines_consistent());

        doc.vat_amount = Some(dec!(30.00));
        doc.vat_lines = vec![
            VatLine {
                rate: dec!(21),
                base: dec!(100.00),
                tax: dec!(21.00),
            },
            VatLine {
                rate: dec!(9),
                base: dec!(100.00),
                tax: dec!(9.00),
            },
        ];
        assert!(doc.vat_lines_consistent());

        doc.vat_amount = Some(dec!(21.00));
        assert!(!doc.vat_lines_consistent());
    }
}
