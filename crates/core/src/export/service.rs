//! CSV serialization of period-filtered documents.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::document::FinancialDocument;
use crate::vat::Period;

use super::error::ExportError;

/// MIME type of the generated export.
pub const CSV_MIME_TYPE: &str = "text/csv";

const HEADER: [&str; 10] = [
    "kind",
    "counterparty",
    "invoice_number",
    "invoice_date",
    "due_date",
    "amount_excl_vat",
    "vat_amount",
    "amount_incl_vat",
    "currency",
    "vat_rates",
];

/// Stateless CSV export service.
pub struct ExportService;

impl ExportService {
    /// Download filename for a period export.
    ///
    /// Pattern: `boekhoud-<label with spaces replaced by hyphens>.csv`,
    /// e.g. `boekhoud-Q1-2025.csv`.
    #[must_use]
    pub fn filename(period: &Period) -> String {
        format!("boekhoud-{}.csv", period.label().replace(' ', "-"))
    }

    /// Serialize the period-filtered document list as CSV bytes.
    ///
    /// One header row plus one row per document. Absent text fields become
    /// empty strings and absent amounts become `0.00`; a `null` literal is
    /// never emitted. The document's VAT rates are slash-joined in breakdown
    /// order.
    ///
    /// # Errors
    ///
    /// Refuses with [`ExportError::NothingToExport`] when the filtered set
    /// is empty, or reports a serialization failure.
    pub fn to_csv(documents: &[&FinancialDocument]) -> Result<Vec<u8>, ExportError> {
        if documents.is_empty() {
            return Err(ExportError::NothingToExport);
        }

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(HEADER)
            .map_err(|e| ExportError::Serialize(e.to_string()))?;

        for doc in documents {
            writer
                .write_record([
                    doc.kind.as_str().to_string(),
                    text_or_empty(doc.counterparty.as_deref()),
                    text_or_empty(doc.invoice_number.as_deref()),
                    date_or_empty(doc.invoice_date),
                    date_or_empty(doc.due_date),
                    amount_or_zero(doc.amount_excl_vat),
                    amount_or_zero(doc.vat_amount),
                    amount_or_zero(doc.amount_incl_vat),
                    doc.currency.clone(),
                    joined_rates(doc),
                ])
                .map_err(|e| ExportError::Serialize(e.to_string()))?;
        }

        writer
            .into_inner()
            .map_err(|e| ExportError::Serialize(e.to_string()))
    }
}

fn text_or_empty(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

fn date_or_empty(value: Option<NaiveDate>) -> String {
    value.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

fn amount_or_zero(value: Option<Decimal>) -> String {
    let amount = value
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{amount:.2}")
}

/// Slash-joined list of this document's tax rates, e.g. `"9/21"`.
fn joined_rates(doc: &FinancialDocument) -> String {
    doc.vat_lines
        .iter()
        .map(|l| l.rate.normalize().to_string())
        .collect::<Vec<_>>()
        .join("/")
}
