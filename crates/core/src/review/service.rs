//! Review resolution logic.
//!
//! Pure: resolving a review maps `(document, form, action)` to the field
//! updates to persist. Persistence itself lives behind the document
//! repository, so a failed save leaves the document in its prior status and
//! the operator simply re-submits.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::document::{DocumentStatus, DocumentUpdate, FinancialDocument, VatLine};

use super::error::ReviewError;
use super::types::{ReviewAction, ReviewForm};

/// Stateless service resolving reviews into document updates.
pub struct ReviewService;

impl ReviewService {
    /// Resolve a review into the update to persist.
    ///
    /// Only documents in `needs_review` can be resolved. When the form
    /// carries a positive total-including-tax and a tax rate, the excl-tax
    /// base and tax amount are derived from them and a single-entry tax
    /// breakdown replaces any prior one; otherwise the document's previously
    /// stored amounts and breakdown are retained unchanged.
    ///
    /// Resolution is a pure function of its inputs: submitting the same form
    /// twice yields an identical update.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is already resolved or the supplied
    /// rate is negative.
    pub fn resolve(
        document: &FinancialDocument,
        form: &ReviewForm,
        action: ReviewAction,
    ) -> Result<DocumentUpdate, ReviewError> {
        if document.status != DocumentStatus::NeedsReview {
            return Err(ReviewError::AlreadyResolved {
                status: document.status,
            });
        }

        if let Some(rate) = form.vat_rate
            && rate < Decimal::ZERO
        {
            return Err(ReviewError::NegativeRate { rate });
        }

        let status = match action {
            ReviewAction::Approve => DocumentStatus::Approved,
            ReviewAction::Reject => DocumentStatus::Rejected,
        };

        let (amount_excl_vat, vat_amount, amount_incl_vat, vat_lines) =
            match (form.total_incl, form.vat_rate) {
                (Some(total), Some(rate)) if total > Decimal::ZERO => {
                    let (base, tax) = Self::derive_vat_split(total, rate);
                    (
                        Some(base),
                        Some(tax),
                        Some(total),
                        vec![VatLine { rate, base, tax }],
                    )
                }
                // Absent or non-positive total: previously stored amounts
                // and breakdown are retained unchanged.
                _ => (
                    document.amount_excl_vat,
                    document.vat_amount,
                    document.amount_incl_vat,
                    document.vat_lines.clone(),
                ),
            };

        Ok(DocumentUpdate {
            kind: form.kind.unwrap_or(document.kind),
            counterparty: form.counterparty.clone(),
            invoice_number: form.invoice_number.clone(),
            invoice_date: form.invoice_date,
            due_date: form.due_date,
            booked_date: form.booked_date,
            amount_excl_vat,
            vat_amount,
            amount_incl_vat,
            vat_lines,
            tags: form.tags.clone(),
            notes: form.notes.clone(),
            status,
        })
    }

    /// Split a tax-inclusive total into base and tax at a flat rate.
    ///
    /// `base = total / (1 + rate/100)` rounded to 2 decimals half-up; the
    /// tax is the remainder, so `base + tax` always reproduces the total.
    #[must_use]
    pub fn derive_vat_split(total_incl: Decimal, rate: Decimal) -> (Decimal, Decimal) {
        let divisor = Decimal::ONE + rate / Decimal::ONE_HUNDRED;
        let base = (total_incl / divisor)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let tax = (total_incl - base)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        (base, tax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentKind;
    use boekhoud_shared::types::DocumentId;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    pub(crate) fn document_under_review() -> FinancialDocument {
        FinancialDocument {
            id: DocumentId::new(),
            kind: DocumentKind::PurchaseInvoice,
            counterparty: None,
            invoice_number: None,
            invoice_date: None,
            due_date: None,
            period_start: None,
            period_end: None,
            amount_excl_vat: None,
            vat_amount: None,
            amount_incl_vat: None,
            currency: "EUR".to_string(),
            status: DocumentStatus::NeedsReview,
            booked_date: None,
            tags: Vec::new(),
            notes: None,
            vat_lines: Vec::new(),
            file_url: None,
            storage_path: None,
            created_at: chrono::Utc::now(),
        }
    }

    fn filled_form() -> ReviewForm {
        ReviewForm {
            kind: None,
            counterparty: Some("Acme B.V.".to_string()),
            invoice_number: Some("2025-017".to_string()),
            invoice_date: NaiveDate::from_ymd_opt(2025, 2, 10),
            due_date: NaiveDate::from_ymd_opt(2025, 3, 10),
            booked_date: None,
            vat_rate: Some(dec!(21)),
            total_incl: Some(dec!(121.00)),
            tags: vec!["hosting".to_string()],
            notes: None,
        }
    }

    #[test]
    fn test_derive_vat_split_standard_rate() {
        let (base, tax) = ReviewService::derive_vat_split(dec!(121.00), dec!(21));
        assert_eq!(base, dec!(100.00));
        assert_eq!(tax, dec!(21.00));
    }

    #[test]
    fn test_derive_vat_split_zero_rate() {
        let (base, tax) = ReviewService::derive_vat_split(dec!(50.00), dec!(0));
        assert_eq!(base, dec!(50.00));
        assert_eq!(tax, dec!(0.00));
    }

    #[test]
    fn test_derive_vat_split_reproduces_total() {
        // Awkward totals still satisfy base + tax == total because the tax
        // is computed as the remainder of the rounded base.
        for (total, rate) in [
            (dec!(99.99), dec!(21)),
            (dec!(0.01), dec!(9)),
            (dec!(1234.56), dec!(21)),
            (dec!(808.08), dec!(9)),
        ] {
            let (base, tax) = ReviewService::derive_vat_split(total, rate);
            assert_eq!(base + tax, total, "total {total} rate {rate}");
        }
    }

    #[test]
    fn test_approve_derives_single_rate_breakdown() {
        let doc = document_under_review();
        let update =
            ReviewService::resolve(&doc, &filled_form(), ReviewAction::Approve).expect("resolves");

        assert_eq!(update.status, DocumentStatus::Approved);
        assert_eq!(update.amount_excl_vat, Some(dec!(100.00)));
        assert_eq!(update.vat_amount, Some(dec!(21.00)));
        assert_eq!(update.amount_incl_vat, Some(dec!(121.00)));
        assert_eq!(
            update.vat_lines,
            vec![VatLine {
                rate: dec!(21),
                base: dec!(100.00),
                tax: dec!(21.00),
            }]
        );
    }

    #[test]
    fn test_approve_replaces_prior_breakdown() {
        let mut doc = document_under_review();
        doc.vat_lines = vec![
            VatLine {
                rate: dec!(9),
                base: dec!(10.00),
                tax: dec!(0.90),
            },
            VatLine {
                rate: dec!(21),
                base: dec!(20.00),
                tax: dec!(4.20),
            },
        ];

        let update =
            ReviewService::resolve(&doc, &filled_form(), ReviewAction::Approve).expect("resolves");
        assert_eq!(update.vat_lines.len(), 1);
        assert_eq!(update.vat_lines[0].rate, dec!(21));
    }

    #[test]
    fn test_approve_without_total_retains_stored_amounts() {
        let mut doc = document_under_review();
        doc.amount_excl_vat = Some(dec!(40.00));
        doc.vat_amount = Some(dec!(8.40));
        doc.amount_incl_vat = Some(dec!(48.40));
        doc.vat_lines = vec![VatLine {
            rate: dec!(21),
            base: dec!(40.00),
            tax: dec!(8.40),
        }];

        let mut form = filled_form();
        form.total_incl = None;

        let update =
            ReviewService::resolve(&doc, &form, ReviewAction::Approve).expect("resolves");
        assert_eq!(update.amount_excl_vat, Some(dec!(40.00)));
        assert_eq!(update.vat_amount, Some(dec!(8.40)));
        assert_eq!(update.amount_incl_vat, Some(dec!(48.40)));
        assert_eq!(update.vat_lines, doc.vat_lines);
    }

    #[test]
    fn test_approve_with_non_positive_total_retains_stored_amounts() {
        let mut doc = document_under_review();
        doc.amount_excl_vat = Some(dec!(40.00));

        let mut form = filled_form();
        form.total_incl = Some(dec!(-121.00));

        let update =
            ReviewService::resolve(&doc, &form, ReviewAction::Approve).expect("resolves");
        assert_eq!(update.amount_excl_vat, Some(dec!(40.00)));
        assert!(update.vat_lines.is_empty());
    }

    #[test]
    fn test_approve_without_rate_retains_stored_amounts() {
        let doc = document_under_review();
        let mut form = filled_form();
        form.vat_rate = None;

        let update =
            ReviewService::resolve(&doc, &form, ReviewAction::Approve).expect("resolves");
        assert_eq!(update.amount_excl_vat, None);
        assert!(update.vat_lines.is_empty());
        // The form total is not persisted without a rate to split it.
        assert_eq!(update.amount_incl_vat, None);
    }

    #[test]
    fn test_reject_persists_fields_with_rejected_status() {
        let doc = document_under_review();
        let update =
            ReviewService::resolve(&doc, &filled_form(), ReviewAction::Reject).expect("resolves");

        assert_eq!(update.status, DocumentStatus::Rejected);
        assert_eq!(update.counterparty.as_deref(), Some("Acme B.V."));
        assert_eq!(update.amount_excl_vat, Some(dec!(100.00)));
    }

    #[test]
    fn test_resolution_is_idempotent_over_inputs() {
        let doc = document_under_review();
        let form = filled_form();

        let first = ReviewService::resolve(&doc, &form, ReviewAction::Approve).expect("resolves");
        let second = ReviewService::resolve(&doc, &form, ReviewAction::Approve).expect("resolves");

        assert_eq!(first.vat_lines, second.vat_lines);
        assert_eq!(first.amount_excl_vat, second.amount_excl_vat);
        assert_eq!(first.vat_amount, second.vat_amount);
        assert_eq!(first.amount_incl_vat, second.amount_incl_vat);
    }

    #[test]
    fn test_resolving_approved_document_fails() {
        let mut doc = document_under_review();
        doc.status = DocumentStatus::Approved;

        let result = ReviewService::resolve(&doc, &filled_form(), ReviewAction::Approve);
        assert!(matches!(
            result,
            Err(ReviewError::AlreadyResolved {
                status: DocumentStatus::Approved
            })
        ));
    }

    #[test]
    fn test_resolving_rejected_document_fails() {
        let mut doc = document_under_review();
        doc.status = DocumentStatus::Rejected;

        let result = ReviewService::resolve(&doc, &filled_form(), ReviewAction::Reject);
        assert!(matches!(result, Err(ReviewError::AlreadyResolved { .. })));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let doc = document_under_review();
        let mut form = filled_form();
        form.vat_rate = Some(dec!(-1));

        let result = ReviewService::resolve(&doc, &form, ReviewAction::Approve);
        assert!(matches!(result, Err(ReviewError::NegativeRate { .. })));
    }

    #[test]
    fn test_kind_correction_applies() {
        let doc = document_under_review();
        let mut form = filled_form();
        form.kind = Some(DocumentKind::Receipt);

        let update =
            ReviewService::resolve(&doc, &form, ReviewAction::Approve).expect("resolves");
        assert_eq!(update.kind, DocumentKind::Receipt);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_total() -> impl Strategy<Value = Decimal> {
        // Positive totals up to 100k with 2-decimal precision.
        (1i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
    }

    fn arb_rate() -> impl Strategy<Value = Decimal> {
        prop_oneof![
            Just(Decimal::ZERO),
            Just(Decimal::new(9, 0)),
            Just(Decimal::new(21, 0)),
        ]
    }

    proptest! {
        // Property: the derived split always reproduces the total exactly,
        // because the tax is the remainder of the rounded base.
        #[test]
        fn prop_split_reproduces_total(total in arb_total(), rate in arb_rate()) {
            let (base, tax) = ReviewService::derive_vat_split(total, rate);
            prop_assert_eq!(base + tax, total);
        }

        // Property: the implied rate of the split matches the requested
        // rate within one cent of rounding on the base.
        #[test]
        fn prop_split_implies_requested_rate(total in arb_total(), rate in arb_rate()) {
            let (base, tax) = ReviewService::derive_vat_split(total, rate);
            prop_assert!(base > Decimal::ZERO);
            let expected_tax = base * rate / Decimal::ONE_HUNDRED;
            prop_assert!((tax - expected_tax).abs() <= Decimal::new(1, 2));
        }

        // Property: resolution is deterministic; the same document, form,
        // and action always produce the same update.
        #[test]
        fn prop_resolution_deterministic(total in arb_total(), rate in arb_rate()) {
            let doc = tests::document_under_review();
            let form = ReviewForm {
                vat_rate: Some(rate),
                total_incl: Some(total),
                ..ReviewForm::default()
            };

            let a = ReviewService::resolve(&doc, &form, ReviewAction::Approve).unwrap();
            let b = ReviewService::resolve(&doc, &form, ReviewAction::Approve).unwrap();
            prop_assert_eq!(a.vat_lines, b.vat_lines);
            prop_assert_eq!(a.amount_excl_vat, b.amount_excl_vat);
        }
    }
}
