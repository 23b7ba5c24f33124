//! Period aggregation engine.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::document::{AccountingBasis, DocumentStatus, FinancialDocument};

use super::period::Period;
use super::types::{RateLine, VatSummary};

/// Round a monetary amount at the output boundary.
fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Stateless engine computing VAT aggregates over a document snapshot.
pub struct VatService;

impl VatService {
    /// Filter a snapshot to the approved documents belonging to a period.
    ///
    /// A document belongs when its basis date is present and falls within
    /// `[start, end]` inclusive. Documents lacking the relevant date are
    /// excluded entirely, never silently included.
    #[must_use]
    pub fn filter_period<'a>(
        documents: &'a [FinancialDocument],
        period: &Period,
        basis: AccountingBasis,
    ) -> Vec<&'a FinancialDocument> {
        documents
            .iter()
            .filter(|d| d.status == DocumentStatus::Approved)
            .filter(|d| d.basis_date(basis).is_some_and(|date| period.contains(date)))
            .collect()
    }

    /// Sum the period's revenue/expense bases and VAT amounts.
    ///
    /// Sales invoices contribute to revenue and tax collected; purchase
    /// invoices and receipts to expenses and tax paid; bank statements to
    /// neither. Sums accumulate unrounded and are rounded to 2 decimals
    /// only here, at the output boundary.
    #[must_use]
    pub fn summarize(filtered: &[&FinancialDocument]) -> VatSummary {
        let mut revenue_excl = Decimal::ZERO;
        let mut vat_collected = Decimal::ZERO;
        let mut expenses_excl = Decimal::ZERO;
        let mut vat_paid = Decimal::ZERO;

        for doc in filtered {
            let excl = doc.amount_excl_vat.unwrap_or(Decimal::ZERO);
            let vat = doc.vat_amount.unwrap_or(Decimal::ZERO);

            if doc.kind.is_revenue() {
                revenue_excl += excl;
                vat_collected += vat;
            } else if doc.kind.is_expense() {
                expenses_excl += excl;
                vat_paid += vat;
            }
        }

        VatSummary {
            revenue_excl: round2(revenue_excl),
            vat_collected: round2(vat_collected),
            expenses_excl: round2(expenses_excl),
            vat_paid: round2(vat_paid),
            net_due: round2(vat_collected - vat_paid),
        }
    }

    /// Group the period's tax breakdown entries by rate.
    ///
    /// Every document's `vat_lines` participate; historical documents may
    /// carry multi-rate breakdowns even though the review form only writes a
    /// single flat rate. Per-line amounts are rounded to 2 decimals before
    /// summing (matching the upstream bookkeeping behavior), sums per rate
    /// are rounded again, rows sort ascending by rate, and each row carries
    /// its whole-percent share of the period's total tax. Returns an empty
    /// breakdown when total tax is zero.
    #[must_use]
    pub fn rate_breakdown(filtered: &[&FinancialDocument]) -> Vec<RateLine> {
        let mut by_rate: BTreeMap<Decimal, (Decimal, Decimal)> = BTreeMap::new();

        for doc in filtered {
            for line in &doc.vat_lines {
                let entry = by_rate.entry(line.rate).or_insert((Decimal::ZERO, Decimal::ZERO));
                entry.0 += round2(line.base);
                entry.1 += round2(line.tax);
            }
        }

        let total_tax: Decimal = by_rate.values().map(|(_, tax)| *tax).sum();
        if total_tax.is_zero() {
            return Vec::new();
        }

        by_rate
            .into_iter()
            .map(|(rate, (base, tax))| RateLine {
                rate,
                base: round2(base),
                tax: round2(tax),
                share_pct: (tax / total_tax * Decimal::ONE_HUNDRED)
                    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
            })
            .collect()
    }
}
