//! VAT aggregate types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sign of the net VAT position for a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VatPosition {
    /// Net VAT is owed to the tax authority.
    Payable,
    /// Net VAT can be reclaimed from the tax authority.
    Reclaimable,
    /// Collected and paid VAT cancel out exactly.
    Neutral,
}

/// Derived VAT aggregate for one period.
///
/// Recomputed fresh from the approved document set on every view; no
/// identity, no persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatSummary {
    /// Revenue excluding tax (sales invoices).
    pub revenue_excl: Decimal,
    /// Tax collected on sales invoices.
    pub vat_collected: Decimal,
    /// Expenses excluding tax (purchase invoices and receipts).
    pub expenses_excl: Decimal,
    /// Tax paid on purchase invoices and receipts.
    pub vat_paid: Decimal,
    /// Net tax due: collected minus paid.
    pub net_due: Decimal,
}

impl VatSummary {
    /// An all-zero summary, as produced for an empty period.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            revenue_excl: Decimal::ZERO,
            vat_collected: Decimal::ZERO,
            expenses_excl: Decimal::ZERO,
            vat_paid: Decimal::ZERO,
            net_due: Decimal::ZERO,
        }
    }

    /// Classify the net position: positive = payable, negative = reclaim.
    #[must_use]
    pub fn position(&self) -> VatPosition {
        if self.net_due > Decimal::ZERO {
            VatPosition::Payable
        } else if self.net_due < Decimal::ZERO {
            VatPosition::Reclaimable
        } else {
            VatPosition::Neutral
        }
    }
}

/// One row of the per-rate tax breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLine {
    /// VAT rate as a percentage.
    pub rate: Decimal,
    /// Summed base amount at this rate.
    pub base: Decimal,
    /// Summed tax amount at this rate.
    pub tax: Decimal,
    /// This rate's whole-percent share of the period's total tax.
    pub share_pct: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_position_classification() {
        let mut summary = VatSummary::zero();
        assert_eq!(summary.position(), VatPosition::Neutral);

        summary.net_due = dec!(126.00);
        assert_eq!(summary.position(), VatPosition::Payable);

        summary.net_due = dec!(-14.50);
        assert_eq!(summary.position(), VatPosition::Reclaimable);
    }
}
