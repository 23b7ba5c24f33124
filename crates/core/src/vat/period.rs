//! Calendar quarter periods.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::VatError;

/// A calendar quarter mapped to an inclusive date range.
///
/// Q1 = Jan–Mar, Q2 = Apr–Jun, Q3 = Jul–Sep, Q4 = Oct–Dec. Derived, never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Calendar year.
    pub year: i32,
    /// Quarter number, 1–4.
    pub quarter: u8,
    /// First day of the quarter's first month.
    pub start: NaiveDate,
    /// Last day of the quarter's third month.
    pub end: NaiveDate,
}

impl Period {
    /// Creates the period for a given year and quarter.
    ///
    /// # Errors
    ///
    /// Returns an error if the quarter is outside 1–4 or the year cannot be
    /// represented as calendar dates.
    pub fn new(year: i32, quarter: u8) -> Result<Self, VatError> {
        if !(1..=4).contains(&quarter) {
            return Err(VatError::InvalidQuarter { quarter });
        }

        let first_month = u32::from(quarter - 1) * 3 + 1;
        let start = NaiveDate::from_ymd_opt(year, first_month, 1)
            .ok_or(VatError::YearOutOfRange { year })?;

        // Last day of the third month = day before the first day of the
        // next quarter (wrapping into January of the next year after Q4).
        let (next_year, next_month) = if quarter == 4 {
            (year + 1, 1)
        } else {
            (year, first_month + 3)
        };
        let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|d| d.pred_opt())
            .ok_or(VatError::YearOutOfRange { year })?;

        Ok(Self {
            year,
            quarter,
            start,
            end,
        })
    }

    /// Returns the period containing the given date.
    ///
    /// # Errors
    ///
    /// Returns an error if the adjacent year cannot be represented.
    pub fn containing(date: NaiveDate) -> Result<Self, VatError> {
        use chrono::Datelike;
        let quarter = u8::try_from(date.month0() / 3 + 1).unwrap_or(1);
        Self::new(date.year(), quarter)
    }

    /// The next quarter, wrapping Q4 into Q1 of the following year.
    ///
    /// # Errors
    ///
    /// Returns an error if the adjacent year cannot be represented.
    pub fn next(&self) -> Result<Self, VatError> {
        if self.quarter == 4 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.quarter + 1)
        }
    }

    /// The previous quarter, wrapping Q1 into Q4 of the preceding year.
    ///
    /// # Errors
    ///
    /// Returns an error if the adjacent year cannot be represented.
    pub fn previous(&self) -> Result<Self, VatError> {
        if self.quarter == 1 {
            Self::new(self.year - 1, 4)
        } else {
            Self::new(self.year, self.quarter - 1)
        }
    }

    /// Returns true if the given date falls within this period, inclusive
    /// on both ends.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Human-readable label, e.g. `"Q1 2025"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Q{} {}", self.quarter, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn test_quarter_bounds() {
        let q1 = Period::new(2025, 1).unwrap();
        assert_eq!(q1.start, date(2025, 1, 1));
        assert_eq!(q1.end, date(2025, 3, 31));

        let q2 = Period::new(2025, 2).unwrap();
        assert_eq!(q2.start, date(2025, 4, 1));
        assert_eq!(q2.end, date(2025, 6, 30));

        let q3 = Period::new(2025, 3).unwrap();
        assert_eq!(q3.start, date(2025, 7, 1));
        assert_eq!(q3.end, date(2025, 9, 30));

        let q4 = Period::new(2025, 4).unwrap();
        assert_eq!(q4.start, date(2025, 10, 1));
        assert_eq!(q4.end, date(2025, 12, 31));
    }

    #[test]
    fn test_invalid_quarter_rejected() {
        assert!(matches!(
            Period::new(2025, 0),
            Err(VatError::InvalidQuarter { quarter: 0 })
        ));
        assert!(matches!(
            Period::new(2025, 5),
            Err(VatError::InvalidQuarter { quarter: 5 })
        ));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let q1 = Period::new(2025, 1).unwrap();
        assert!(q1.contains(date(2025, 1, 1)));
        assert!(q1.contains(date(2025, 3, 31)));
        assert!(q1.contains(date(2025, 2, 10)));
        assert!(!q1.contains(date(2024, 12, 31)));
        assert!(!q1.contains(date(2025, 4, 1)));
    }

    #[test]
    fn test_navigation_wraps_year_boundaries() {
        let q1 = Period::new(2025, 1).unwrap();
        let prev = q1.previous().unwrap();
        assert_eq!((prev.year, prev.quarter), (2024, 4));

        let q4 = Period::new(2025, 4).unwrap();
        let next = q4.next().unwrap();
        assert_eq!((next.year, next.quarter), (2026, 1));

        let q2 = Period::new(2025, 2).unwrap();
        assert_eq!(q2.next().unwrap().quarter, 3);
        assert_eq!(q2.previous().unwrap().quarter, 1);
    }

    #[test]
    fn test_containing_date() {
        let p = Period::containing(date(2025, 5, 17)).unwrap();
        assert_eq!((p.year, p.quarter), (2025, 2));

        let p = Period::containing(date(2025, 12, 31)).unwrap();
        assert_eq!((p.year, p.quarter), (2025, 4));
    }

    #[test]
    fn test_label() {
        assert_eq!(Period::new(2025, 1).unwrap().label(), "Q1 2025");
        assert_eq!(Period::new(2024, 4).unwrap().label(), "Q4 2024");
    }
}
