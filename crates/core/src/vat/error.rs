//! VAT aggregation error types.

use thiserror::Error;

/// Errors that can occur constructing VAT periods.
#[derive(Debug, Error)]
pub enum VatError {
    /// Quarter number outside 1–4.
    #[error("quarter {quarter} is out of range, must be 1-4")]
    InvalidQuarter {
        /// The offending quarter number.
        quarter: u8,
    },

    /// Year outside the range representable as calendar dates.
    #[error("year {year} is outside the representable date range")]
    YearOutOfRange {
        /// The offending year.
        year: i32,
    },
}

impl VatError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidQuarter { .. } | Self::YearOutOfRange { .. } => 400,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidQuarter { .. } => "INVALID_QUARTER",
            Self::YearOutOfRange { .. } => "YEAR_OUT_OF_RANGE",
        }
    }
}
