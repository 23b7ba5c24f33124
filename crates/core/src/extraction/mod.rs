//! Best-effort field extraction assist.
//!
//! An external service guesses structured fields from a stored document's
//! retrievable URL. The guess is advisory only: it fills blanks in the
//! review form and never overwrites a value the operator already entered.
//! Extraction failure is silent; the form simply stays unpopulated.

pub mod client;
pub mod types;

pub use client::ExtractionClient;
pub use types::ExtractionGuess;
