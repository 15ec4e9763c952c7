//! Validation failures surfaced to the caller.
//!
//! All three kinds are local, synchronous rejections of bad input. Nothing at
//! this layer retries or partially succeeds, and sub-calls propagate their
//! errors untouched: the UI decides how to present them.
//!
//! Note that a percentage split whose percentages do not sum to 100 is *not*
//! an error; see [`crate::split::Allocation::percentage_total`].

use thiserror::Error;

use crate::date::DateError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Negative total, negative per-participant value, or an empty
    /// participant list where a per-head division is required.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Malformed custom recurrence (zero interval or unrecognized unit).
    #[error("invalid recurrence: {0}")]
    InvalidRecurrence(String),

    /// Explicit start date that does not denote a real `YYYY-MM-DD` day.
    #[error("invalid date: {0}")]
    InvalidDate(DateError),
}

impl From<DateError> for Error {
    fn from(err: DateError) -> Self {
        Error::InvalidDate(err)
    }
}
