//! Error types for the fxbench library.
//!
//! Errors fall into two groups. Request-level errors abort a whole analysis
//! request and are surfaced to the caller as a single value. Instrument-level
//! errors ([`AnalysisError::InsufficientHistory`]) are isolated by the pipeline
//! and reported as diagnostics instead.

use thiserror::Error;

use crate::types::{Currency, Symbol};

/// A specialized Result type for fxbench operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// The main error type for fxbench operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// No valid symbols were supplied.
    #[error("No valid symbols supplied")]
    EmptyInput,

    /// No usable observations remain for the requested symbols and range.
    #[error("No usable data for the requested symbols between {start} and {end}")]
    NoData {
        /// First date of the requested range.
        start: String,
        /// Last date of the requested range.
        end: String,
    },

    /// A foreign-quoted symbol was requested but no FX coverage exists.
    #[error("No USD/{currency} FX coverage for {symbol} over the requested range")]
    MissingFx {
        /// The foreign-quoted symbol that required conversion.
        symbol: Symbol,
        /// The quote currency without coverage.
        currency: Currency,
    },

    /// An instrument has too few price points for the computation.
    #[error("{symbol} has {available} price point(s), at least {required} required")]
    InsufficientHistory {
        /// The affected instrument.
        symbol: Symbol,
        /// Minimum number of points required.
        required: usize,
        /// Number of points available.
        available: usize,
    },

    /// A series violates its construction invariants.
    #[error("Invalid series {id}: {reason}")]
    InvalidSeries {
        /// Identifier of the offending series.
        id: String,
        /// Description of the violation.
        reason: String,
    },

    /// Error in date parsing or an invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// The request itself is malformed.
    #[error("Invalid request: {reason}")]
    InvalidRequest {
        /// Description of what is wrong.
        reason: String,
    },

    /// Configuration error.
    #[error("Configuration error: {reason}")]
    Config {
        /// Description of the configuration error.
        reason: String,
    },
}

impl AnalysisError {
    /// Creates a no-data error for the given range bounds.
    #[must_use]
    pub fn no_data(start: impl ToString, end: impl ToString) -> Self {
        Self::NoData {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    /// Creates a missing FX coverage error.
    #[must_use]
    pub fn missing_fx(symbol: Symbol, currency: Currency) -> Self {
        Self::MissingFx { symbol, currency }
    }

    /// Creates an insufficient history error.
    #[must_use]
    pub fn insufficient_history(symbol: Symbol, required: usize, available: usize) -> Self {
        Self::InsufficientHistory {
            symbol,
            required,
            available,
        }
    }

    /// Creates an invalid series error.
    #[must_use]
    pub fn invalid_series(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSeries {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid request error.
    #[must_use]
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Returns true if the error aborts a whole request rather than a single
    /// instrument.
    #[must_use]
    pub fn is_request_level(&self) -> bool {
        !matches!(self, Self::InsufficientHistory { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnalysisError::invalid_date("2024-02-30 is not a valid date");
        assert!(err.to_string().contains("Invalid date"));
    }

    #[test]
    fn test_missing_fx_display() {
        let symbol = Symbol::parse("thyao.is").unwrap();
        let err = AnalysisError::missing_fx(symbol, Currency::TRY);
        assert_eq!(
            err.to_string(),
            "No USD/TRY FX coverage for THYAO.IS over the requested range"
        );
    }

    #[test]
    fn test_request_level_classification() {
        let symbol = Symbol::parse("AAPL").unwrap();
        assert!(AnalysisError::EmptyInput.is_request_level());
        assert!(AnalysisError::no_data("2024-01-01", "2024-02-01").is_request_level());
        assert!(AnalysisError::missing_fx(symbol.clone(), Currency::TRY).is_request_level());
        assert!(!AnalysisError::insufficient_history(symbol, 2, 1).is_request_level());
    }
}
