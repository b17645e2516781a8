//! Per-instrument diagnostics.
//!
//! Instruments that cannot take part in an analysis are excluded from the
//! outputs and reported here instead of failing the whole request.

use fxbench_core::{AnalysisError, Symbol};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an instrument was excluded from (part of) the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The market-data collaborator returned nothing for the symbol.
    NoData,
    /// The series had no usable points after alignment or conversion.
    NoObservations,
    /// Too few points for return or volatility computation.
    InsufficientHistory,
}

impl DiagnosticKind {
    /// Short name used in tabular output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoData => "no_data",
            Self::NoObservations => "no_observations",
            Self::InsufficientHistory => "insufficient_history",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded exclusion for one instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Affected instrument.
    pub symbol: Symbol,
    /// Diagnostic category.
    pub kind: DiagnosticKind,
    /// Human-readable detail.
    pub message: String,
}

impl Diagnostic {
    /// Creates a diagnostic.
    #[must_use]
    pub fn new(symbol: Symbol, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            symbol,
            kind,
            message: message.into(),
        }
    }

    /// The collaborator returned no observations in range.
    #[must_use]
    pub fn no_data(symbol: Symbol) -> Self {
        let message = format!("no price data returned for {symbol}");
        Self::new(symbol, DiagnosticKind::NoData, message)
    }

    /// The series was emptied by alignment or conversion.
    #[must_use]
    pub fn no_observations(symbol: Symbol, stage: &str) -> Self {
        let message = format!("{symbol} has no observations after {stage}");
        Self::new(symbol, DiagnosticKind::NoObservations, message)
    }

    /// Builds a diagnostic from an instrument-level error.
    ///
    /// Returns `None` for request-level errors, which must be propagated
    /// rather than recorded.
    #[must_use]
    pub fn from_error(error: &AnalysisError) -> Option<Self> {
        match error {
            AnalysisError::InsufficientHistory { symbol, .. } => Some(Self::new(
                symbol.clone(),
                DiagnosticKind::InsufficientHistory,
                error.to_string(),
            )),
            _ => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_instrument_error() {
        let symbol = Symbol::parse("C").unwrap();
        let err = AnalysisError::insufficient_history(symbol.clone(), 2, 1);
        let diag = Diagnostic::from_error(&err).unwrap();
        assert_eq!(diag.symbol, symbol);
        assert_eq!(diag.kind, DiagnosticKind::InsufficientHistory);
        assert!(diag.message.contains("at least 2"));
    }

    #[test]
    fn test_request_errors_are_not_diagnostics() {
        assert!(Diagnostic::from_error(&AnalysisError::EmptyInput).is_none());
        assert!(Diagnostic::from_error(&AnalysisError::no_data("a", "b")).is_none());
    }

    #[test]
    fn test_display() {
        let diag = Diagnostic::no_data(Symbol::parse("XYZ").unwrap());
        assert_eq!(diag.to_string(), "[no_data] no price data returned for XYZ");
    }
}
