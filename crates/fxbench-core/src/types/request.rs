//! Analysis requests: which symbols, over which dates.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Date, Symbol};
use crate::error::{AnalysisError, AnalysisResult};

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First date (inclusive).
    pub start: Date,
    /// Last date (inclusive).
    pub end: Date,
}

impl DateRange {
    /// Creates a range.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidRequest` if `start` is after `end`.
    pub fn new(start: Date, end: Date) -> AnalysisResult<Self> {
        if start > end {
            return Err(AnalysisError::invalid_request(format!(
                "start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Creates a range whose end defaults to today when not given.
    pub fn with_default_end(start: Date, end: Option<Date>) -> AnalysisResult<Self> {
        Self::new(start, end.unwrap_or_else(Date::today))
    }

    /// Returns true if `date` lies within the range.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// One analysis request, passed by value into the pipeline.
///
/// Symbols are always a list, even for a single instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Requested symbols in caller order.
    pub symbols: Vec<Symbol>,
    /// Requested date range.
    pub range: DateRange,
}

impl AnalysisRequest {
    /// Creates a request from already-parsed symbols.
    #[must_use]
    pub fn new(symbols: Vec<Symbol>, range: DateRange) -> Self {
        Self { symbols, range }
    }

    /// Builds a request from free-text symbol input.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::EmptyInput` when no symbol survives parsing.
    pub fn parse(symbols: &str, range: DateRange) -> AnalysisResult<Self> {
        let symbols = Symbol::parse_list(symbols);
        if symbols.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }
        Ok(Self { symbols, range })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    #[test]
    fn test_range_validation() {
        assert!(DateRange::new(date("2024-01-02"), date("2024-01-01")).is_err());
        let single = DateRange::new(date("2024-01-01"), date("2024-01-01")).unwrap();
        assert!(single.contains(date("2024-01-01")));
        assert!(!single.contains(date("2024-01-02")));
    }

    #[test]
    fn test_default_end_is_today() {
        let range = DateRange::with_default_end(date("2020-01-01"), None).unwrap();
        assert_eq!(range.end, Date::today());
    }

    #[test]
    fn test_parse_request() {
        let range = DateRange::new(date("2020-01-01"), date("2024-01-01")).unwrap();
        let request = AnalysisRequest::parse("aapl, thyao.is", range).unwrap();
        assert_eq!(request.symbols.len(), 2);
        assert_eq!(request.symbols[1].as_str(), "THYAO.IS");
        assert_eq!(
            AnalysisRequest::parse(" , ", range),
            Err(AnalysisError::EmptyInput)
        );
    }
}
