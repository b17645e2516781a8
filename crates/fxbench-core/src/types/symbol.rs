//! Instrument symbols.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AnalysisError, AnalysisResult};

/// Instrument symbol (ticker), trimmed and upper-cased.
///
/// Symbols keep their venue suffix (`THYAO.IS`), which is how the
/// quote currency of a listing is recognised.
#[derive(Debug, Clone, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parses and normalizes a single symbol.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidRequest` for blank input or input
    /// containing whitespace or a comma.
    pub fn parse(input: &str) -> AnalysisResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AnalysisError::invalid_request("empty symbol"));
        }
        if trimmed.chars().any(|c| c.is_whitespace() || c == ',') {
            return Err(AnalysisError::invalid_request(format!(
                "symbol '{trimmed}' contains a separator"
            )));
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// Parses a free-text, comma-separated symbol list.
    ///
    /// Entries are trimmed and upper-cased, blanks are dropped, and duplicates
    /// keep their first position. An empty result is not an error here; the
    /// caller decides how to re-prompt.
    ///
    /// ```rust
    /// use fxbench_core::types::Symbol;
    ///
    /// let symbols = Symbol::parse_list(" aapl, ,thyao.is,AAPL ");
    /// let names: Vec<&str> = symbols.iter().map(Symbol::as_str).collect();
    /// assert_eq!(names, ["AAPL", "THYAO.IS"]);
    /// ```
    #[must_use]
    pub fn parse_list(input: &str) -> Vec<Self> {
        let mut symbols: Vec<Self> = Vec::new();
        for entry in input.split(',') {
            let trimmed = entry.trim();
            if trimmed.is_empty() {
                continue;
            }
            let symbol = Self(trimmed.to_uppercase());
            if !symbols.contains(&symbol) {
                symbols.push(symbol);
            }
        }
        symbols
    }

    /// Get the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the symbol ends with the given venue suffix
    /// (case-insensitive).
    #[must_use]
    pub fn has_suffix(&self, suffix: &str) -> bool {
        !suffix.is_empty() && self.0.ends_with(&suffix.to_uppercase())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = AnalysisError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_symbol() {
        let parsed = Symbol::parse(" thyao.is ").unwrap();
        assert_eq!(parsed.as_str(), "THYAO.IS");
    }

    #[test]
    fn rejects_blank_and_separators() {
        assert!(Symbol::parse("   ").is_err());
        assert!(Symbol::parse("AAPL,MSFT").is_err());
        assert!(Symbol::parse("AA PL").is_err());
    }

    #[test]
    fn parse_list_discards_empty_entries() {
        assert!(Symbol::parse_list(" , ,, ").is_empty());
        let symbols = Symbol::parse_list("AAPL, MSFT, THYAO.IS, XU100.IS");
        assert_eq!(symbols.len(), 4);
        assert_eq!(symbols[3].as_str(), "XU100.IS");
    }

    #[test]
    fn parse_list_keeps_first_duplicate() {
        let symbols = Symbol::parse_list("msft,aapl,MSFT");
        assert_eq!(symbols, vec![Symbol::parse("MSFT").unwrap(), Symbol::parse("AAPL").unwrap()]);
    }

    #[test]
    fn suffix_matching() {
        let symbol = Symbol::parse("thyao.is").unwrap();
        assert!(symbol.has_suffix(".IS"));
        assert!(symbol.has_suffix(".is"));
        assert!(!symbol.has_suffix(".L"));
        assert!(!symbol.has_suffix(""));
    }

    #[test]
    fn serde_round_trip_normalizes() {
        let parsed: Symbol = serde_json::from_str("\"btc-usd\"").unwrap();
        assert_eq!(parsed.as_str(), "BTC-USD");
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"BTC-USD\"");
    }
}
