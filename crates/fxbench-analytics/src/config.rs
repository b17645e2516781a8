//! Configuration for the analysis pipeline.

use fxbench_core::{AnalysisError, AnalysisResult, Currency, Symbol};
use serde::{Deserialize, Serialize};

/// Default base index every normalized series starts at.
pub const DEFAULT_BASE_INDEX: f64 = 100.0;

/// Default number of trading sessions per year used for annualization.
pub const DEFAULT_TRADING_DAYS: u32 = 252;

/// How instruments with different trading calendars are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentPolicy {
    /// Forward-fill each instrument onto the union calendar from its own first
    /// date. Instruments never truncate one another.
    #[default]
    Independent,
    /// Keep only dates on which every instrument has a raw observation.
    Intersect,
}

impl AlignmentPolicy {
    /// Returns the policy name as used in configuration files.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Independent => "independent",
            Self::Intersect => "intersect",
        }
    }
}

impl std::fmt::Display for AlignmentPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a venue suffix on a symbol to the currency the venue quotes in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixRule {
    /// Symbol suffix, including the dot (e.g. `.IS`).
    pub suffix: String,
    /// Quote currency of instruments carrying the suffix.
    pub currency: Currency,
}

impl SuffixRule {
    /// Creates a new suffix rule.
    #[must_use]
    pub fn new(suffix: impl Into<String>, currency: Currency) -> Self {
        Self {
            suffix: suffix.into(),
            currency,
        }
    }
}

/// Configuration for the analysis pipeline.
///
/// Controls the rebasing index, annualization, calendar alignment and the
/// symbol-suffix convention used to detect foreign-quoted instruments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Value every normalized series starts at.
    pub base_index: f64,

    /// Trading sessions per year for volatility annualization.
    pub trading_days_per_year: u32,

    /// Calendar alignment policy.
    pub alignment: AlignmentPolicy,

    /// Suffix conventions, checked in order; unmatched symbols are USD.
    pub suffix_rules: Vec<SuffixRule>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            base_index: DEFAULT_BASE_INDEX,
            trading_days_per_year: DEFAULT_TRADING_DAYS,
            alignment: AlignmentPolicy::Independent,
            suffix_rules: vec![SuffixRule::new(".IS", Currency::TRY)],
        }
    }
}

impl AnalysisConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base index.
    #[must_use]
    pub fn with_base_index(mut self, base_index: f64) -> Self {
        self.base_index = base_index;
        self
    }

    /// Sets the number of trading days per year.
    #[must_use]
    pub fn with_trading_days(mut self, days: u32) -> Self {
        self.trading_days_per_year = days;
        self
    }

    /// Sets the alignment policy.
    #[must_use]
    pub fn with_alignment(mut self, policy: AlignmentPolicy) -> Self {
        self.alignment = policy;
        self
    }

    /// Appends a suffix rule.
    #[must_use]
    pub fn with_suffix_rule(mut self, suffix: impl Into<String>, currency: Currency) -> Self {
        self.suffix_rules.push(SuffixRule::new(suffix, currency));
        self
    }

    /// Checks the configuration for values the pipeline cannot work with.
    pub fn validate(&self) -> AnalysisResult<()> {
        if !self.base_index.is_finite() || self.base_index <= 0.0 {
            return Err(AnalysisError::config(format!(
                "base_index must be positive, got {}",
                self.base_index
            )));
        }
        if self.trading_days_per_year == 0 {
            return Err(AnalysisError::config("trading_days_per_year must be positive"));
        }
        if let Some(rule) = self.suffix_rules.iter().find(|r| r.suffix.trim().is_empty()) {
            return Err(AnalysisError::config(format!(
                "empty suffix for currency {}",
                rule.currency
            )));
        }
        Ok(())
    }

    /// Quote currency of `symbol` under the suffix convention.
    #[must_use]
    pub fn quote_currency(&self, symbol: &Symbol) -> Currency {
        self.suffix_rules
            .iter()
            .find(|rule| symbol.has_suffix(&rule.suffix))
            .map_or(Currency::USD, |rule| rule.currency)
    }

    /// Square-root-of-time scaling factor for daily volatility.
    #[must_use]
    pub fn annualization_factor(&self) -> f64 {
        f64::from(self.trading_days_per_year).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = AnalysisConfig::default();
        assert_eq!(config.base_index, 100.0);
        assert_eq!(config.trading_days_per_year, 252);
        assert_eq!(config.alignment, AlignmentPolicy::Independent);
        assert_eq!(config.suffix_rules, vec![SuffixRule::new(".IS", Currency::TRY)]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_quote_currency() {
        let config = AnalysisConfig::default().with_suffix_rule(".L", Currency::GBP);
        let symbol = |s: &str| Symbol::parse(s).unwrap();
        assert_eq!(config.quote_currency(&symbol("THYAO.IS")), Currency::TRY);
        assert_eq!(config.quote_currency(&symbol("VOD.L")), Currency::GBP);
        assert_eq!(config.quote_currency(&symbol("AAPL")), Currency::USD);
        assert_eq!(config.quote_currency(&symbol("BTC-USD")), Currency::USD);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(AnalysisConfig::new().with_base_index(0.0).validate().is_err());
        assert!(AnalysisConfig::new().with_base_index(f64::NAN).validate().is_err());
        assert!(AnalysisConfig::new().with_trading_days(0).validate().is_err());
        assert!(AnalysisConfig::new()
            .with_suffix_rule("  ", Currency::EUR)
            .validate()
            .is_err());
    }

    #[test]
    fn test_annualization_factor() {
        let config = AnalysisConfig::default().with_trading_days(256);
        assert_eq!(config.annualization_factor(), 16.0);
    }

    #[test]
    fn test_serde_defaults_fill_missing_fields() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"alignment": "intersect"}"#).unwrap();
        assert_eq!(config.alignment, AlignmentPolicy::Intersect);
        assert_eq!(config.trading_days_per_year, 252);
        assert_eq!(config.suffix_rules.len(), 1);
    }
}
