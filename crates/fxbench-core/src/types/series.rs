//! Dated price and FX rate series.
//!
//! Both series kinds share the same invariants, checked at construction:
//! dates strictly increasing (hence unique) and every value finite and
//! strictly positive. Once built, a series is never mutated; every
//! transformation produces a new series.

use serde::{Deserialize, Serialize};

use super::{Currency, CurrencyPair, Date, DateRange, Symbol};
use crate::error::{AnalysisError, AnalysisResult};

/// A single dated value (close price or FX rate).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Observation date.
    pub date: Date,
    /// Observed value.
    pub value: f64,
}

impl Observation {
    /// Creates a new observation.
    #[must_use]
    pub fn new(date: Date, value: f64) -> Self {
        Self { date, value }
    }
}

impl From<(Date, f64)> for Observation {
    fn from((date, value): (Date, f64)) -> Self {
        Self { date, value }
    }
}

fn validate(id: &str, points: &[Observation]) -> AnalysisResult<()> {
    for (i, point) in points.iter().enumerate() {
        if !point.value.is_finite() || point.value <= 0.0 {
            return Err(AnalysisError::invalid_series(
                id,
                format!("value {} on {} must be positive", point.value, point.date),
            ));
        }
        if i > 0 && points[i - 1].date >= point.date {
            return Err(AnalysisError::invalid_series(
                id,
                format!("date {} is not after {}", point.date, points[i - 1].date),
            ));
        }
    }
    Ok(())
}

fn lookup(points: &[Observation], date: Date) -> Option<f64> {
    points
        .binary_search_by(|p| p.date.cmp(&date))
        .ok()
        .map(|i| points[i].value)
}

fn lookup_as_of(points: &[Observation], date: Date) -> Option<f64> {
    let idx = points.partition_point(|p| p.date <= date);
    idx.checked_sub(1).map(|i| points[i].value)
}

fn within(points: &[Observation], range: &DateRange) -> Vec<Observation> {
    let lo = points.partition_point(|p| p.date < range.start);
    let hi = points.partition_point(|p| p.date <= range.end);
    points[lo..hi].to_vec()
}

/// Daily close prices of one instrument in its native currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPriceSeries")]
pub struct PriceSeries {
    symbol: Symbol,
    currency: Currency,
    points: Vec<Observation>,
}

impl PriceSeries {
    /// Creates a validated price series.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidSeries` if dates are not strictly
    /// increasing or a price is not positive.
    pub fn new(symbol: Symbol, currency: Currency, points: Vec<Observation>) -> AnalysisResult<Self> {
        validate(symbol.as_str(), &points)?;
        Ok(Self {
            symbol,
            currency,
            points,
        })
    }

    /// Creates a validated price series from `(date, price)` pairs.
    pub fn from_pairs(
        symbol: Symbol,
        currency: Currency,
        pairs: impl IntoIterator<Item = (Date, f64)>,
    ) -> AnalysisResult<Self> {
        Self::new(symbol, currency, pairs.into_iter().map(Observation::from).collect())
    }

    /// Instrument symbol.
    #[must_use]
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Native currency tag.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// All observations in date order.
    #[must_use]
    pub fn points(&self) -> &[Observation] {
        &self.points
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series holds no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First observation, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Observation> {
        self.points.first()
    }

    /// Last observation, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Observation> {
        self.points.last()
    }

    /// Iterator over observation dates.
    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.points.iter().map(|p| p.date)
    }

    /// Iterator over observation values.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// Price observed exactly on `date`.
    #[must_use]
    pub fn value_on(&self, date: Date) -> Option<f64> {
        lookup(&self.points, date)
    }

    /// Most recent price on or before `date`.
    #[must_use]
    pub fn value_as_of(&self, date: Date) -> Option<f64> {
        lookup_as_of(&self.points, date)
    }

    /// A copy holding only the observations inside `range` (inclusive).
    #[must_use]
    pub fn restrict(&self, range: &DateRange) -> Self {
        Self {
            symbol: self.symbol.clone(),
            currency: self.currency,
            points: within(&self.points, range),
        }
    }
}

/// Daily FX rates for one currency pair, as units of quote per unit of base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFxRateSeries")]
pub struct FxRateSeries {
    pair: CurrencyPair,
    points: Vec<Observation>,
}

impl FxRateSeries {
    /// Creates a validated FX rate series.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidSeries` if dates are not strictly
    /// increasing or a rate is not positive.
    pub fn new(pair: CurrencyPair, points: Vec<Observation>) -> AnalysisResult<Self> {
        validate(&pair.to_string(), &points)?;
        Ok(Self { pair, points })
    }

    /// Creates a validated FX series from `(date, rate)` pairs.
    pub fn from_pairs(
        pair: CurrencyPair,
        pairs: impl IntoIterator<Item = (Date, f64)>,
    ) -> AnalysisResult<Self> {
        Self::new(pair, pairs.into_iter().map(Observation::from).collect())
    }

    /// The currency pair.
    #[must_use]
    pub fn pair(&self) -> CurrencyPair {
        self.pair
    }

    /// All observations in date order.
    #[must_use]
    pub fn points(&self) -> &[Observation] {
        &self.points
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series holds no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Rate observed exactly on `date`.
    #[must_use]
    pub fn rate_on(&self, date: Date) -> Option<f64> {
        lookup(&self.points, date)
    }

    /// Most recent rate on or before `date`.
    #[must_use]
    pub fn rate_as_of(&self, date: Date) -> Option<f64> {
        lookup_as_of(&self.points, date)
    }

    /// A copy holding only the observations inside `range` (inclusive).
    #[must_use]
    pub fn restrict(&self, range: &DateRange) -> Self {
        Self {
            pair: self.pair,
            points: within(&self.points, range),
        }
    }
}

/// Unchecked wire form of [`PriceSeries`].
#[derive(Deserialize)]
struct RawPriceSeries {
    symbol: Symbol,
    currency: Currency,
    points: Vec<Observation>,
}

impl TryFrom<RawPriceSeries> for PriceSeries {
    type Error = AnalysisError;

    fn try_from(raw: RawPriceSeries) -> Result<Self, Self::Error> {
        Self::new(raw.symbol, raw.currency, raw.points)
    }
}

/// Unchecked wire form of [`FxRateSeries`].
#[derive(Deserialize)]
struct RawFxRateSeries {
    pair: CurrencyPair,
    points: Vec<Observation>,
}

impl TryFrom<RawFxRateSeries> for FxRateSeries {
    type Error = AnalysisError;

    fn try_from(raw: RawFxRateSeries) -> Result<Self, Self::Error> {
        Self::new(raw.pair, raw.points)
    }
}
