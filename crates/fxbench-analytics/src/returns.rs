//! Return and risk calculation.
//!
//! Every metric is computed on one instrument's own history, independently
//! of which other instruments are in the request.

use fxbench_core::{AnalysisError, AnalysisResult, Date, Observation, Symbol};
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::series::PricePath;

/// Minimum price points for total return and volatility.
pub const MIN_POINTS: usize = 2;

/// Simple periodic returns of one instrument.
///
/// Each return is stamped with the later date of its consecutive pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnSeries {
    /// Instrument symbol.
    pub symbol: Symbol,
    /// Dated returns in date order.
    pub points: Vec<Observation>,
}

impl ReturnSeries {
    /// Computes `r[t] = price[t] / price[t-1] - 1` over consecutive points.
    #[must_use]
    pub fn from_path<P: PricePath + ?Sized>(path: &P) -> Self {
        Self {
            symbol: path.symbol().clone(),
            points: periodic_returns(path.points()),
        }
    }

    /// Number of returns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if there are no returns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Return values in date order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }
}

/// Simple returns between consecutive observations.
#[must_use]
pub fn periodic_returns(points: &[Observation]) -> Vec<Observation> {
    points
        .windows(2)
        .map(|w| Observation::new(w[1].date, w[1].value / w[0].value - 1.0))
        .collect()
}

/// Total return in percent, `(last / first - 1) * 100`.
///
/// Returns `None` with fewer than two points.
#[must_use]
pub fn total_return_pct(points: &[Observation]) -> Option<f64> {
    match points {
        [first, .., last] => Some((last.value / first.value - 1.0) * 100.0),
        _ => None,
    }
}

/// Sample standard deviation (n - 1 denominator).
///
/// Returns `None` with fewer than two values.
#[must_use]
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some(variance.sqrt())
}

/// Annualized volatility in percent, `stddev(r) * sqrt(days) * 100`.
///
/// A single return has no dispersion and yields 0.0.
#[must_use]
pub fn annualized_volatility_pct(returns: &[f64], trading_days_per_year: u32) -> f64 {
    sample_std_dev(returns)
        .map_or(0.0, |sd| sd * f64::from(trading_days_per_year).sqrt() * 100.0)
}

/// Per-instrument summary metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// Instrument symbol.
    pub symbol: Symbol,
    /// Total return over the instrument's window, percent. May be negative.
    pub total_return_pct: f64,
    /// Annualized volatility, percent. Never negative.
    pub annualized_volatility_pct: f64,
    /// First date of the instrument's window.
    pub start: Date,
    /// Last date of the instrument's window.
    pub end: Date,
    /// Number of price points used.
    pub observations: usize,
}

/// Summary record plus the return series it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentMetrics {
    /// Summary metrics.
    pub record: SummaryRecord,
    /// Periodic returns.
    pub returns: ReturnSeries,
}

/// Computes total return and annualized volatility for one instrument.
///
/// # Errors
///
/// Returns `InsufficientHistory` with fewer than [`MIN_POINTS`] points.
pub fn summarize<P: PricePath + ?Sized>(
    path: &P,
    config: &AnalysisConfig,
) -> AnalysisResult<InstrumentMetrics> {
    let points = path.points();
    let (Some(first), Some(last), Some(total)) =
        (points.first(), points.last(), total_return_pct(points))
    else {
        return Err(AnalysisError::insufficient_history(
            path.symbol().clone(),
            MIN_POINTS,
            points.len(),
        ));
    };

    let returns = ReturnSeries::from_path(path);
    let values: Vec<f64> = returns.values().collect();
    let volatility = annualized_volatility_pct(&values, config.trading_days_per_year);

    Ok(InstrumentMetrics {
        record: SummaryRecord {
            symbol: path.symbol().clone(),
            total_return_pct: total,
            annualized_volatility_pct: volatility,
            start: first.date,
            end: last.date,
            observations: points.len(),
        },
        returns,
    })
}
