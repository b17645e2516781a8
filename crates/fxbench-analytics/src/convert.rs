//! Currency conversion into USD.

use fxbench_core::{
    AnalysisError, AnalysisResult, Currency, CurrencyPair, FxRateSeries, Observation, PriceSeries,
    Symbol,
};
use serde::Serialize;
use tracing::debug;

use crate::series::PricePath;

/// A price series denominated in USD.
///
/// For a USD-quoted instrument this is the input series unchanged. For a
/// foreign-quoted instrument every value is the native price divided by the
/// USD/foreign rate of the same date, and only dates carrying both a price
/// and a rate are present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UsdPriceSeries(PriceSeries);

impl UsdPriceSeries {
    /// Borrows the underlying series.
    #[must_use]
    pub fn as_series(&self) -> &PriceSeries {
        &self.0
    }

    /// Unwraps into the underlying series.
    #[must_use]
    pub fn into_inner(self) -> PriceSeries {
        self.0
    }
}

impl PricePath for UsdPriceSeries {
    fn symbol(&self) -> &Symbol {
        self.0.symbol()
    }

    fn points(&self) -> &[Observation] {
        self.0.points()
    }
}

/// Converts `series` into USD.
///
/// USD series pass through unchanged and ignore `fx`. Dates without a rate
/// are dropped as gaps.
///
/// # Errors
///
/// - `MissingFx` if the series is foreign-quoted and `fx` is absent or empty.
/// - `InvalidSeries` if `fx` is not the USD/`currency` pair.
pub fn to_usd(series: &PriceSeries, fx: Option<&FxRateSeries>) -> AnalysisResult<UsdPriceSeries> {
    let currency = series.currency();
    if currency.is_usd() {
        return Ok(UsdPriceSeries(series.clone()));
    }

    let fx = match fx {
        Some(fx) if !fx.is_empty() => fx,
        _ => return Err(AnalysisError::missing_fx(series.symbol().clone(), currency)),
    };
    let expected = CurrencyPair::usd_to(currency);
    if fx.pair() != expected {
        return Err(AnalysisError::invalid_series(
            series.symbol().as_str(),
            format!("expected {expected} rates, got {}", fx.pair()),
        ));
    }

    let points: Vec<Observation> = series
        .points()
        .iter()
        .filter_map(|p| fx.rate_on(p.date).map(|rate| Observation::new(p.date, p.value / rate)))
        .collect();
    debug!(
        symbol = %series.symbol(),
        pair = %expected,
        native = series.len(),
        converted = points.len(),
        "converted to USD"
    );

    PriceSeries::new(series.symbol().clone(), Currency::USD, points).map(UsdPriceSeries)
}
