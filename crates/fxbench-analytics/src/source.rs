//! Market-data collaborator boundary.
//!
//! The pipeline never performs I/O. A [`MarketDataSource`] is queried once
//! per request through [`MarketData::fetch`], and the materialized series
//! are then handed to the pipeline.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use fxbench_core::{
    AnalysisError, AnalysisRequest, Currency, CurrencyPair, DateRange, FxRateSeries, PriceSeries,
    Symbol,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::AnalysisConfig;

/// Errors raised by market-data sources and exporters.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Parse/deserialization error.
    #[error("parse error: {0}")]
    ParseError(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(String),

    /// Data violated a series invariant.
    #[error(transparent)]
    Invalid(#[from] AnalysisError),
}

/// Provider of daily close histories.
pub trait MarketDataSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Close prices for `symbol` within `range`, tagged with `currency`.
    ///
    /// `Ok(None)` means the source knows nothing about the symbol.
    fn price_history(
        &self,
        symbol: &Symbol,
        currency: Currency,
        range: &DateRange,
    ) -> Result<Option<PriceSeries>, SourceError>;

    /// FX rates for `pair` within `range`.
    fn fx_history(
        &self,
        pair: CurrencyPair,
        range: &DateRange,
    ) -> Result<Option<FxRateSeries>, SourceError>;
}

/// Materialized price and FX series for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketData {
    prices: HashMap<Symbol, PriceSeries>,
    fx: BTreeMap<Currency, FxRateSeries>,
}

impl MarketData {
    /// Creates an empty data set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a price series, replacing any series for the same symbol.
    #[must_use]
    pub fn with_prices(mut self, series: PriceSeries) -> Self {
        self.prices.insert(series.symbol().clone(), series);
        self
    }

    /// Adds an FX series, keyed by its quote currency.
    #[must_use]
    pub fn with_fx(mut self, series: FxRateSeries) -> Self {
        self.fx.insert(series.pair().quote, series);
        self
    }

    /// Price series for `symbol`.
    #[must_use]
    pub fn price(&self, symbol: &Symbol) -> Option<&PriceSeries> {
        self.prices.get(symbol)
    }

    /// FX series for USD/`currency`.
    #[must_use]
    pub fn fx(&self, currency: Currency) -> Option<&FxRateSeries> {
        self.fx.get(&currency)
    }

    /// All FX series.
    pub fn fx_series(&self) -> impl Iterator<Item = &FxRateSeries> {
        self.fx.values()
    }

    /// Queries `source` for every requested symbol, then for the FX pair of
    /// every foreign quote currency involved.
    ///
    /// A symbol's currency comes from the suffix convention in `config`.
    pub fn fetch(
        source: &dyn MarketDataSource,
        request: &AnalysisRequest,
        config: &AnalysisConfig,
    ) -> Result<Self, SourceError> {
        let mut data = Self::new();
        let mut foreign = BTreeSet::new();

        for symbol in &request.symbols {
            let currency = config.quote_currency(symbol);
            if !currency.is_usd() {
                foreign.insert(currency);
            }
            match source.price_history(symbol, currency, &request.range)? {
                Some(series) => {
                    debug!(source = source.name(), %symbol, points = series.len(), "fetched prices");
                    data = data.with_prices(series);
                }
                None => debug!(source = source.name(), %symbol, "no prices available"),
            }
        }

        for currency in foreign {
            let pair = CurrencyPair::usd_to(currency);
            if let Some(series) = source.fx_history(pair, &request.range)? {
                debug!(source = source.name(), %pair, points = series.len(), "fetched FX");
                data = data.with_fx(series);
            }
        }

        info!(
            source = source.name(),
            instruments = data.prices.len(),
            fx_pairs = data.fx.len(),
            "market data loaded"
        );
        Ok(data)
    }
}

/// A source serving series held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    data: MarketData,
}

impl InMemorySource {
    /// Creates a source over `data`.
    #[must_use]
    pub fn new(data: MarketData) -> Self {
        Self { data }
    }
}

impl MarketDataSource for InMemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    fn price_history(
        &self,
        symbol: &Symbol,
        _currency: Currency,
        range: &DateRange,
    ) -> Result<Option<PriceSeries>, SourceError> {
        Ok(self.data.price(symbol).map(|s| s.restrict(range)))
    }

    fn fx_history(
        &self,
        pair: CurrencyPair,
        range: &DateRange,
    ) -> Result<Option<FxRateSeries>, SourceError> {
        Ok(self
            .data
            .fx(pair.quote)
            .filter(|s| s.pair() == pair)
            .map(|s| s.restrict(range)))
    }
}
