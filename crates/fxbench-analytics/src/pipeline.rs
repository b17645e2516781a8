//! The analysis pipeline.
//!
//! Runs one request through alignment, USD conversion, normalization,
//! per-instrument return and risk, correlation and summary assembly.
//! Instrument-level failures are recorded as diagnostics; request-level
//! failures abort the run.

use fxbench_core::{AnalysisError, AnalysisRequest, AnalysisResult, PriceSeries};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::calendar::align;
use crate::config::AnalysisConfig;
use crate::convert::to_usd;
use crate::correlation::{correlate, CorrelationMatrix};
use crate::diagnostics::Diagnostic;
use crate::normalize::{normalize, NormalizedSeries, NormalizedTable};
use crate::returns::summarize;
use crate::series::PricePath;
use crate::source::MarketData;
use crate::summary::SummaryTable;

/// Everything produced for one analysis request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// The request that produced the report.
    pub request: AnalysisRequest,
    /// USD-normalized series, in request order.
    pub normalized: Vec<NormalizedSeries>,
    /// Return and risk summary.
    pub summary: SummaryTable,
    /// Pairwise return correlations.
    pub correlation: CorrelationMatrix,
    /// Instruments excluded from part or all of the report.
    pub diagnostics: Vec<Diagnostic>,
}

impl AnalysisReport {
    /// Normalized series pivoted onto a shared date column.
    #[must_use]
    pub fn normalized_table(&self) -> NormalizedTable {
        NormalizedTable::from_series(&self.normalized)
    }
}

/// Pure, reusable analysis pipeline.
#[derive(Debug, Clone, Default)]
pub struct AnalysisPipeline {
    config: AnalysisConfig,
}

impl AnalysisPipeline {
    /// Creates a pipeline with a validated configuration.
    pub fn new(config: AnalysisConfig) -> AnalysisResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The pipeline configuration.
    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Runs `request` against already-materialized `data`.
    ///
    /// # Errors
    ///
    /// - `EmptyInput` if the request names no symbols.
    /// - `MissingFx` if a foreign-quoted symbol has no FX coverage in range.
    /// - `NoData` if no requested symbol has usable observations.
    pub fn run(&self, request: &AnalysisRequest, data: &MarketData) -> AnalysisResult<AnalysisReport> {
        if request.symbols.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }
        let range = &request.range;
        info!(symbols = request.symbols.len(), %range, "running analysis");

        let mut diagnostics = Vec::new();
        let mut raw: Vec<PriceSeries> = Vec::with_capacity(request.symbols.len());
        for symbol in &request.symbols {
            let restricted = data.price(symbol).map(|s| s.restrict(range));
            let currency = match &restricted {
                Some(series) if !series.is_empty() => series.currency(),
                _ => self.config.quote_currency(symbol),
            };
            if !currency.is_usd() && data.fx(currency).map_or(true, |fx| fx.restrict(range).is_empty())
            {
                return Err(AnalysisError::missing_fx(symbol.clone(), currency));
            }
            match restricted {
                Some(series) if !series.is_empty() => raw.push(series),
                _ => {
                    warn!(%symbol, "no data in range");
                    diagnostics.push(Diagnostic::no_data(symbol.clone()));
                }
            }
        }

        let fx: Vec<_> = data.fx_series().map(|s| s.restrict(range)).collect();
        let aligned = align(&raw, &fx, self.config.alignment);
        diagnostics.extend(aligned.diagnostics.iter().cloned());
        if aligned.series.is_empty() {
            return Err(AnalysisError::no_data(range.start, range.end));
        }

        let mut normalized = Vec::with_capacity(aligned.series.len());
        let mut records = Vec::with_capacity(aligned.series.len());
        let mut returns = Vec::with_capacity(aligned.series.len());
        for series in &aligned.series {
            // Coverage in range was checked above; rates that miss every
            // aligned date leave the series with gaps only.
            let fx = aligned.fx_for(series.currency());
            let usd = match to_usd(series, fx) {
                Ok(usd) => Some(usd),
                Err(AnalysisError::MissingFx { .. }) if fx.is_some() => None,
                Err(err) => return Err(err),
            };
            let Some(usd) = usd.filter(|usd| !usd.is_empty()) else {
                warn!(symbol = %series.symbol(), "no observations after conversion");
                diagnostics.push(Diagnostic::no_observations(
                    series.symbol().clone(),
                    "conversion",
                ));
                continue;
            };

            normalized.push(normalize(&usd, self.config.base_index)?);

            match summarize(&usd, &self.config) {
                Ok(metrics) => {
                    records.push(metrics.record);
                    returns.push(metrics.returns);
                }
                Err(err) => match Diagnostic::from_error(&err) {
                    Some(diag) => {
                        warn!(symbol = %series.symbol(), error = %err, "excluded from summary");
                        diagnostics.push(diag);
                    }
                    None => return Err(err),
                },
            }
        }
        if normalized.is_empty() {
            return Err(AnalysisError::no_data(range.start, range.end));
        }

        let correlation = correlate(&returns);
        let summary = SummaryTable::new(records);
        debug!(
            normalized = normalized.len(),
            summarized = summary.len(),
            diagnostics = diagnostics.len(),
            "analysis complete"
        );

        Ok(AnalysisReport {
            request: request.clone(),
            normalized,
            summary,
            correlation,
            diagnostics,
        })
    }
}
