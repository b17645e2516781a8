//! Rebasing USD series to a common starting index.

use std::collections::BTreeSet;

use fxbench_core::{AnalysisError, AnalysisResult, Date, Observation, Symbol};
use serde::Serialize;

use crate::series::PricePath;

/// A USD series rebased so its first value equals the base index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedSeries {
    symbol: Symbol,
    base: f64,
    points: Vec<Observation>,
}

impl NormalizedSeries {
    /// The base index the series starts at.
    #[must_use]
    pub fn base(&self) -> f64 {
        self.base
    }

    /// Most recent index value.
    #[must_use]
    pub fn last_value(&self) -> Option<f64> {
        self.points.last().map(|p| p.value)
    }

    /// Index value on `date`.
    #[must_use]
    pub fn value_on(&self, date: Date) -> Option<f64> {
        self.points
            .binary_search_by(|p| p.date.cmp(&date))
            .ok()
            .map(|i| self.points[i].value)
    }
}

impl PricePath for NormalizedSeries {
    fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    fn points(&self) -> &[Observation] {
        &self.points
    }
}

/// Rebases `series` so that its own first observation equals `base`.
///
/// `normalized[t] = price[t] / price[0] * base`. The first point is set to
/// `base` exactly rather than computed.
///
/// # Errors
///
/// Returns `InsufficientHistory` if the series is empty.
pub fn normalize<P: PricePath + ?Sized>(series: &P, base: f64) -> AnalysisResult<NormalizedSeries> {
    let points = series.points();
    let Some(first) = points.first() else {
        return Err(AnalysisError::insufficient_history(
            series.symbol().clone(),
            1,
            0,
        ));
    };

    let origin = first.value;
    let mut rebased = Vec::with_capacity(points.len());
    rebased.push(Observation::new(first.date, base));
    rebased.extend(
        points[1..]
            .iter()
            .map(|p| Observation::new(p.date, p.value / origin * base)),
    );

    Ok(NormalizedSeries {
        symbol: series.symbol().clone(),
        base,
        points: rebased,
    })
}

/// One row of a [`NormalizedTable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRow {
    /// Row date.
    pub date: Date,
    /// One cell per symbol, in table column order.
    pub values: Vec<Option<f64>>,
}

/// Normalized series pivoted onto the union of their dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedTable {
    /// Column symbols.
    pub symbols: Vec<Symbol>,
    /// Rows in date order.
    pub rows: Vec<NormalizedRow>,
}

impl NormalizedTable {
    /// Pivots `series` into a wide table; cells are empty where an
    /// instrument has no value on a date.
    #[must_use]
    pub fn from_series(series: &[NormalizedSeries]) -> Self {
        let dates: BTreeSet<Date> = series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.date))
            .collect();
        let rows = dates
            .into_iter()
            .map(|date| NormalizedRow {
                date,
                values: series.iter().map(|s| s.value_on(date)).collect(),
            })
            .collect();
        Self {
            symbols: series.iter().map(|s| s.symbol.clone()).collect(),
            rows,
        }
    }

    /// The last `n` rows.
    #[must_use]
    pub fn tail(&self, n: usize) -> &[NormalizedRow] {
        &self.rows[self.rows.len().saturating_sub(n)..]
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
