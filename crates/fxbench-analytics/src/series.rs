//! Common view over dated price paths.

use fxbench_core::{Date, Observation, PriceSeries, Symbol};

/// A dated, strictly increasing price path belonging to one instrument.
///
/// Implemented by raw, USD-converted and normalized series so the return
/// and risk calculator can work on any of them; percentage metrics are
/// scale-invariant.
pub trait PricePath {
    /// Instrument symbol.
    fn symbol(&self) -> &Symbol;

    /// Observations in date order.
    fn points(&self) -> &[Observation];

    /// Number of observations.
    fn len(&self) -> usize {
        self.points().len()
    }

    /// Returns true if the path has no observations.
    fn is_empty(&self) -> bool {
        self.points().is_empty()
    }

    /// First observation date.
    fn start(&self) -> Option<Date> {
        self.points().first().map(|p| p.date)
    }

    /// Last observation date.
    fn end(&self) -> Option<Date> {
        self.points().last().map(|p| p.date)
    }
}

impl PricePath for PriceSeries {
    fn symbol(&self) -> &Symbol {
        PriceSeries::symbol(self)
    }

    fn points(&self) -> &[Observation] {
        PriceSeries::points(self)
    }
}
