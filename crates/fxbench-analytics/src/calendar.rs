//! Calendar alignment.
//!
//! Instruments listed on different venues trade on different calendars. The
//! aligner builds a working calendar from the instruments' own dates and
//! re-samples every price and FX series onto it, before any currency
//! conversion takes place.
//!
//! Under [`AlignmentPolicy::Independent`] each instrument is forward-filled
//! from its own first date; an instrument that starts later is simply
//! shorter and never truncates the others. Under
//! [`AlignmentPolicy::Intersect`] only dates every instrument traded on are
//! kept.

use std::collections::{BTreeMap, BTreeSet};

use fxbench_core::{Currency, Date, FxRateSeries, Observation, PriceSeries};
use tracing::{debug, warn};

use crate::config::AlignmentPolicy;
use crate::diagnostics::Diagnostic;

/// Date-consistent working set produced by [`align`].
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSet {
    /// Re-sampled price series, in input order. Excluded series are absent.
    pub series: Vec<PriceSeries>,
    /// Re-sampled FX series keyed by quote currency.
    pub fx: BTreeMap<Currency, FxRateSeries>,
    /// The working calendar.
    pub calendar: Vec<Date>,
    /// Instruments excluded during alignment.
    pub diagnostics: Vec<Diagnostic>,
}

impl AlignedSet {
    /// FX series for `currency`, if one was supplied.
    #[must_use]
    pub fn fx_for(&self, currency: Currency) -> Option<&FxRateSeries> {
        self.fx.get(&currency)
    }
}

/// Aligns price and FX series onto a common working calendar.
///
/// Series with no observations are excluded and reported as diagnostics.
/// FX series are sampled with the most recent rate on or before each
/// calendar date under `Independent`, and with the exact-date rate under
/// `Intersect`; calendar dates without a rate remain gaps.
#[must_use]
pub fn align(prices: &[PriceSeries], fx: &[FxRateSeries], policy: AlignmentPolicy) -> AlignedSet {
    let mut diagnostics = Vec::new();
    let mut usable: Vec<&PriceSeries> = Vec::with_capacity(prices.len());
    for series in prices {
        if series.is_empty() {
            warn!(symbol = %series.symbol(), "excluding series with no observations");
            diagnostics.push(Diagnostic::no_observations(
                series.symbol().clone(),
                "alignment",
            ));
        } else {
            usable.push(series);
        }
    }

    let calendar = match policy {
        AlignmentPolicy::Independent => union_calendar(&usable),
        AlignmentPolicy::Intersect => common_calendar(&usable),
    };
    debug!(
        policy = %policy,
        instruments = usable.len(),
        dates = calendar.len(),
        "built working calendar"
    );

    let mut series = Vec::with_capacity(usable.len());
    for raw in usable {
        let points = match policy {
            AlignmentPolicy::Independent => forward_fill(raw, &calendar),
            AlignmentPolicy::Intersect => calendar
                .iter()
                .filter_map(|&date| raw.value_on(date).map(|v| Observation::new(date, v)))
                .collect(),
        };
        if points.is_empty() {
            warn!(symbol = %raw.symbol(), "series emptied by alignment");
            diagnostics.push(Diagnostic::no_observations(raw.symbol().clone(), "alignment"));
            continue;
        }
        match PriceSeries::new(raw.symbol().clone(), raw.currency(), points) {
            Ok(aligned) => series.push(aligned),
            Err(err) => {
                warn!(symbol = %raw.symbol(), error = %err, "excluding series rejected after alignment");
                diagnostics.push(Diagnostic::no_observations(raw.symbol().clone(), "alignment"));
            }
        }
    }

    let fx = fx
        .iter()
        .filter_map(|rates| {
            let points: Vec<Observation> = calendar
                .iter()
                .filter_map(|&date| {
                    let rate = match policy {
                        AlignmentPolicy::Independent => rates.rate_as_of(date),
                        AlignmentPolicy::Intersect => rates.rate_on(date),
                    };
                    rate.map(|r| Observation::new(date, r))
                })
                .collect();
            FxRateSeries::new(rates.pair(), points)
                .ok()
                .map(|aligned| (rates.pair().quote, aligned))
        })
        .collect();

    AlignedSet {
        series,
        fx,
        calendar,
        diagnostics,
    }
}

fn union_calendar(series: &[&PriceSeries]) -> Vec<Date> {
    series
        .iter()
        .flat_map(|s| s.dates())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn common_calendar(series: &[&PriceSeries]) -> Vec<Date> {
    let Some((first, rest)) = series.split_first() else {
        return Vec::new();
    };
    first
        .dates()
        .filter(|&date| rest.iter().all(|s| s.value_on(date).is_some()))
        .collect()
}

fn forward_fill(series: &PriceSeries, calendar: &[Date]) -> Vec<Observation> {
    calendar
        .iter()
        .filter_map(|&date| series.value_as_of(date).map(|v| Observation::new(date, v)))
        .collect()
}
