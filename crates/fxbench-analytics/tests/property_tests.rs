//! Property-based tests for pipeline invariants.
//!
//! - Normalized series start exactly at the base index
//! - USD prices equal native price divided by the same-day rate
//! - Total return matches the last normalized value
//! - Volatility is never negative
//! - The correlation matrix is symmetric and bounded
//! - Return ranking is descending

use approx::assert_relative_eq;
use fxbench_analytics::prelude::*;
use proptest::prelude::*;

// =============================================================================
// GENERATORS
// =============================================================================

fn start() -> Date {
    Date::from_ymd(2022, 1, 3).unwrap()
}

fn range() -> DateRange {
    DateRange::new(start(), start().add_days(400)).unwrap()
}

/// Strictly increasing day offsets with positive values attached.
fn path(max_len: usize) -> impl Strategy<Value = Vec<(i64, f64)>> {
    prop::collection::vec((1i64..5, 0.5f64..500.0), 1..max_len).prop_map(|steps| {
        let mut day = 0;
        steps
            .into_iter()
            .map(|(gap, value)| {
                day += gap;
                (day, value)
            })
            .collect()
    })
}

fn series(symbol: &str, currency: Currency, points: &[(i64, f64)]) -> PriceSeries {
    PriceSeries::from_pairs(
        Symbol::parse(symbol).unwrap(),
        currency,
        points.iter().map(|&(day, v)| (start().add_days(day), v)),
    )
    .unwrap()
}

fn usd_book(paths: &[Vec<(i64, f64)>]) -> (AnalysisRequest, MarketData) {
    let mut data = MarketData::new();
    let mut names = Vec::new();
    for (i, points) in paths.iter().enumerate() {
        let name = format!("S{i}");
        data = data.with_prices(series(&name, Currency::USD, points));
        names.push(name);
    }
    let request = AnalysisRequest::parse(&names.join(","), range()).unwrap();
    (request, data)
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn normalized_starts_at_base(paths in prop::collection::vec(path(40), 1..5)) {
        let (request, data) = usd_book(&paths);
        let report = AnalysisPipeline::default().run(&request, &data).unwrap();
        for series in &report.normalized {
            prop_assert_eq!(series.points()[0].value, 100.0);
        }
    }

    #[test]
    fn usd_price_is_native_over_rate(
        points in path(40),
        rates in prop::collection::vec(1.0f64..60.0, 40),
    ) {
        let native = series("X.IS", Currency::TRY, &points);
        let fx = FxRateSeries::from_pairs(
            CurrencyPair::usd_to(Currency::TRY),
            points.iter().zip(&rates).map(|(&(day, _), &r)| (start().add_days(day), r)),
        )
        .unwrap();
        let usd = to_usd(&native, Some(&fx)).unwrap();
        prop_assert_eq!(usd.len(), native.len());
        for p in usd.points() {
            let expected = native.value_on(p.date).unwrap() / fx.rate_on(p.date).unwrap();
            assert_relative_eq!(p.value, expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn total_return_matches_normalized_tail(points in path(60)) {
        prop_assume!(points.len() >= 2);
        let usd = to_usd(&series("A", Currency::USD, &points), None).unwrap();
        let normalized = normalize(&usd, 100.0).unwrap();
        let metrics = summarize(&usd, &AnalysisConfig::default()).unwrap();
        let tail = normalized.last_value().unwrap();
        assert_relative_eq!(metrics.record.total_return_pct, tail - 100.0, epsilon = 1e-6, max_relative = 1e-9);
        prop_assert!(metrics.record.annualized_volatility_pct >= 0.0);
    }

    #[test]
    fn correlation_symmetric_and_bounded(paths in prop::collection::vec(path(30), 2..5)) {
        let (request, data) = usd_book(&paths);
        let report = AnalysisPipeline::default().run(&request, &data).unwrap();
        let m = &report.correlation;
        for i in 0..m.len() {
            for j in 0..m.len() {
                let (a, b) = (m.value(i, j), m.value(j, i));
                prop_assert!(a.is_nan() == b.is_nan());
                if !a.is_nan() {
                    prop_assert_eq!(a, b);
                    prop_assert!((-1.0..=1.0).contains(&a));
                }
            }
        }
    }

    #[test]
    fn return_ranking_is_descending(paths in prop::collection::vec(path(30), 1..6)) {
        let (request, data) = usd_book(&paths);
        let report = AnalysisPipeline::default().run(&request, &data).unwrap();
        let ranked = report.summary.by_return();
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].total_return_pct >= pair[1].total_return_pct);
        }
    }
}
