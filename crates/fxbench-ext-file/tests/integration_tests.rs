//! Integration tests: CSV files in, report and CSV exports out.

use std::fs;
use std::path::Path;

use approx::assert_relative_eq;
use fxbench_analytics::prelude::*;
use fxbench_ext_file::{
    export_normalized, export_summary, write_summary_csv, CsvMarketDataSource,
};

// =============================================================================
// FIXTURES
// =============================================================================

fn write(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).unwrap();
}

fn fixture_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "A.csv",
        "date,close\n2024-03-04,100\n2024-03-05,110\n2024-03-06,121\n",
    );
    write(
        dir.path(),
        "B.IS.csv",
        "Date,Close\n2024-03-04,1000\n2024-03-05,1100\n",
    );
    write(
        dir.path(),
        "USDTRY=X.csv",
        "Date,Close\n2024-03-04,10\n2024-03-05,11\n2024-03-06,11\n",
    );
    dir
}

fn request(symbols: &str) -> AnalysisRequest {
    let range = DateRange::new(
        Date::from_ymd(2024, 1, 1).unwrap(),
        Date::from_ymd(2024, 12, 31).unwrap(),
    )
    .unwrap();
    AnalysisRequest::parse(symbols, range).unwrap()
}

fn load_and_run(dir: &Path, symbols: &str) -> AnalysisResult<AnalysisReport> {
    let source = CsvMarketDataSource::new(dir).unwrap();
    let config = AnalysisConfig::default();
    let request = request(symbols);
    let data = MarketData::fetch(&source, &request, &config).unwrap();
    AnalysisPipeline::new(config)?.run(&request, &data)
}

// =============================================================================
// SOURCE
// =============================================================================

#[test]
fn fetch_tags_currency_by_suffix() {
    let dir = fixture_dir();
    let source = CsvMarketDataSource::new(dir.path()).unwrap();
    let data = MarketData::fetch(&source, &request("a, b.is"), &AnalysisConfig::default()).unwrap();

    let b = data.price(&Symbol::parse("B.IS").unwrap()).unwrap();
    assert_eq!(b.currency(), Currency::TRY);
    assert_eq!(data.fx(Currency::TRY).unwrap().len(), 3);
}

#[test]
fn range_restriction_applies_to_files() {
    let dir = fixture_dir();
    let source = CsvMarketDataSource::new(dir.path()).unwrap();
    let range = DateRange::new(
        Date::from_ymd(2024, 3, 5).unwrap(),
        Date::from_ymd(2024, 3, 5).unwrap(),
    )
    .unwrap();
    let series = source
        .price_history(&Symbol::parse("A").unwrap(), Currency::USD, &range)
        .unwrap()
        .unwrap();
    assert_eq!(series.len(), 1);
}

#[test]
fn unknown_ticker_is_none() {
    let dir = fixture_dir();
    let source = CsvMarketDataSource::new(dir.path()).unwrap();
    let range = request("X").range;
    assert!(source
        .price_history(&Symbol::parse("NOPE").unwrap(), Currency::USD, &range)
        .unwrap()
        .is_none());
}

// =============================================================================
// END TO END
// =============================================================================

#[test]
fn files_through_pipeline() {
    let dir = fixture_dir();
    let report = load_and_run(dir.path(), "A, B.IS").unwrap();

    let a = report.summary.get(&Symbol::parse("A").unwrap()).unwrap();
    assert_relative_eq!(a.total_return_pct, 21.0, epsilon = 1e-9);
    let b = report.summary.get(&Symbol::parse("B.IS").unwrap()).unwrap();
    assert_relative_eq!(b.total_return_pct, 0.0, epsilon = 1e-9);
}

#[test]
fn missing_fx_file_fails_request() {
    let dir = fixture_dir();
    fs::remove_file(dir.path().join("USDTRY=X.csv")).unwrap();
    let err = load_and_run(dir.path(), "A, B.IS").unwrap_err();
    assert!(matches!(err, AnalysisError::MissingFx { .. }));
}

#[test]
fn summary_export_has_header_and_one_row_per_symbol() {
    let dir = fixture_dir();
    let report = load_and_run(dir.path(), "B.IS, A").unwrap();
    let out = dir.path().join("summary.csv");
    export_summary(&out, &report.summary, Ranking::BestReturn).unwrap();

    let text = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "symbol,total_return_pct,annualized_volatility_pct,start,end,observations,best_return,lowest_risk"
    );
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("A,"));
    assert!(lines[1].ends_with(",true,false"));
}

#[test]
fn empty_summary_export_still_has_header() {
    let mut buf = Vec::new();
    write_summary_csv(&mut buf, &SummaryTable::new(Vec::new()), Ranking::BestReturn).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.starts_with("symbol,total_return_pct"));
    assert_eq!(text.lines().count(), 1);
}

#[test]
fn normalized_export_leaves_gaps_empty() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "A.csv", "date,close\n2024-03-04,100\n2024-03-05,110\n");
    write(dir.path(), "B.csv", "date,close\n2024-03-05,50\n2024-03-06,55\n");
    let report = load_and_run(dir.path(), "A, B").unwrap();
    let out = dir.path().join("normalized.csv");
    export_normalized(&out, &report.normalized_table()).unwrap();

    let text = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "date,A,B");
    assert_eq!(lines[1], "2024-03-04,100.000000,");
    assert_eq!(lines[3], "2024-03-06,110.000000,110.000000");
}
