//! File-based market data source.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use fxbench_analytics::{MarketDataSource, SourceError};
use fxbench_core::{
    Currency, CurrencyPair, Date, DateRange, FxRateSeries, Observation, PriceSeries, Symbol,
};
use tracing::{debug, warn};

// =============================================================================
// CSV DAILY CLOSE SOURCE
// =============================================================================

/// Reads daily closes from a directory of `<TICKER>.csv` files.
///
/// Each file needs a `date` and a `close` column (header names are matched
/// case-insensitively; other columns are ignored). FX series are stored
/// under their FX ticker, e.g. `USDTRY=X.csv`.
///
/// Rows with an empty, unparseable or non-positive close are skipped, the
/// first row wins for a repeated date, and rows are sorted by date.
#[derive(Debug, Clone)]
pub struct CsvMarketDataSource {
    dir: PathBuf,
}

impl CsvMarketDataSource {
    /// Create a new CSV source over `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, SourceError> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.is_dir() {
            return Err(SourceError::NotFound(format!(
                "data directory {}",
                dir.display()
            )));
        }
        Ok(Self { dir })
    }

    /// The data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `ticker`.
    pub fn file_for(&self, ticker: &str) -> PathBuf {
        self.dir.join(format!("{ticker}.csv"))
    }

    /// Load all observations in `ticker`'s file, or `None` if there is no file.
    pub fn load(&self, ticker: &str) -> Result<Option<Vec<Observation>>, SourceError> {
        let path = self.file_for(ticker);
        if !path.exists() {
            debug!(%ticker, path = %path.display(), "no file for ticker");
            return Ok(None);
        }
        read_closes(&path).map(Some)
    }
}

impl MarketDataSource for CsvMarketDataSource {
    fn name(&self) -> &str {
        "csv"
    }

    fn price_history(
        &self,
        symbol: &Symbol,
        currency: Currency,
        range: &DateRange,
    ) -> Result<Option<PriceSeries>, SourceError> {
        let Some(points) = self.load(symbol.as_str())? else {
            return Ok(None);
        };
        let series = PriceSeries::new(symbol.clone(), currency, points)?;
        Ok(Some(series.restrict(range)))
    }

    fn fx_history(
        &self,
        pair: CurrencyPair,
        range: &DateRange,
    ) -> Result<Option<FxRateSeries>, SourceError> {
        let Some(points) = self.load(&pair.fx_ticker())? else {
            return Ok(None);
        };
        let series = FxRateSeries::new(pair, points)?;
        Ok(Some(series.restrict(range)))
    }
}

/// Reads a `date,close` file into sorted, de-duplicated observations.
pub fn read_closes(path: &Path) -> Result<Vec<Observation>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| SourceError::IoError(format!("{}: {e}", path.display())))?;

    let headers = reader
        .headers()
        .map_err(|e| SourceError::ParseError(format!("{}: {e}", path.display())))?
        .clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                SourceError::ParseError(format!("{}: missing '{name}' column", path.display()))
            })
    };
    let date_col = column("date")?;
    let close_col = column("close")?;

    let mut closes: BTreeMap<Date, f64> = BTreeMap::new();
    let mut skipped = 0usize;
    for (line, result) in reader.records().enumerate() {
        let record =
            result.map_err(|e| SourceError::ParseError(format!("{}: {e}", path.display())))?;

        let raw_date = record.get(date_col).unwrap_or_default();
        let date = Date::parse(raw_date.get(..10).unwrap_or(raw_date)).map_err(|e| {
            SourceError::ParseError(format!("{} row {}: {e}", path.display(), line + 2))
        })?;

        match record.get(close_col).and_then(|c| c.parse::<f64>().ok()) {
            Some(close) if close.is_finite() && close > 0.0 => {
                closes.entry(date).or_insert(close);
            }
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(path = %path.display(), skipped, "skipped rows without a usable close");
    }
    Ok(closes
        .into_iter()
        .map(|(date, close)| Observation::new(date, close))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn test_reads_yahoo_style_file() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "AAPL.csv",
            "Date,Open,High,Low,Close,Adj Close,Volume\n\
             2024-01-03,184.2,185.8,183.4,184.25,183.7,58414500\n\
             2024-01-02,187.1,188.4,183.8,185.64,185.0,82488700\n\
             2024-01-04,182.1,183.0,180.8,null,181.4,71983600\n",
        );
        let points = read_closes(&dir.path().join("AAPL.csv")).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, Date::from_ymd(2024, 1, 2).unwrap());
        assert_eq!(points[1].value, 184.25);
    }

    #[test]
    fn test_first_duplicate_wins_and_non_positive_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "X.csv",
            "date,close\n2024-01-02,10\n2024-01-02,11\n2024-01-03,0\n2024-01-04,\n2024-01-05,-1\n",
        );
        let points = read_closes(&dir.path().join("X.csv")).unwrap();
        assert_eq!(points, vec![Observation::new(Date::from_ymd(2024, 1, 2).unwrap(), 10.0)]);
    }

    #[test]
    fn test_timestamp_dates_are_truncated() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "USDTRY=X.csv",
            "Date,Close\n2024-01-02 00:00:00+00:00,29.71\n",
        );
        let points = read_closes(&dir.path().join("USDTRY=X.csv")).unwrap();
        assert_eq!(points[0].date, Date::from_ymd(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_missing_close_column() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "X.csv", "date,price\n2024-01-02,10\n");
        assert!(matches!(
            read_closes(&dir.path().join("X.csv")),
            Err(SourceError::ParseError(_))
        ));
    }

    #[test]
    fn test_bad_date_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "X.csv", "date,close\n02/01/2024,10\n");
        assert!(read_closes(&dir.path().join("X.csv")).is_err());
    }

    #[test]
    fn test_missing_directory() {
        assert!(matches!(
            CsvMarketDataSource::new("/definitely/not/here"),
            Err(SourceError::NotFound(_))
        ));
    }
}
