//! Delimited-text export of report tables.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use fxbench_analytics::{NormalizedTable, Ranking, SourceError, SummaryTable};
use serde::Serialize;
use tracing::info;

/// Column layout of the summary export.
#[derive(Debug, Serialize)]
struct SummaryExportRow<'a> {
    symbol: &'a str,
    total_return_pct: f64,
    annualized_volatility_pct: f64,
    start: String,
    end: String,
    observations: usize,
    best_return: bool,
    lowest_risk: bool,
}

fn csv_error(e: impl std::fmt::Display) -> SourceError {
    SourceError::SerializationError(e.to_string())
}

/// Writes the summary table, one row per symbol in `ranking` order.
pub fn write_summary_csv<W: Write>(
    writer: W,
    summary: &SummaryTable,
    ranking: Ranking,
) -> Result<(), SourceError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in summary.rows(ranking) {
        wtr.serialize(SummaryExportRow {
            symbol: row.record.symbol.as_str(),
            total_return_pct: row.record.total_return_pct,
            annualized_volatility_pct: row.record.annualized_volatility_pct,
            start: row.record.start.to_string(),
            end: row.record.end.to_string(),
            observations: row.record.observations,
            best_return: row.best_return,
            lowest_risk: row.lowest_risk,
        })
        .map_err(csv_error)?;
    }
    if summary.is_empty() {
        wtr.write_record([
            "symbol",
            "total_return_pct",
            "annualized_volatility_pct",
            "start",
            "end",
            "observations",
            "best_return",
            "lowest_risk",
        ])
        .map_err(csv_error)?;
    }
    wtr.flush().map_err(|e| SourceError::IoError(e.to_string()))
}

/// Writes the normalized table: a `date` column then one column per symbol.
///
/// Cells where an instrument has no value are left empty.
pub fn write_normalized_csv<W: Write>(writer: W, table: &NormalizedTable) -> Result<(), SourceError> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(table.symbols.len() + 1);
    header.push("date".to_string());
    header.extend(table.symbols.iter().map(ToString::to_string));
    wtr.write_record(&header).map_err(csv_error)?;

    for row in &table.rows {
        let mut record = Vec::with_capacity(row.values.len() + 1);
        record.push(row.date.to_string());
        record.extend(
            row.values
                .iter()
                .map(|v| v.map(|x| format!("{x:.6}")).unwrap_or_default()),
        );
        wtr.write_record(&record).map_err(csv_error)?;
    }
    wtr.flush().map_err(|e| SourceError::IoError(e.to_string()))
}

fn create(path: &Path) -> Result<File, SourceError> {
    File::create(path).map_err(|e| SourceError::IoError(format!("{}: {e}", path.display())))
}

/// Writes the summary export to `path`.
pub fn export_summary(
    path: impl AsRef<Path>,
    summary: &SummaryTable,
    ranking: Ranking,
) -> Result<(), SourceError> {
    let path = path.as_ref();
    write_summary_csv(create(path)?, summary, ranking)?;
    info!(path = %path.display(), rows = summary.len(), "summary exported");
    Ok(())
}

/// Writes the normalized-series export to `path`.
pub fn export_normalized(path: impl AsRef<Path>, table: &NormalizedTable) -> Result<(), SourceError> {
    let path = path.as_ref();
    write_normalized_csv(create(path)?, table)?;
    info!(path = %path.display(), rows = table.rows.len(), "normalized series exported");
    Ok(())
}
