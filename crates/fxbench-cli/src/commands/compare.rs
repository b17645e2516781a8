//! Compare command implementation.
//!
//! Loads daily closes for the requested symbols, converts foreign listings
//! to USD, and reports the normalized index, return, risk and correlation.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use fxbench_analytics::{
    AlignmentPolicy, AnalysisPipeline, AnalysisReport, CorrelationMatrix, MarketData, Ranking,
    SummaryRow,
};
use fxbench_core::{AnalysisRequest, DateRange};
use fxbench_ext_file::{export_normalized, export_summary, write_summary_csv, CsvMarketDataSource};
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use super::config::load_config;
use super::parse_date;
use crate::cli::{Context, OutputFormat};
use crate::output::{
    format_coefficient, format_pct, print_grid, print_header, print_json, print_output,
    print_success, print_warning,
};

/// Arguments for the compare command.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Comma-separated symbols, e.g. "AAPL, THYAO.IS"
    #[arg(short, long)]
    pub symbols: String,

    /// Start date (YYYY-MM-DD)
    #[arg(long, default_value = "2020-01-01")]
    pub start: String,

    /// End date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub end: Option<String>,

    /// Directory holding one <TICKER>.csv file per symbol and FX pair
    #[arg(short, long, env = "FXBENCH_DATA_DIR")]
    pub data_dir: PathBuf,

    /// Calendar alignment policy (overrides the config file)
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Rank the summary by return or by risk
    #[arg(long, value_enum, default_value = "return")]
    pub sort: SortArg,

    /// Write the summary table to this CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Write the normalized series to this CSV file
    #[arg(long)]
    pub normalized_export: Option<PathBuf>,

    /// Show the last N rows of the normalized series
    #[arg(long, value_name = "N")]
    pub show_normalized: Option<usize>,
}

/// Alignment policy argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Forward-fill each instrument from its own first date
    Independent,
    /// Keep only dates every instrument traded on
    Intersect,
}

impl From<PolicyArg> for AlignmentPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::Independent => AlignmentPolicy::Independent,
            PolicyArg::Intersect => AlignmentPolicy::Intersect,
        }
    }
}

/// Summary ordering argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// Total return, descending
    Return,
    /// Annualized volatility, ascending
    Risk,
}

impl From<SortArg> for Ranking {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Return => Ranking::BestReturn,
            SortArg::Risk => Ranking::LowestRisk,
        }
    }
}

/// Summary display row.
#[derive(Debug, Serialize, Tabled)]
struct SummaryDisplay {
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Total Return")]
    total_return: String,
    #[tabled(rename = "Annual Risk")]
    annual_risk: String,
    #[tabled(rename = "From")]
    start: String,
    #[tabled(rename = "To")]
    end: String,
    #[tabled(rename = "Days")]
    observations: usize,
    #[tabled(rename = "")]
    flags: String,
}

impl From<&SummaryRow> for SummaryDisplay {
    fn from(row: &SummaryRow) -> Self {
        let mut flags = Vec::new();
        if row.best_return {
            flags.push("best return");
        }
        if row.lowest_risk {
            flags.push("lowest risk");
        }
        Self {
            symbol: row.record.symbol.to_string(),
            total_return: format_pct(row.record.total_return_pct),
            annual_risk: format_pct(row.record.annualized_volatility_pct),
            start: row.record.start.to_string(),
            end: row.record.end.to_string(),
            observations: row.record.observations,
            flags: flags.join(", "),
        }
    }
}

/// Execute the compare command.
pub fn execute(args: CompareArgs, ctx: &Context) -> Result<()> {
    let start = parse_date(&args.start)?;
    let end = args.end.as_deref().map(parse_date).transpose()?;
    let range = DateRange::with_default_end(start, end)?;
    let request = AnalysisRequest::parse(&args.symbols, range)?;

    let mut config = load_config(ctx.config.as_deref())?;
    if let Some(policy) = args.policy {
        config = config.with_alignment(policy.into());
    }

    let source = CsvMarketDataSource::new(&args.data_dir)?;
    let data = MarketData::fetch(&source, &request, &config)?;
    let report = AnalysisPipeline::new(config)?.run(&request, &data)?;
    info!(
        instruments = report.summary.len(),
        diagnostics = report.diagnostics.len(),
        "comparison complete"
    );

    let ranking = Ranking::from(args.sort);
    match ctx.format {
        OutputFormat::Table => print_report(&report, ranking, args.show_normalized, ctx.quiet)?,
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Csv => write_summary_csv(std::io::stdout(), &report.summary, ranking)?,
        OutputFormat::Minimal => {
            for row in report.summary.rows(ranking) {
                println!(
                    "{} {:.2} {:.2}",
                    row.record.symbol,
                    row.record.total_return_pct,
                    row.record.annualized_volatility_pct
                );
            }
        }
    }

    if let Some(path) = &args.export {
        export_summary(path, &report.summary, ranking)?;
        if !ctx.quiet && ctx.format == OutputFormat::Table {
            print_success(&format!("Summary written to {}", path.display()));
        }
    }
    if let Some(path) = &args.normalized_export {
        export_normalized(path, &report.normalized_table())?;
        if !ctx.quiet && ctx.format == OutputFormat::Table {
            print_success(&format!("Normalized series written to {}", path.display()));
        }
    }

    Ok(())
}

fn print_report(
    report: &AnalysisReport,
    ranking: Ranking,
    show_normalized: Option<usize>,
    quiet: bool,
) -> Result<()> {
    let rows: Vec<SummaryDisplay> = report
        .summary
        .rows(ranking)
        .iter()
        .map(SummaryDisplay::from)
        .collect();

    if !quiet {
        print_header(&format!("Performance in USD ({})", report.request.range));
    }
    print_output(&rows, OutputFormat::Table)?;

    if report.correlation.len() > 1 {
        if !quiet {
            print_header("Return Correlation");
        }
        print_correlation(&report.correlation);
    }

    if let Some(n) = show_normalized.filter(|&n| n > 0) {
        if !quiet {
            print_header(&format!(
                "Normalized Index (base {})",
                report.normalized.first().map_or(100.0, |s| s.base())
            ));
        }
        let table = report.normalized_table();
        let mut header = vec!["Date".to_string()];
        header.extend(table.symbols.iter().map(ToString::to_string));
        let body = table
            .tail(n)
            .iter()
            .map(|row| {
                let mut cells = vec![row.date.to_string()];
                cells.extend(
                    row.values
                        .iter()
                        .map(|v| v.map(|x| format!("{x:.2}")).unwrap_or_default()),
                );
                cells
            })
            .collect();
        print_grid(header, body);
    }

    if !quiet {
        for diag in &report.diagnostics {
            print_warning(&diag.to_string());
        }
    }
    Ok(())
}

fn print_correlation(matrix: &CorrelationMatrix) {
    let mut header = vec![String::new()];
    header.extend(matrix.symbols().iter().map(ToString::to_string));
    let body = matrix
        .symbols()
        .iter()
        .enumerate()
        .map(|(i, symbol)| {
            let mut cells = vec![symbol.to_string()];
            cells.extend((0..matrix.len()).map(|j| format_coefficient(matrix.value(i, j))));
            cells
        })
        .collect();
    print_grid(header, body);
}
