//! fxbench CLI - compare instruments on a common USD basis.
//!
//! # Usage
//!
//! ```bash
//! # Compare a US and an Istanbul listing from local CSV files
//! fxbench compare --symbols "AAPL, THYAO.IS" --data-dir ./data
//!
//! # Same comparison as JSON, from 2022 onward
//! fxbench --format json compare --symbols "AAPL, THYAO.IS" --start 2022-01-01 --data-dir ./data
//!
//! # Write the default configuration file
//! fxbench config init
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands, Context};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let ctx = Context {
        format: cli.format,
        quiet: cli.quiet,
        config: cli.config,
    };

    match cli.command {
        Commands::Compare(args) => commands::compare::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}

/// Logs go to stderr so that table, JSON and CSV output on stdout stays clean.
fn init_logging(verbose: bool, quiet: bool) {
    let fallback = if verbose {
        "fxbench=debug,fxbench_analytics=debug,fxbench_ext_file=debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
