//! # fxbench Ext File
//!
//! File-based collaborators for the fxbench pipeline:
//! - CSV daily-close market data source (one file per ticker)
//! - CSV export of the summary and normalized-series tables

#![warn(missing_docs)]
#![warn(clippy::all)]

mod export;
mod market_data;

pub use export::*;
pub use market_data::*;
