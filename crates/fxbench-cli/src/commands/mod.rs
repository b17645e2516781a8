//! CLI command implementations.

pub mod compare;
pub mod config;

pub use compare::CompareArgs;
pub use config::ConfigArgs;

use fxbench_core::Date;

use crate::error::{CliError, CliResult};

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}
