//! CLI error types.

use std::path::Path;

use fxbench_analytics::SourceError;
use fxbench_core::AnalysisError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Analysis failed.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// Market data could not be loaded or exported.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error on a file.
    #[error("IO error on {path}: {source}")]
    Io {
        /// File being accessed.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CliError {
    /// Creates an IO error for `path`.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
