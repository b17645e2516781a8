//! # fxbench Core
//!
//! Core types and the error model shared by the fxbench crates.
//!
//! - **Types**: `Date`, `Currency`, `CurrencyPair`, `Symbol`, `PriceSeries`,
//!   `FxRateSeries`, `DateRange`, `AnalysisRequest`
//! - **Errors**: [`AnalysisError`] with request-level and instrument-level kinds
//!
//! ## Example
//!
//! ```rust
//! use fxbench_core::prelude::*;
//!
//! let symbol = Symbol::parse("thyao.is").unwrap();
//! let series = PriceSeries::from_pairs(
//!     symbol,
//!     Currency::TRY,
//!     [(Date::from_ymd(2024, 1, 2).unwrap(), 262.0)],
//! )
//! .unwrap();
//! assert_eq!(series.symbol().as_str(), "THYAO.IS");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{AnalysisError, AnalysisResult};
    pub use crate::types::{
        AnalysisRequest, Currency, CurrencyPair, Date, DateRange, FxRateSeries, Observation,
        PriceSeries, Symbol,
    };
}

// Re-export commonly used types at crate root
pub use error::{AnalysisError, AnalysisResult};
pub use types::{
    AnalysisRequest, Currency, CurrencyPair, Date, DateRange, FxRateSeries, Observation,
    PriceSeries, Symbol,
};
