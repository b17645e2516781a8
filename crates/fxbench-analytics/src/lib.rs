//! # fxbench Analytics
//!
//! Currency-normalized return and risk analytics.
//!
//! The pipeline takes raw daily close series, possibly quoted in different
//! currencies and traded on different calendars, and produces:
//!
//! - a USD-denominated, base-100 index per instrument,
//! - total return and annualized volatility per instrument,
//! - a pairwise return-correlation matrix,
//! - a ranked summary table.
//!
//! Every stage is a pure function over immutable inputs. I/O is confined to
//! a [`MarketDataSource`], queried once per request via [`MarketData::fetch`].
//!
//! ## Example
//!
//! ```rust
//! use fxbench_analytics::prelude::*;
//!
//! let d = |day| Date::from_ymd(2024, 1, day).unwrap();
//! let range = DateRange::new(d(1), d(31)).unwrap();
//! let request = AnalysisRequest::parse("A, B.IS", range).unwrap();
//!
//! let a = PriceSeries::from_pairs(
//!     Symbol::parse("A").unwrap(),
//!     Currency::USD,
//!     [(d(2), 100.0), (d(3), 110.0), (d(4), 121.0)],
//! )
//! .unwrap();
//! let b = PriceSeries::from_pairs(
//!     Symbol::parse("B.IS").unwrap(),
//!     Currency::TRY,
//!     [(d(2), 1000.0), (d(3), 1100.0)],
//! )
//! .unwrap();
//! let fx = FxRateSeries::from_pairs(
//!     CurrencyPair::usd_to(Currency::TRY),
//!     [(d(2), 10.0), (d(3), 11.0)],
//! )
//! .unwrap();
//!
//! let data = MarketData::new().with_prices(a).with_prices(b).with_fx(fx);
//! let report = AnalysisPipeline::default().run(&request, &data).unwrap();
//!
//! let best = report.summary.leader(Ranking::BestReturn).unwrap();
//! assert_eq!(best.as_str(), "A");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

pub mod calendar;
pub mod config;
pub mod convert;
pub mod correlation;
pub mod diagnostics;
pub mod normalize;
pub mod pipeline;
pub mod returns;
pub mod series;
pub mod source;
pub mod summary;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendar::{align, AlignedSet};
    pub use crate::config::{AlignmentPolicy, AnalysisConfig, SuffixRule};
    pub use crate::convert::{to_usd, UsdPriceSeries};
    pub use crate::correlation::{correlate, pearson, CorrelationMatrix};
    pub use crate::diagnostics::{Diagnostic, DiagnosticKind};
    pub use crate::normalize::{normalize, NormalizedRow, NormalizedSeries, NormalizedTable};
    pub use crate::pipeline::{AnalysisPipeline, AnalysisReport};
    pub use crate::returns::{summarize, InstrumentMetrics, ReturnSeries, SummaryRecord};
    pub use crate::series::PricePath;
    pub use crate::source::{InMemorySource, MarketData, MarketDataSource, SourceError};
    pub use crate::summary::{Ranking, SummaryRow, SummaryTable};
    pub use fxbench_core::prelude::*;
}

pub use calendar::{align, AlignedSet};
pub use config::{AlignmentPolicy, AnalysisConfig, SuffixRule};
pub use convert::{to_usd, UsdPriceSeries};
pub use correlation::{correlate, CorrelationMatrix};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use normalize::{normalize, NormalizedSeries, NormalizedTable};
pub use pipeline::{AnalysisPipeline, AnalysisReport};
pub use returns::{summarize, ReturnSeries, SummaryRecord};
pub use series::PricePath;
pub use source::{InMemorySource, MarketData, MarketDataSource, SourceError};
pub use summary::{Ranking, SummaryRow, SummaryTable};
