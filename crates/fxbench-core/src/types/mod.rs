//! Domain types for USD-normalized comparison.
//!
//! - [`Date`]: Calendar date of a daily close
//! - [`Currency`]: ISO currency codes
//! - [`CurrencyPair`]: USD-based FX pair
//! - [`Symbol`]: Normalized instrument ticker
//! - [`PriceSeries`]: Native-currency close prices
//! - [`FxRateSeries`]: Daily FX rates
//! - [`AnalysisRequest`]: Symbols plus date range

mod currency;
mod date;
mod request;
mod series;
mod symbol;

pub use currency::{Currency, CurrencyPair};
pub use date::Date;
pub use request::{AnalysisRequest, DateRange};
pub use series::{FxRateSeries, Observation, PriceSeries};
pub use symbol::Symbol;
