//! vesta-core
//!
//! Core types, traits, and utilities shared across the vesta crates.
//!
//! - `types`: re-exported errors, configuration, and report envelopes.
//! - `source`: the `PriceSource` and `RateSource` collaborator traits.
//! - `timeseries`: per-ticker price series, row parsing, and trading-calendar math.
//!
//! Everything here is synchronous and free of I/O; concrete sources live in
//! their own crates (`vesta-csv`, `vesta-mock`).
#![warn(missing_docs)]

/// Price and currency-rate collaborator traits.
pub mod source;
/// Time-series construction, parsing, and calendar helpers.
pub mod timeseries;
pub mod types;

pub use source::{PreviousMonthRates, PriceSource, RateSource, RawPriceRow};
pub use timeseries::calendar::{
    DAY_MS, MonthBucket, date_to_ms, day_start_ms, display_day, last_trading_day_on_or_before,
    ms_to_date,
};
pub use timeseries::parse::{DATE_PARSERS, DateParser, SUPPORTED_YEARS, parse_date, parse_price};
pub use timeseries::series::{Neighbors, TimeSeries, TimedPrice};
pub use types::*;
