//! Vesta resolves the fair market value (FMV) of a ticker at a point in time
//! from historical closing prices.
//!
//! Overview
//! - [`PriceStore`] loads each ticker's history from a [`PriceSource`] once and
//!   caches it for the store's lifetime.
//! - [`PointResolver`] returns the price valid at an instant, substituting the
//!   next available close when the instant has no data and logging stale gaps.
//! - [`RangeAggregator`] answers interval queries: latest close before a cutoff
//!   and the peak close, optionally converted through a [`RateSource`].
//! - [`vesting`] values completed share releases at their vest-date FMV.
//!
//! Key behaviors and trade-offs
//! - Loading: the whole history is parsed up front; one bad row fails the load
//!   and nothing is cached, so the next call retries.
//! - Missing days: the next available close is used. A gap between the last
//!   trading day and the prior close is logged at `warn` and tolerated under
//!   [`StalenessPolicy::Lenient`]; [`StalenessPolicy::Strict`] turns large gaps
//!   into `StaleData` errors.
//! - Trading calendar: weekends only. Exchange holidays show up as gaps.
//! - Peaks: ties go to the earliest day.
//!
//! Examples
//! Resolving an FMV and a converted peak:
//! ```rust,ignore
//! use std::sync::Arc;
//! use vesta::{MonthBucket, PriceStore};
//! use vesta_csv::CsvPriceSource;
//!
//! let store = PriceStore::builder()
//!     .with_source(Arc::new(CsvPriceSource::new("historic_data/shares")))
//!     .build()?;
//!
//! let fmv = store.resolver().resolve("GOOG", ts_ms)?;
//! let report = store.ranges().peak_in_converted_currency(
//!     "GOOG",
//!     start_ms,
//!     end_ms,
//!     &|_currency: &str, _month: MonthBucket| inr_per_usd,
//! )?;
//! println!("peak {} on {}", report.peak.converted, report.peak.timestamp_ms);
//! ```
//!
//! See `vesta/examples/` for runnable demonstrations.
#![warn(missing_docs)]

mod range;
mod resolver;
mod store;
pub mod vesting;

pub use range::RangeAggregator;
pub use resolver::PointResolver;
pub use store::{PriceStore, PriceStoreBuilder};
pub use vesting::{Price, Purchase, VestingRecord, parse_quantity, value_vestings};

// Re-export core types for convenience
pub use vesta_core::{
    ConvertedPrice, DAY_MS, DEFAULT_CURRENCY, Decimal, MonthBucket, PeakReport,
    PreviousMonthRates, PriceSource, RateSource, RawPriceRow, Resolution, StalenessPolicy,
    StoreConfig, Ticker, TimeSeries, TimedPrice, VestaError, date_to_ms,
    last_trading_day_on_or_before,
};
