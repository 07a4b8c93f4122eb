use rust_decimal::Decimal;

use crate::timeseries::calendar::MonthBucket;
use crate::{Ticker, VestaError};

/// One untyped row of a price history: the date cell and the close cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPriceRow {
    /// 1-based row number in the source, used in error messages.
    pub line: usize,
    /// Date cell as found in the source.
    pub date: String,
    /// Close-price cell as found in the source.
    pub close: String,
}

impl RawPriceRow {
    /// Build a row from its cells.
    pub fn new(line: usize, date: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            line,
            date: date.into(),
            close: close.into(),
        }
    }
}

/// A backing store of historical closing prices, one history per ticker.
///
/// Sources only locate and read rows; parsing, validation, and ordering are
/// applied by [`crate::TimeSeries::from_rows`]. Rows may come in any order.
pub trait PriceSource: Send + Sync {
    /// Stable name used in logs and `VestaError::Source`.
    fn name(&self) -> &'static str;

    /// Read every price row for `ticker`.
    ///
    /// # Errors
    /// - `VestaError::NotFound` if no history exists for the ticker.
    /// - `VestaError::Malformed` if the history lacks a date or close column.
    /// - `VestaError::Source` for I/O or decoding failures.
    fn fetch(&self, ticker: &Ticker) -> Result<Vec<RawPriceRow>, VestaError>;
}

/// Currency conversion multipliers by month.
///
/// Implementations are expected to be pure: the same inputs give the same rate.
/// Closures `Fn(&str, MonthBucket) -> Decimal` implement this trait directly.
pub trait RateSource {
    /// Multiplier converting one unit of `currency` into the reporting currency
    /// for prices dated in `month`.
    ///
    /// # Errors
    /// Returns `VestaError::NotFound` (or another error) if no rate is known.
    fn rate(&self, currency: &str, month: MonthBucket) -> Result<Decimal, VestaError>;
}

impl<F> RateSource for F
where
    F: Fn(&str, MonthBucket) -> Decimal,
{
    fn rate(&self, currency: &str, month: MonthBucket) -> Result<Decimal, VestaError> {
        Ok(self(currency, month))
    }
}

/// Looks every month up one month earlier in the wrapped source.
///
/// Matches reference-rate conventions where a price dated in March is
/// converted with February's published rate.
#[derive(Debug, Clone)]
pub struct PreviousMonthRates<R>(pub R);

impl<R: RateSource> RateSource for PreviousMonthRates<R> {
    fn rate(&self, currency: &str, month: MonthBucket) -> Result<Decimal, VestaError> {
        self.0.rate(currency, month.previous())
    }
}
