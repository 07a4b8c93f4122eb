use std::collections::{BTreeMap, btree_map::Entry};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calendar::{date_to_ms, display_day, ms_to_date};
use super::parse::{DATE_PARSERS, parse_date, parse_price};
use crate::source::RawPriceRow;
use crate::{Ticker, VestaError};

/// Closing price of one trading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedPrice {
    /// Trading day as epoch milliseconds at UTC midnight.
    pub timestamp_ms: i64,
    /// Closing price in the ticker's currency; always positive.
    pub price: Decimal,
}

impl TimedPrice {
    /// UTC calendar date of this point.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        ms_to_date(self.timestamp_ms)
    }
}

/// The points bracketing a target instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors<'a> {
    /// Latest point strictly before the target.
    pub predecessor: Option<&'a TimedPrice>,
    /// Earliest point at or after the target.
    pub anchor: Option<&'a TimedPrice>,
}

/// Price history of a single ticker.
///
/// Invariants: points are strictly increasing by `timestamp_ms` and every
/// price is positive. A series is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSeries {
    ticker: Ticker,
    points: Vec<TimedPrice>,
}

impl TimeSeries {
    /// Build a series from points in any order.
    ///
    /// - Points are returned sorted by timestamp.
    /// - Repeated timestamps with the same price collapse into one point.
    ///
    /// # Errors
    /// Returns `Err(VestaError::Malformed)` if a price is not positive or if two
    /// points share a timestamp but disagree on the price.
    pub fn from_points<I>(ticker: Ticker, points: I) -> Result<Self, VestaError>
    where
        I: IntoIterator<Item = TimedPrice>,
    {
        let mut by_ts: BTreeMap<i64, Decimal> = BTreeMap::new();
        for p in points {
            if p.price <= Decimal::ZERO {
                return Err(VestaError::malformed(
                    ticker.as_str(),
                    format!(
                        "non-positive close {} on {}",
                        p.price,
                        display_day(p.timestamp_ms)
                    ),
                ));
            }
            match by_ts.entry(p.timestamp_ms) {
                Entry::Vacant(v) => {
                    v.insert(p.price);
                }
                Entry::Occupied(o) => {
                    if *o.get() != p.price {
                        return Err(VestaError::malformed(
                            ticker.as_str(),
                            format!(
                                "conflicting closes {} and {} on {}",
                                o.get(),
                                p.price,
                                display_day(p.timestamp_ms)
                            ),
                        ));
                    }
                }
            }
        }
        let points = by_ts
            .into_iter()
            .map(|(timestamp_ms, price)| TimedPrice {
                timestamp_ms,
                price,
            })
            .collect();
        Ok(Self { ticker, points })
    }

    /// Parse raw source rows into a series.
    ///
    /// Dates are tried against every strategy in [`DATE_PARSERS`]; prices may
    /// carry a currency symbol and thousands separators. The first bad row
    /// aborts the whole load.
    ///
    /// # Errors
    /// Returns `Err(VestaError::Malformed)` naming the offending row if a date or
    /// price cannot be parsed, plus the conditions listed on [`Self::from_points`].
    pub fn from_rows<I>(ticker: Ticker, rows: I) -> Result<Self, VestaError>
    where
        I: IntoIterator<Item = RawPriceRow>,
    {
        let mut points = Vec::new();
        for row in rows {
            let Some(date) = parse_date(&row.date) else {
                let tried: Vec<&str> = DATE_PARSERS.iter().map(|p| p.name()).collect();
                return Err(VestaError::malformed(
                    ticker.as_str(),
                    format!(
                        "row {}: unable to parse date '{}' (tried {})",
                        row.line,
                        row.date,
                        tried.join(", ")
                    ),
                ));
            };
            let Some(price) = parse_price(&row.close) else {
                return Err(VestaError::malformed(
                    ticker.as_str(),
                    format!(
                        "row {}: unable to parse close value '{}' for date {}",
                        row.line, row.close, row.date
                    ),
                ));
            };
            points.push(TimedPrice {
                timestamp_ms: date_to_ms(date),
                price,
            });
        }
        Self::from_points(ticker, points)
    }

    /// Ticker this history belongs to.
    #[must_use]
    pub const fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// All points in ascending timestamp order.
    #[must_use]
    pub fn points(&self) -> &[TimedPrice] {
        &self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the history has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Latest point strictly before `target_ms` and earliest point at or after it.
    #[must_use]
    pub fn neighbors(&self, target_ms: i64) -> Neighbors<'_> {
        let idx = self.points.partition_point(|p| p.timestamp_ms < target_ms);
        Neighbors {
            predecessor: idx.checked_sub(1).and_then(|i| self.points.get(i)),
            anchor: self.points.get(idx),
        }
    }

    /// Point with the greatest timestamp `<= end_ms`.
    #[must_use]
    pub fn latest_on_or_before(&self, end_ms: i64) -> Option<&TimedPrice> {
        let idx = self.points.partition_point(|p| p.timestamp_ms <= end_ms);
        idx.checked_sub(1).and_then(|i| self.points.get(i))
    }

    /// Points with `start_ms <= timestamp_ms <= end_ms`, ascending.
    ///
    /// Empty when `start_ms > end_ms`.
    #[must_use]
    pub fn window(&self, start_ms: i64, end_ms: i64) -> &[TimedPrice] {
        if start_ms > end_ms {
            return &[];
        }
        let lo = self.points.partition_point(|p| p.timestamp_ms < start_ms);
        let hi = self.points.partition_point(|p| p.timestamp_ms <= end_ms);
        &self.points[lo..hi]
    }
}
