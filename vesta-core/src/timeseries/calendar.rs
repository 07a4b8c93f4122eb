use core::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Milliseconds in one UTC day.
pub const DAY_MS: i64 = 86_400_000;

/// Floor an epoch-millisecond instant to UTC midnight of its day.
#[must_use]
pub const fn day_start_ms(ts_ms: i64) -> i64 {
    ts_ms.div_euclid(DAY_MS) * DAY_MS
}

/// Epoch milliseconds of UTC midnight on `date`.
#[must_use]
pub fn date_to_ms(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// UTC calendar date of an epoch-millisecond instant.
///
/// Returns `None` if the instant is outside chrono's representable range.
#[must_use]
pub fn ms_to_date(ts_ms: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(ts_ms).map(|dt| dt.date_naive())
}

/// Render an instant as `YYYY-MM-DD` for log and error messages.
#[must_use]
pub fn display_day(ts_ms: i64) -> String {
    ms_to_date(ts_ms).map_or_else(|| format!("{ts_ms}ms"), |d| d.to_string())
}

// Monday = 0 .. Sunday = 6; day 0 (1970-01-01) was a Thursday.
const fn weekday_index(day: i64) -> i64 {
    (day + 3).rem_euclid(7)
}

/// Most recent weekday at or before `ts_ms`, as epoch milliseconds at UTC midnight.
///
/// Saturdays and Sundays step back to the preceding Friday. Exchange holidays
/// are not modelled: they are only visible through gaps in the price data.
#[must_use]
pub const fn last_trading_day_on_or_before(ts_ms: i64) -> i64 {
    let day = ts_ms.div_euclid(DAY_MS);
    let back = match weekday_index(day) {
        5 => 1,
        6 => 2,
        _ => 0,
    };
    (day - back) * DAY_MS
}

/// Calendar month used to look up currency rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthBucket {
    /// Calendar year.
    pub year: i32,
    /// Month of the year, `1..=12`.
    pub month: u32,
}

impl MonthBucket {
    /// Build a bucket, rejecting months outside `1..=12`.
    #[must_use]
    pub const fn new(year: i32, month: u32) -> Option<Self> {
        if month >= 1 && month <= 12 {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// Month containing the UTC day of `ts_ms`.
    #[must_use]
    pub fn of(ts_ms: i64) -> Option<Self> {
        ms_to_date(ts_ms).map(|d| Self {
            year: d.year(),
            month: d.month(),
        })
    }

    /// The calendar month before this one.
    #[must_use]
    pub const fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }
}

impl fmt::Display for MonthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
