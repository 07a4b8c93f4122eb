use std::ops::RangeInclusive;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, ParseError};
use rust_decimal::Decimal;

/// One textual date encoding accepted in price histories.
///
/// Strategies are tried in [`DATE_PARSERS`] order and the first success wins.
pub trait DateParser: Sync {
    /// Short label used in diagnostics.
    fn name(&self) -> &'static str;

    /// Parse a trimmed date cell.
    ///
    /// # Errors
    /// Returns the underlying chrono error if `raw` is not in this encoding.
    fn parse(&self, raw: &str) -> Result<NaiveDate, ParseError>;
}

/// `MM/DD/YYYY`, as exported by most US brokerages (`12/24/2024`, `1/2/2024`).
#[derive(Debug, Clone, Copy)]
pub struct MonthDayYear;

impl DateParser for MonthDayYear {
    fn name(&self) -> &'static str {
        "mm/dd/yyyy"
    }

    fn parse(&self, raw: &str) -> Result<NaiveDate, ParseError> {
        NaiveDate::parse_from_str(raw, "%m/%d/%Y")
    }
}

/// ISO `YYYY-MM-DD`; a trailing time component is ignored.
#[derive(Debug, Clone, Copy)]
pub struct IsoDate;

impl DateParser for IsoDate {
    fn name(&self) -> &'static str {
        "yyyy-mm-dd"
    }

    fn parse(&self, raw: &str) -> Result<NaiveDate, ParseError> {
        let date_part = raw.split(['T', ' ']).next().unwrap_or(raw);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
    }
}

/// Named months: `25-Dec-2024`, `Dec 25, 2024`, `25 December 2024`.
#[derive(Debug, Clone, Copy)]
pub struct NamedMonth;

impl DateParser for NamedMonth {
    fn name(&self) -> &'static str {
        "named-month"
    }

    // %B accepts both full and abbreviated month names when parsing.
    fn parse(&self, raw: &str) -> Result<NaiveDate, ParseError> {
        NaiveDate::parse_from_str(raw, "%d-%B-%Y")
            .or_else(|_| NaiveDate::parse_from_str(raw, "%B %d, %Y"))
            .or_else(|_| NaiveDate::parse_from_str(raw, "%d %B %Y"))
    }
}

/// Years accepted from any strategy. chrono's `%Y` also takes one to three
/// digits, so `12/24/24` would otherwise parse as year 24.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1900..=9999;

/// Date strategies in priority order.
pub static DATE_PARSERS: &[&dyn DateParser] = &[&MonthDayYear, &IsoDate, &NamedMonth];

/// Parse a date cell with the first matching strategy in [`DATE_PARSERS`].
///
/// Returns `None` when no strategy accepts the value or the year falls
/// outside [`SUPPORTED_YEARS`] (two-digit years included).
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_PARSERS.iter().find_map(|p| {
        p.parse(raw)
            .ok()
            .filter(|d| SUPPORTED_YEARS.contains(&d.year()))
    })
}

const CURRENCY_SYMBOLS: [char; 4] = ['$', '£', '€', '₹'];

/// Parse a price cell, tolerating a currency symbol prefix and thousands separators.
///
/// `" $1,234.50 "` parses to `1234.50`. Returns `None` for anything else that
/// is not a plain decimal number.
#[must_use]
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim().trim_start_matches(CURRENCY_SYMBOLS).trim_start();
    let cleaned: String = trimmed.chars().filter(|&c| c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}
