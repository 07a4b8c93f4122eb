//! Valuation of equity vesting events.
//!
//! A brokerage export reduces to an ordered list of [`VestingRecord`]s. Only
//! completed share releases are valued: each becomes a [`Purchase`] priced at
//! the fair market value the [`PointResolver`] finds for its vest date.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use vesta_core::{Decimal, Ticker, VestaError, date_to_ms, parse_date};

use crate::resolver::PointResolver;

/// One row of a vesting statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingRecord {
    /// Vest date as exported (`25-Dec-2024`, `12/25/2024`, `2024-12-25`).
    pub date: String,
    /// Transaction type, e.g. `Released Shares`.
    pub kind: String,
    /// Order status, e.g. `Completed`. Absent when the export has no status column.
    pub status: Option<String>,
    /// Number of shares released.
    pub quantity: Decimal,
    /// Symbol column, when present.
    pub ticker: Option<String>,
}

impl VestingRecord {
    /// True for share releases whose status is absent or completed.
    #[must_use]
    pub fn is_completed_release(&self) -> bool {
        self.kind.to_lowercase().contains("release")
            && self
                .status
                .as_deref()
                .is_none_or(|s| s.to_lowercase().contains("complete"))
    }
}

/// An amount in a named currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in `currency`.
    pub amount: Decimal,
    /// ISO currency code.
    pub currency: String,
}

/// A valued vesting event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    /// Vest date.
    pub date: NaiveDate,
    /// Vest date as epoch milliseconds at UTC midnight.
    pub timestamp_ms: i64,
    /// Normalized ticker.
    pub ticker: Ticker,
    /// Shares released.
    pub quantity: Decimal,
    /// Fair market value per share on the vest date.
    pub fmv: Price,
}

/// Value every completed release in `records`.
///
/// The ticker is `ticker_override` when given, else the first non-blank
/// record ticker. Records with a blank date are skipped.
///
/// # Errors
/// - `InvalidArg` if no ticker can be determined.
/// - `Malformed` if a kept record's date matches no known format.
/// - Any error from [`PointResolver::resolve`].
pub fn value_vestings(
    resolver: &PointResolver<'_>,
    records: &[VestingRecord],
    ticker_override: Option<&str>,
) -> Result<Vec<Purchase>, VestaError> {
    let ticker = determine_ticker(records, ticker_override)?;
    let currency = resolver.store().currency_of(&ticker).to_string();

    let mut purchases = Vec::new();
    for (idx, record) in records.iter().enumerate() {
        if !record.is_completed_release() || record.date.trim().is_empty() {
            continue;
        }
        let date = parse_date(&record.date).ok_or_else(|| {
            VestaError::malformed(
                ticker.as_str(),
                format!("vesting record {}: unable to parse date '{}'", idx + 1, record.date),
            )
        })?;
        let timestamp_ms = date_to_ms(date);
        let amount = resolver.resolve(ticker.as_str(), timestamp_ms)?;
        purchases.push(Purchase {
            date,
            timestamp_ms,
            ticker: ticker.clone(),
            quantity: record.quantity,
            fmv: Price {
                amount,
                currency: currency.clone(),
            },
        });
    }
    tracing::debug!(
        ticker = %ticker,
        records = records.len(),
        purchases = purchases.len(),
        "valued vesting records"
    );
    Ok(purchases)
}

fn determine_ticker(
    records: &[VestingRecord],
    ticker_override: Option<&str>,
) -> Result<Ticker, VestaError> {
    if let Some(t) = ticker_override.filter(|t| !t.trim().is_empty()) {
        return Ticker::new(t);
    }
    records
        .iter()
        .filter_map(|r| r.ticker.as_deref())
        .find(|t| !t.trim().is_empty())
        .map(Ticker::new)
        .unwrap_or_else(|| {
            Err(VestaError::InvalidArg(
                "ticker not found: pass an override or include a symbol on the records"
                    .to_string(),
            ))
        })
}

/// Parse a quantity cell, stripping `,`, `$` and `£`.
///
/// Blank or unparseable values yield zero.
#[must_use]
pub fn parse_quantity(raw: &str) -> Decimal {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | '£'))
        .collect();
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .unwrap_or(Decimal::ZERO)
}
