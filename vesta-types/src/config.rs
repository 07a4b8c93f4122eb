//! Configuration types shared by the store, resolver, and aggregator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Ticker;

/// Currency assumed for tickers missing from the currency table.
pub const DEFAULT_CURRENCY: &str = "USD";

/// How the point resolver treats a stale prior reference point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum StalenessPolicy {
    /// Log the gap and substitute the next available price, whatever its size.
    #[default]
    Lenient,
    /// Log the gap and fail with `StaleData` if it exceeds `max_gap_days`.
    Strict {
        /// Largest tolerated gap in whole days.
        max_gap_days: u32,
    },
}

/// Configuration for a `PriceStore` and the queries running against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Currency used for tickers without an explicit entry in `currencies`.
    pub default_currency: String,
    /// Issuing-company currency per normalized ticker.
    pub currencies: BTreeMap<String, String>,
    /// Staleness handling for point resolution.
    pub staleness: StalenessPolicy,
}

impl StoreConfig {
    /// Currency code in which `ticker` is quoted.
    #[must_use]
    pub fn currency_of(&self, ticker: &Ticker) -> &str {
        self.currencies
            .get(ticker.as_str())
            .map_or(self.default_currency.as_str(), String::as_str)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        let currencies = [
            "adbe", "ntnx", "goog", "msft", "crm", "amzn", "meta", "tsla", "nvda", "aapl",
        ]
        .into_iter()
        .map(|t| (t.to_string(), DEFAULT_CURRENCY.to_string()))
        .collect();
        Self {
            default_currency: DEFAULT_CURRENCY.to_string(),
            currencies,
            staleness: StalenessPolicy::Lenient,
        }
    }
}
