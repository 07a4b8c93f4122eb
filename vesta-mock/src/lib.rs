//! Mock price and rate sources for CI-safe tests and examples.
//!
//! [`MockSource`] serves static fixture histories (`goog`, `msft`, `nvda`)
//! plus any per-ticker behavior registered through its builder, and counts
//! every fetch so callers can assert on caching. [`FixedRates`] is a table
//! of currency rates keyed by month.

use std::collections::HashMap;
use std::sync::Mutex;

use vesta_core::{
    Decimal, MonthBucket, PriceSource, RateSource, RawPriceRow, Ticker, VestaError,
};

mod fixtures;

/// Instruction for how a fetch should behave for a given ticker.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return these rows.
    Rows(Vec<RawPriceRow>),
    /// Fail with the provided error.
    Fail(VestaError),
}

/// Deterministic in-memory [`PriceSource`].
#[derive(Debug)]
pub struct MockSource {
    rules: HashMap<Ticker, MockBehavior>,
    fixtures: bool,
    fetches: Mutex<HashMap<Ticker, usize>>,
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSource {
    /// Source serving only the built-in fixtures.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start building a source with custom behaviors.
    #[must_use]
    pub fn builder() -> MockSourceBuilder {
        MockSourceBuilder {
            rules: HashMap::new(),
            fixtures: true,
        }
    }

    /// Number of `fetch` calls made for `ticker` so far.
    #[must_use]
    pub fn fetch_count(&self, ticker: &str) -> usize {
        let Ok(key) = Ticker::new(ticker) else {
            return 0;
        };
        self.fetches
            .lock()
            .map_or(0, |f| f.get(&key).copied().unwrap_or(0))
    }
}

impl PriceSource for MockSource {
    fn name(&self) -> &'static str {
        "vesta-mock"
    }

    fn fetch(&self, ticker: &Ticker) -> Result<Vec<RawPriceRow>, VestaError> {
        if let Ok(mut fetches) = self.fetches.lock() {
            *fetches.entry(ticker.clone()).or_insert(0) += 1;
        }
        match self.rules.get(ticker) {
            Some(MockBehavior::Rows(rows)) => return Ok(rows.clone()),
            Some(MockBehavior::Fail(e)) => return Err(e.clone()),
            None => {}
        }
        if self.fixtures {
            if let Some(rows) = fixtures::history::by_symbol(ticker.as_str()) {
                return Ok(rows);
            }
        }
        Err(VestaError::not_found(format!("price history for {ticker}")))
    }
}

/// Builder for [`MockSource`].
#[derive(Debug)]
pub struct MockSourceBuilder {
    rules: HashMap<Ticker, MockBehavior>,
    fixtures: bool,
}

impl MockSourceBuilder {
    /// Serve `rows` (date, close) for `ticker`, numbered from line 2.
    ///
    /// # Panics
    /// Panics if `ticker` is empty.
    #[must_use]
    pub fn with_rows(mut self, ticker: &str, rows: &[(&str, &str)]) -> Self {
        let rows = rows
            .iter()
            .enumerate()
            .map(|(i, (date, close))| RawPriceRow::new(i + 2, *date, *close))
            .collect();
        self.rules.insert(key(ticker), MockBehavior::Rows(rows));
        self
    }

    /// Fail every fetch for `ticker` with `err`.
    ///
    /// # Panics
    /// Panics if `ticker` is empty.
    #[must_use]
    pub fn with_failure(mut self, ticker: &str, err: VestaError) -> Self {
        self.rules.insert(key(ticker), MockBehavior::Fail(err));
        self
    }

    /// Disable the built-in fixtures so only registered tickers resolve.
    #[must_use]
    pub const fn without_fixtures(mut self) -> Self {
        self.fixtures = false;
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> MockSource {
        MockSource {
            rules: self.rules,
            fixtures: self.fixtures,
            fetches: Mutex::new(HashMap::new()),
        }
    }
}

fn key(ticker: &str) -> Ticker {
    Ticker::new(ticker).expect("mock ticker must not be empty")
}

/// Table-driven [`RateSource`].
#[derive(Debug, Clone, Default)]
pub struct FixedRates {
    rates: HashMap<(String, MonthBucket), Decimal>,
    fallback: Option<Decimal>,
}

impl FixedRates {
    /// Empty table; every lookup fails until rates are added.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Same rate for every currency and month.
    #[must_use]
    pub fn flat(rate: Decimal) -> Self {
        Self {
            rates: HashMap::new(),
            fallback: Some(rate),
        }
    }

    /// Set the rate for `currency` in `year`-`month`.
    ///
    /// # Panics
    /// Panics if `month` is outside `1..=12`.
    #[must_use]
    pub fn with_rate(mut self, currency: &str, year: i32, month: u32, rate: Decimal) -> Self {
        let bucket = MonthBucket::new(year, month).expect("month must be in 1..=12");
        self.rates.insert((currency.to_uppercase(), bucket), rate);
        self
    }
}

impl RateSource for FixedRates {
    fn rate(&self, currency: &str, month: MonthBucket) -> Result<Decimal, VestaError> {
        self.rates
            .get(&(currency.to_uppercase(), month))
            .copied()
            .or(self.fallback)
            .ok_or_else(|| VestaError::not_found(format!("{currency} rate for {month}")))
    }
}
