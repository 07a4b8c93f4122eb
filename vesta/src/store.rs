use std::fmt;
use std::sync::Arc;

use moka::sync::Cache;
use vesta_core::{PriceSource, StalenessPolicy, StoreConfig, Ticker, TimeSeries, VestaError};

use crate::range::RangeAggregator;
use crate::resolver::PointResolver;

/// Per-ticker cache of price histories loaded from a single [`PriceSource`].
///
/// Each ticker is read from the source at most once per store: the first
/// successful [`load`](Self::load) parses and caches the series, later calls
/// return the same `Arc`. Failed loads leave nothing behind, so the next call
/// retries the source. Cached series are never refreshed.
pub struct PriceStore {
    source: Arc<dyn PriceSource>,
    cache: Cache<Ticker, Arc<TimeSeries>>,
    cfg: StoreConfig,
}

impl fmt::Debug for PriceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriceStore")
            .field("source", &self.source.name())
            .field("loaded", &self.cache.entry_count())
            .field("cfg", &self.cfg)
            .finish()
    }
}

impl PriceStore {
    /// Start building a store.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use vesta::{PriceStore, StalenessPolicy};
    /// use vesta_csv::CsvPriceSource;
    ///
    /// let store = PriceStore::builder()
    ///     .with_source(Arc::new(CsvPriceSource::new("historic_data/shares")))
    ///     .currency("ntnx", "USD")
    ///     .staleness(StalenessPolicy::Strict { max_gap_days: 5 })
    ///     .build()?;
    /// let fmv = store.resolver().resolve("NTNX", ts_ms)?;
    /// ```
    #[must_use]
    pub fn builder() -> PriceStoreBuilder {
        PriceStoreBuilder::new()
    }

    /// Load (or fetch from cache) the history of `ticker`.
    ///
    /// # Errors
    /// - `InvalidArg` if `ticker` is blank.
    /// - Any error from the source (`NotFound`, `Malformed`, `Source`).
    /// - `Malformed` if a row cannot be parsed.
    pub fn load(&self, ticker: &str) -> Result<Arc<TimeSeries>, VestaError> {
        let ticker = Ticker::new(ticker)?;
        self.load_ticker(&ticker)
    }

    /// Same as [`load`](Self::load) for an already-normalized ticker.
    ///
    /// # Errors
    /// See [`load`](Self::load).
    pub fn load_ticker(&self, ticker: &Ticker) -> Result<Arc<TimeSeries>, VestaError> {
        self.cache
            .try_get_with(ticker.clone(), || self.read_series(ticker))
            .map_err(Arc::unwrap_or_clone)
    }

    fn read_series(&self, ticker: &Ticker) -> Result<Arc<TimeSeries>, VestaError> {
        let rows = self.source.fetch(ticker)?;
        let series = TimeSeries::from_rows(ticker.clone(), rows)?;
        tracing::info!(
            ticker = %ticker,
            source = self.source.name(),
            points = series.len(),
            "loaded price history"
        );
        Ok(Arc::new(series))
    }

    /// True if `ticker` has been loaded successfully.
    #[must_use]
    pub fn is_loaded(&self, ticker: &str) -> bool {
        Ticker::new(ticker).is_ok_and(|t| self.cache.contains_key(&t))
    }

    /// Currency the prices of `ticker` are quoted in.
    #[must_use]
    pub fn currency_of(&self, ticker: &Ticker) -> &str {
        self.cfg.currency_of(ticker)
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.cfg
    }

    /// Name of the backing price source.
    #[must_use]
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Point-in-time resolver over this store.
    #[must_use]
    pub const fn resolver(&self) -> PointResolver<'_> {
        PointResolver::new(self)
    }

    /// Range queries over this store.
    #[must_use]
    pub const fn ranges(&self) -> RangeAggregator<'_> {
        RangeAggregator::new(self)
    }
}

/// Builder for [`PriceStore`].
pub struct PriceStoreBuilder {
    source: Option<Arc<dyn PriceSource>>,
    cfg: StoreConfig,
}

impl Default for PriceStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PriceStoreBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriceStoreBuilder")
            .field("source", &self.source.as_ref().map(|s| s.name()))
            .field("cfg", &self.cfg)
            .finish()
    }
}

impl PriceStoreBuilder {
    /// Builder with no source and the default configuration.
    ///
    /// Defaults: `USD` for every ticker and lenient staleness handling.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            cfg: StoreConfig::default(),
        }
    }

    /// Set the price source. A later call replaces an earlier one.
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn PriceSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Declare the currency `ticker` is quoted in.
    #[must_use]
    pub fn currency(mut self, ticker: &str, code: &str) -> Self {
        self.cfg
            .currencies
            .insert(ticker.trim().to_lowercase(), code.trim().to_uppercase());
        self
    }

    /// Currency for tickers without an explicit entry.
    #[must_use]
    pub fn default_currency(mut self, code: &str) -> Self {
        self.cfg.default_currency = code.trim().to_uppercase();
        self
    }

    /// Staleness handling for point resolution.
    #[must_use]
    pub const fn staleness(mut self, policy: StalenessPolicy) -> Self {
        self.cfg.staleness = policy;
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: StoreConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the store.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no source was set, the default currency is
    /// blank, or the currency table holds a blank ticker or code.
    pub fn build(self) -> Result<PriceStore, VestaError> {
        let Some(source) = self.source else {
            return Err(VestaError::InvalidArg(
                "no price source configured; add one via with_source(...)".to_string(),
            ));
        };
        if self.cfg.default_currency.trim().is_empty() {
            return Err(VestaError::InvalidArg(
                "default currency must not be empty".to_string(),
            ));
        }
        if let Some((ticker, code)) = self
            .cfg
            .currencies
            .iter()
            .find(|(t, c)| t.trim().is_empty() || c.trim().is_empty())
        {
            return Err(VestaError::InvalidArg(format!(
                "invalid currency entry '{ticker}' -> '{code}'"
            )));
        }
        Ok(PriceStore {
            source,
            cache: Cache::builder().build(),
            cfg: self.cfg,
        })
    }
}
