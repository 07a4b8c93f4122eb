use vesta_core::{
    DAY_MS, Decimal, Resolution, StalenessPolicy, Ticker, VestaError, display_day,
    last_trading_day_on_or_before,
};

use crate::store::PriceStore;

/// Resolves the economically valid price of a ticker at an instant.
///
/// Resolution rules, for the earliest point at or after the target (the
/// anchor) and the latest point strictly before it (the predecessor):
/// - an exact match returns its price unchecked;
/// - no anchor is `NoData`;
/// - an anchor without predecessor returns the anchor price unchecked;
/// - otherwise the predecessor is checked against the last trading day on or
///   before the target. A predecessor later than that day means the history
///   contradicts the calendar (`InvariantViolation`). A predecessor older than
///   that day is stale: the gap is logged and the anchor price substituted,
///   or rejected with `StaleData` under a strict policy.
#[derive(Debug, Clone, Copy)]
pub struct PointResolver<'a> {
    store: &'a PriceStore,
}

impl<'a> PointResolver<'a> {
    /// Resolver reading from `store`.
    #[must_use]
    pub const fn new(store: &'a PriceStore) -> Self {
        Self { store }
    }

    /// Store this resolver reads from.
    #[must_use]
    pub const fn store(&self) -> &'a PriceStore {
        self.store
    }

    /// Price of `ticker` at `target_ms`.
    ///
    /// # Errors
    /// See [`resolve_detailed`](Self::resolve_detailed).
    pub fn resolve(&self, ticker: &str, target_ms: i64) -> Result<Decimal, VestaError> {
        self.resolve_detailed(ticker, target_ms).map(|r| r.price)
    }

    /// Price of `ticker` at `target_ms` with the points that justified it.
    ///
    /// # Errors
    /// - Load errors from [`PriceStore::load`].
    /// - `NoData` if no point exists at or after `target_ms`.
    /// - `InvariantViolation` if the predecessor lies after the last trading day.
    /// - `StaleData` if a strict policy rejects the gap.
    pub fn resolve_detailed(&self, ticker: &str, target_ms: i64) -> Result<Resolution, VestaError> {
        let ticker = Ticker::new(ticker)?;
        let series = self.store.load_ticker(&ticker)?;
        let around = series.neighbors(target_ms);

        let Some(anchor) = around.anchor else {
            return Err(VestaError::no_data(format!(
                "{ticker} has no price on or after {}",
                display_day(target_ms)
            )));
        };
        let mut resolution = Resolution {
            ticker: ticker.clone(),
            target_ms,
            anchor_ms: anchor.timestamp_ms,
            price: anchor.price,
            predecessor_ms: around.predecessor.map(|p| p.timestamp_ms),
            gap_days: None,
        };
        if anchor.timestamp_ms == target_ms {
            return Ok(resolution);
        }
        let Some(predecessor) = around.predecessor else {
            tracing::debug!(
                ticker = %ticker,
                target = %display_day(target_ms),
                anchor = %display_day(anchor.timestamp_ms),
                "target precedes history; using earliest price"
            );
            return Ok(resolution);
        };

        let ltd = last_trading_day_on_or_before(target_ms);
        if predecessor.timestamp_ms > ltd {
            return Err(VestaError::InvariantViolation(format!(
                "{ticker}: price dated {} lies after the last trading day {} on or before {}",
                display_day(predecessor.timestamp_ms),
                display_day(ltd),
                display_day(target_ms)
            )));
        }

        let gap_days = (ltd - predecessor.timestamp_ms).div_euclid(DAY_MS);
        if gap_days > 0 {
            tracing::warn!(
                ticker = %ticker,
                gap_days,
                last_trading_day = %display_day(ltd),
                predecessor = %display_day(predecessor.timestamp_ms),
                anchor = %display_day(anchor.timestamp_ms),
                price = %anchor.price,
                "stale price data; substituting next available close"
            );
            resolution.gap_days = Some(gap_days);
            if let StalenessPolicy::Strict { max_gap_days } = self.store.config().staleness
                && gap_days > i64::from(max_gap_days)
            {
                return Err(VestaError::StaleData {
                    ticker: ticker.to_string(),
                    gap_days,
                    max_gap_days,
                });
            }
        }
        Ok(resolution)
    }
}
