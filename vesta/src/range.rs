use serde_json::json;
use vesta_core::{
    ConvertedPrice, MonthBucket, PeakReport, RateSource, Ticker, TimedPrice, VestaError,
    display_day,
};

use crate::store::PriceStore;

/// Interval queries over cached price histories.
///
/// All windows are closed: both `start_ms` and `end_ms` are included.
#[derive(Debug, Clone, Copy)]
pub struct RangeAggregator<'a> {
    store: &'a PriceStore,
}

impl<'a> RangeAggregator<'a> {
    /// Aggregator reading from `store`.
    #[must_use]
    pub const fn new(store: &'a PriceStore) -> Self {
        Self { store }
    }

    /// Latest point of `ticker` dated at or before `end_ms`.
    ///
    /// # Errors
    /// Load errors from [`PriceStore::load`], or `NoData` if every point is
    /// after `end_ms`.
    pub fn latest_on_or_before(&self, ticker: &str, end_ms: i64) -> Result<TimedPrice, VestaError> {
        let ticker = Ticker::new(ticker)?;
        let series = self.store.load_ticker(&ticker)?;
        series.latest_on_or_before(end_ms).copied().ok_or_else(|| {
            VestaError::no_data(format!(
                "{ticker} has no price on or before {}",
                display_day(end_ms)
            ))
        })
    }

    /// Highest close of `ticker` within `[start_ms, end_ms]`, earliest on ties.
    ///
    /// # Errors
    /// - `InvalidRange` if `start_ms > end_ms`.
    /// - Load errors from [`PriceStore::load`].
    /// - `NoData` if the window holds no point.
    pub fn peak_in_source_currency(
        &self,
        ticker: &str,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<TimedPrice, VestaError> {
        check_range(start_ms, end_ms)?;
        let ticker = Ticker::new(ticker)?;
        let series = self.store.load_ticker(&ticker)?;
        let window = series.window(start_ms, end_ms);
        let peak = first_max_by_key(window, |p| p.price)
            .copied()
            .ok_or_else(|| empty_window(&ticker, start_ms, end_ms))?;
        tracing::debug!(
            ticker = %ticker,
            days = window.len(),
            peak_day = %display_day(peak.timestamp_ms),
            price = %peak.price,
            "source-currency peak"
        );
        Ok(peak)
    }

    /// Day within `[start_ms, end_ms]` whose close is highest after conversion.
    ///
    /// Each close is multiplied by the rate `rates` gives for the ticker's
    /// currency and the month of that day. The returned report carries the
    /// winning day (earliest on ties) and every candidate in date order.
    ///
    /// # Errors
    /// - `InvalidRange` if `start_ms > end_ms`.
    /// - Load errors from [`PriceStore::load`].
    /// - `NoData` if the window holds no point.
    /// - Any error returned by `rates`, unchanged.
    /// - `InvalidArg` if a converted value overflows `Decimal`.
    pub fn peak_in_converted_currency<R>(
        &self,
        ticker: &str,
        start_ms: i64,
        end_ms: i64,
        rates: &R,
    ) -> Result<PeakReport, VestaError>
    where
        R: RateSource + ?Sized,
    {
        check_range(start_ms, end_ms)?;
        let ticker = Ticker::new(ticker)?;
        let series = self.store.load_ticker(&ticker)?;
        let currency = self.store.currency_of(&ticker).to_string();

        let candidates = series
            .window(start_ms, end_ms)
            .iter()
            .map(|p| -> Result<ConvertedPrice, VestaError> {
                let month = MonthBucket::of(p.timestamp_ms).ok_or_else(|| {
                    VestaError::InvalidArg(format!(
                        "timestamp {} is outside the calendar range",
                        p.timestamp_ms
                    ))
                })?;
                let rate = rates.rate(&currency, month)?;
                let converted = p.price.checked_mul(rate).ok_or_else(|| {
                    VestaError::InvalidArg(format!(
                        "{ticker}: converted value of {} x {rate} on {} overflows",
                        p.price,
                        display_day(p.timestamp_ms)
                    ))
                })?;
                Ok(ConvertedPrice {
                    timestamp_ms: p.timestamp_ms,
                    fmv: p.price,
                    rate,
                    converted,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let peak = first_max_by_key(&candidates, |c| c.converted)
            .copied()
            .ok_or_else(|| empty_window(&ticker, start_ms, end_ms))?;

        if tracing::enabled!(tracing::Level::DEBUG) {
            let breakdown: Vec<_> = candidates
                .iter()
                .map(|c| {
                    json!({
                        "date": display_day(c.timestamp_ms),
                        "fmv": c.fmv,
                        "rate": c.rate,
                        "converted": c.converted,
                    })
                })
                .collect();
            tracing::debug!(
                ticker = %ticker,
                currency = %currency,
                breakdown = %json!(breakdown),
                "converted peak candidates"
            );
        }
        tracing::info!(
            ticker = %ticker,
            currency = %currency,
            peak_day = %display_day(peak.timestamp_ms),
            fmv = %peak.fmv,
            rate = %peak.rate,
            converted = %peak.converted,
            "converted-currency peak"
        );

        Ok(PeakReport {
            ticker,
            currency,
            start_ms,
            end_ms,
            peak,
            candidates,
        })
    }
}

fn check_range(start_ms: i64, end_ms: i64) -> Result<(), VestaError> {
    if start_ms > end_ms {
        Err(VestaError::InvalidRange { start_ms, end_ms })
    } else {
        Ok(())
    }
}

fn empty_window(ticker: &Ticker, start_ms: i64, end_ms: i64) -> VestaError {
    VestaError::no_data(format!(
        "{ticker} has no price between {} and {}",
        display_day(start_ms),
        display_day(end_ms)
    ))
}

// `Iterator::max_by_key` keeps the last of equal maxima; the earliest must win.
fn first_max_by_key<T, K, F>(items: &[T], key: F) -> Option<&T>
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    items.iter().fold(None, |best: Option<&T>, item| match best {
        Some(b) if key(item) <= key(b) => Some(b),
        _ => Some(item),
    })
}
