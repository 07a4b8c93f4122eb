//! Report envelopes produced by the resolver and range aggregator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Ticker;

/// One day's price expressed in a converted currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertedPrice {
    /// Trading day (epoch milliseconds, UTC midnight).
    pub timestamp_ms: i64,
    /// Price in the ticker's own currency.
    pub fmv: Decimal,
    /// Multiplier applied to `fmv`.
    pub rate: Decimal,
    /// `fmv * rate`.
    pub converted: Decimal,
}

/// Result of a converted-currency peak query.
///
/// `peak` is the winning day; `candidates` holds every day considered, in
/// ascending timestamp order, for auditing the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakReport {
    /// Queried ticker.
    pub ticker: Ticker,
    /// Source currency the rates were looked up for.
    pub currency: String,
    /// Inclusive window start (epoch milliseconds).
    pub start_ms: i64,
    /// Inclusive window end (epoch milliseconds).
    pub end_ms: i64,
    /// Day with the highest converted value (earliest on ties).
    pub peak: ConvertedPrice,
    /// Per-day breakdown of all candidates.
    pub candidates: Vec<ConvertedPrice>,
}

/// Detailed outcome of a point resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Queried ticker.
    pub ticker: Ticker,
    /// Requested instant (epoch milliseconds).
    pub target_ms: i64,
    /// Timestamp of the point whose price was returned.
    pub anchor_ms: i64,
    /// Returned price.
    pub price: Decimal,
    /// Latest point strictly before the target, if any.
    pub predecessor_ms: Option<i64>,
    /// Whole days between the last trading day and the predecessor, when a
    /// staleness notice was emitted.
    pub gap_days: Option<i64>,
}

impl Resolution {
    /// True if the target instant itself had a data point.
    #[must_use]
    pub const fn is_exact(&self) -> bool {
        self.anchor_ms == self.target_ms
    }
}
