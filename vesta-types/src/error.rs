use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the vesta workspace.
///
/// Covers absent price sources, malformed rows, queries with no satisfying
/// data point, invalid ranges, and corrupted-history invariant violations.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum VestaError {
    /// No historical price source exists for the requested ticker.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "price history for goog".
        what: String,
    },

    /// A source row (or header) could not be parsed. The whole load is aborted.
    #[error("malformed price data for {ticker}: {msg}")]
    Malformed {
        /// Ticker whose history was being loaded.
        ticker: String,
        /// Human-readable description naming the offending row or column.
        msg: String,
    },

    /// The series has no point satisfying the query's temporal constraint.
    #[error("no data: {what}")]
    NoData {
        /// Description of the unsatisfied query.
        what: String,
    },

    /// A range query was issued with `start_ms > end_ms`.
    #[error("invalid range: start_ms={start_ms} is after end_ms={end_ms}")]
    InvalidRange {
        /// Requested inclusive start (epoch milliseconds).
        start_ms: i64,
        /// Requested inclusive end (epoch milliseconds).
        end_ms: i64,
    },

    /// Historical data contradicts the date it is meant to justify.
    ///
    /// Never expected for valid input; not recoverable.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// The prior reference point is older than the strict staleness policy allows.
    #[error("stale data for {ticker}: last prior price is {gap_days} days old (max {max_gap_days})")]
    StaleData {
        /// Ticker being resolved.
        ticker: String,
        /// Whole days between the last trading day and the prior data point.
        gap_days: i64,
        /// Configured maximum tolerated gap.
        max_gap_days: u32,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// A price source failed for reasons other than missing or malformed data.
    #[error("{provider} failed: {msg}")]
    Source {
        /// Price source name that failed.
        provider: String,
        /// Human-readable error message.
        msg: String,
    },
}

impl VestaError {
    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `Malformed` error for a ticker.
    pub fn malformed(ticker: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Malformed {
            ticker: ticker.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NoData` error describing the unsatisfied query.
    pub fn no_data(what: impl Into<String>) -> Self {
        Self::NoData { what: what.into() }
    }

    /// Helper: build a `Source` error with the source name and message.
    pub fn source(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Source {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Returns true if this error was caused by corrupt input data.
    ///
    /// Absent data (`NotFound`, `NoData`) and caller mistakes (`InvalidRange`,
    /// `InvalidArg`) are not data faults.
    #[must_use]
    pub const fn is_data_fault(&self) -> bool {
        matches!(self, Self::Malformed { .. } | Self::InvariantViolation(_))
    }
}
