//! Time-series utilities shared by sources and the query engine.
//!
//! Modules include:
//! - `series`: sorted, de-duplicated per-ticker price series
//! - `parse`: date-format strategies and price-cell cleaning
//! - `calendar`: day arithmetic, weekend-aware trading days, month buckets
/// Day arithmetic and month buckets.
pub mod calendar;
/// Date parser strategies and price normalization.
pub mod parse;
/// Ordered price series and neighbor lookups.
pub mod series;
