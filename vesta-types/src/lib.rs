//! Vesta-specific error taxonomy, configuration primitives, and report envelopes.
#![warn(missing_docs)]

mod config;
mod reports;
mod ticker;

pub use config::{DEFAULT_CURRENCY, StalenessPolicy, StoreConfig};
pub use reports::{ConvertedPrice, PeakReport, Resolution};
pub use ticker::Ticker;

/// Error types shared by all vesta crates.
pub mod error;
pub use error::VestaError;
