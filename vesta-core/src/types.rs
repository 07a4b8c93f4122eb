//! Re-export of foundational types from `vesta-types` and `rust_decimal`.
// Consolidated re-exports so downstream crates can depend on `vesta-core` only

pub use vesta_types::{ConvertedPrice, PeakReport, Resolution};
pub use vesta_types::{DEFAULT_CURRENCY, StalenessPolicy, StoreConfig};
pub use vesta_types::{Ticker, VestaError};

pub use rust_decimal::Decimal;
