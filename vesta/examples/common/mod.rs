#![allow(dead_code)]

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use vesta::PriceSource;

/// Price source for the examples.
///
/// Reads `<VESTA_DATA_DIR>/<ticker>/data.csv` when `VESTA_DATA_DIR` is set,
/// otherwise serves the mock fixtures.
#[must_use]
pub fn get_source() -> Arc<dyn PriceSource> {
    match std::env::var("VESTA_DATA_DIR") {
        Ok(dir) => Arc::new(vesta_csv::CsvPriceSource::new(dir)),
        Err(_) => {
            println!("--- (Using mock price source) ---");
            Arc::new(vesta_mock::MockSource::new())
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Epoch milliseconds of UTC midnight on an ISO date.
pub fn ms(iso: &str) -> i64 {
    let date = chrono::NaiveDate::parse_from_str(iso, "%Y-%m-%d").expect("valid ISO date");
    vesta::date_to_ms(date)
}
