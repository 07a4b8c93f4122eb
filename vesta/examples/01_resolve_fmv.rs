mod common;
use common::{get_source, init_tracing, ms};
use vesta::PriceStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // 1. Build a store over the configured price source.
    let store = PriceStore::builder().with_source(get_source()).build()?;
    let resolver = store.resolver();

    // 2. Resolve a trading day, a market holiday, and a weekend.
    for date in ["2024-12-24", "2024-12-25", "2024-12-28"] {
        let r = resolver.resolve_detailed("GOOG", ms(date))?;
        println!(
            "{date}: {} (exact: {}, stale gap: {:?} days)",
            r.price,
            r.is_exact(),
            r.gap_days
        );
    }

    // 3. The history was read once and is now cached.
    println!("goog loaded: {}", store.is_loaded("goog"));

    Ok(())
}
