mod common;
use common::{get_source, init_tracing, ms};
use vesta::{Decimal, MonthBucket, PreviousMonthRates, PriceStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let store = PriceStore::builder().with_source(get_source()).build()?;
    let ranges = store.ranges();
    let (start, end) = (ms("2024-12-01"), ms("2024-12-31"));

    // 1. Peak and latest close in the ticker's own currency.
    let peak = ranges.peak_in_source_currency("MSFT", start, end)?;
    let last = ranges.latest_on_or_before("MSFT", end)?;
    println!("peak close {} / last close {}", peak.price, last.price);

    // 2. Peak after conversion with a month-indexed rate table, looked up one
    //    month back (rates published for the previous month).
    let rates = PreviousMonthRates(|_currency: &str, month: MonthBucket| match month.month {
        11 => Decimal::new(8440, 2),
        _ => Decimal::new(8500, 2),
    });
    let report = ranges.peak_in_converted_currency("MSFT", start, end, &rates)?;
    println!(
        "converted peak {} {} -> {} on day {}",
        report.peak.fmv, report.currency, report.peak.converted, report.peak.timestamp_ms
    );

    Ok(())
}
