mod common;
use common::{get_source, init_tracing};
use vesta::{PriceStore, VestingRecord, parse_quantity, value_vestings};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let store = PriceStore::builder().with_source(get_source()).build()?;

    // Rows as a brokerage statement would list them.
    let rows = [
        ("24-Dec-2024", "Released Shares", "Completed", "10.332"),
        ("25-Dec-2024", "Released Shares", "Completed", "5.511"),
        ("26-Dec-2024", "Released Shares", "Cancelled", "4.821"),
    ];
    let records: Vec<VestingRecord> = rows
        .iter()
        .map(|(date, kind, status, qty)| VestingRecord {
            date: (*date).to_string(),
            kind: (*kind).to_string(),
            status: Some((*status).to_string()),
            quantity: parse_quantity(qty),
            ticker: Some("GOOG".to_string()),
        })
        .collect();

    for p in value_vestings(&store.resolver(), &records, None)? {
        println!(
            "{} {} x {} @ {} {}",
            p.date, p.ticker, p.quantity, p.fmv.amount, p.fmv.currency
        );
    }

    Ok(())
}
