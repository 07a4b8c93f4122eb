use vesta::VestaError;

use crate::helpers::{cents, day, fixture_store, store_with};

#[test]
fn peak_includes_both_boundaries() {
    let (_, store) = fixture_store();
    let ranges = store.ranges();

    // 12/24 is the highest goog close in the fixture.
    let start = ranges
        .peak_in_source_currency("goog", day(2024, 12, 24), day(2024, 12, 30))
        .unwrap();
    assert_eq!(start.timestamp_ms, day(2024, 12, 24));
    assert_eq!(start.price, cents(19757));

    let end = ranges
        .peak_in_source_currency("goog", day(2024, 12, 20), day(2024, 12, 24))
        .unwrap();
    assert_eq!(end.timestamp_ms, day(2024, 12, 24));

    let single = ranges
        .peak_in_source_currency("goog", day(2024, 12, 30), day(2024, 12, 30))
        .unwrap();
    assert_eq!(single.price, cents(19124));
}

#[test]
fn peak_ties_go_to_the_earliest_day() {
    let (_, store) = store_with(
        "aapl",
        &[
            ("2024-12-23", "250.00"),
            ("2024-12-24", "255.00"),
            ("2024-12-26", "255.00"),
            ("2024-12-27", "251.00"),
        ],
    );
    let peak = store
        .ranges()
        .peak_in_source_currency("aapl", day(2024, 12, 1), day(2024, 12, 31))
        .unwrap();
    assert_eq!(peak.timestamp_ms, day(2024, 12, 24));
}

#[test]
fn empty_window_is_no_data() {
    let (_, store) = fixture_store();
    let err = store
        .ranges()
        .peak_in_source_currency("goog", day(2024, 12, 28), day(2024, 12, 29))
        .unwrap_err();
    assert!(matches!(err, VestaError::NoData { .. }));
}

#[test]
fn reversed_range_is_invalid() {
    let (mock, store) = fixture_store();
    let err = store
        .ranges()
        .peak_in_source_currency("goog", day(2024, 12, 30), day(2024, 12, 20))
        .unwrap_err();
    assert_eq!(
        err,
        VestaError::InvalidRange {
            start_ms: day(2024, 12, 30),
            end_ms: day(2024, 12, 20),
        }
    );
    // Rejected before touching the source.
    assert_eq!(mock.fetch_count("goog"), 0);
}
