use std::cell::RefCell;

use tracing::Level;
use vesta::{Decimal, MonthBucket, PreviousMonthRates, VestaError};
use vesta_mock::FixedRates;

use crate::helpers::capture::{capture_events, find};
use crate::helpers::{cents, day, fixture_store, store_with};

#[test]
fn converted_peak_can_differ_from_source_peak() {
    let (_, store) = store_with(
        "adbe",
        &[("2024-01-31", "10"), ("2024-02-29", "20"), ("2024-03-29", "30")],
    );
    let rates = FixedRates::new()
        .with_rate("USD", 2024, 1, Decimal::ONE)
        .with_rate("USD", 2024, 2, Decimal::TWO)
        .with_rate("USD", 2024, 3, Decimal::ONE);

    let report = store
        .ranges()
        .peak_in_converted_currency("adbe", day(2024, 1, 1), day(2024, 3, 31), &rates)
        .unwrap();
    assert_eq!(report.peak.timestamp_ms, day(2024, 2, 29));
    assert_eq!(report.peak.fmv, Decimal::from(20));
    assert_eq!(report.peak.rate, Decimal::TWO);
    assert_eq!(report.peak.converted, Decimal::from(40));
    assert_eq!(report.currency, "USD");
    assert_eq!(report.candidates.len(), 3);
    assert_eq!(report.candidates[2].converted, Decimal::from(30));

    let source_peak = store
        .ranges()
        .peak_in_source_currency("adbe", day(2024, 1, 1), day(2024, 3, 31))
        .unwrap();
    assert_eq!(source_peak.timestamp_ms, day(2024, 3, 29));
}

#[test]
fn closures_serve_as_rate_sources() {
    let (_, store) = fixture_store();
    let report = store
        .ranges()
        .peak_in_converted_currency(
            "goog",
            day(2024, 12, 1),
            day(2024, 12, 31),
            &|_currency: &str, _month: MonthBucket| cents(8500),
        )
        .unwrap();
    assert_eq!(report.peak.timestamp_ms, day(2024, 12, 24));
    assert_eq!(report.peak.converted, cents(19757) * cents(8500));
    assert_eq!(report.candidates.len(), 6);
}

#[test]
fn rates_are_requested_for_the_ticker_currency() {
    let (_, store) = fixture_store();
    let seen = RefCell::new(Vec::new());
    let rates = |currency: &str, month: MonthBucket| {
        seen.borrow_mut().push((currency.to_string(), month));
        Decimal::ONE
    };
    store
        .ranges()
        .peak_in_converted_currency("msft", day(2024, 12, 23), day(2024, 12, 24), &rates)
        .unwrap();
    let dec = MonthBucket::new(2024, 12).unwrap();
    assert_eq!(
        seen.into_inner(),
        vec![("USD".to_string(), dec), ("USD".to_string(), dec)]
    );
}

#[test]
fn previous_month_rates_shift_the_lookup() {
    let (_, store) = store_with("adbe", &[("2024-03-01", "10")]);
    let rates = PreviousMonthRates(
        FixedRates::new()
            .with_rate("USD", 2024, 2, Decimal::TEN)
            .with_rate("USD", 2024, 3, Decimal::ONE),
    );
    let report = store
        .ranges()
        .peak_in_converted_currency("adbe", day(2024, 3, 1), day(2024, 3, 1), &rates)
        .unwrap();
    assert_eq!(report.peak.rate, Decimal::TEN);
    assert_eq!(report.peak.converted, Decimal::from(100));
}

#[test]
fn rate_failures_propagate_unchanged() {
    let (_, store) = fixture_store();
    let err = store
        .ranges()
        .peak_in_converted_currency("goog", day(2024, 12, 1), day(2024, 12, 31), &FixedRates::new())
        .unwrap_err();
    assert!(matches!(err, VestaError::NotFound { .. }));
}

#[test]
fn converted_query_validates_range_and_window() {
    let (_, store) = fixture_store();
    let rates = FixedRates::flat(Decimal::ONE);
    assert!(matches!(
        store
            .ranges()
            .peak_in_converted_currency("goog", day(2024, 12, 31), day(2024, 12, 1), &rates)
            .unwrap_err(),
        VestaError::InvalidRange { .. }
    ));
    assert!(matches!(
        store
            .ranges()
            .peak_in_converted_currency("goog", day(2025, 1, 1), day(2025, 1, 31), &rates)
            .unwrap_err(),
        VestaError::NoData { .. }
    ));
}

#[test]
fn converted_overflow_is_an_error() {
    let (_, store) = store_with("brk", &[("2024-12-24", "79228162514264337593543950335")]);
    let err = store
        .ranges()
        .peak_in_converted_currency(
            "brk",
            day(2024, 12, 1),
            day(2024, 12, 31),
            &|_currency: &str, _month: MonthBucket| Decimal::TWO,
        )
        .unwrap_err();
    assert!(matches!(err, VestaError::InvalidArg(_)), "{err:?}");
}

#[test]
fn converted_peak_logs_breakdown_and_summary() {
    let (_, store) = store_with(
        "adbe",
        &[("2024-01-31", "10"), ("2024-02-29", "20"), ("2024-03-29", "30")],
    );
    let rates = FixedRates::new()
        .with_rate("USD", 2024, 1, Decimal::ONE)
        .with_rate("USD", 2024, 2, Decimal::TWO)
        .with_rate("USD", 2024, 3, Decimal::ONE);

    let (report, events) = capture_events(|| {
        store
            .ranges()
            .peak_in_converted_currency("adbe", day(2024, 1, 1), day(2024, 3, 31), &rates)
    });
    report.unwrap();

    let breakdowns = find(&events, Level::DEBUG, "converted peak candidates");
    assert_eq!(breakdowns.len(), 1, "{events:?}");
    let json = breakdowns[0].field("breakdown").unwrap();
    for date in ["2024-01-31", "2024-02-29", "2024-03-29"] {
        assert!(json.contains(&format!("\"date\":\"{date}\"")), "{json}");
    }

    let summaries = find(&events, Level::INFO, "converted-currency peak");
    assert_eq!(summaries.len(), 1, "{events:?}");
    let s = summaries[0];
    assert_eq!(s.field("peak_day"), Some("2024-02-29"));
    assert_eq!(s.field("fmv"), Some("20"));
    assert_eq!(s.field("rate"), Some("2"));
    assert_eq!(s.field("converted"), Some("40"));
}
