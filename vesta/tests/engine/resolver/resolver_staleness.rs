use tracing::Level;
use vesta::{StalenessPolicy, VestaError};

use crate::helpers::capture::{capture_events, find};
use crate::helpers::{cents, day, fixture_store, store_with, store_with_policy};

const STALE: &str = "stale price data; substituting next available close";

#[test]
fn weekend_target_after_friday_close_is_not_stale() {
    let (_, store) = fixture_store();
    // Saturday 2024-12-28: last trading day is Friday the 27th, which has data.
    let r = store.resolver().resolve_detailed("goog", day(2024, 12, 28)).unwrap();
    assert_eq!(r.anchor_ms, day(2024, 12, 30));
    assert_eq!(r.price, cents(19124));
    assert_eq!(r.gap_days, None);
}

#[test]
fn holiday_gap_is_logged_and_tolerated() {
    let (_, store) = fixture_store();
    let r = store.resolver().resolve_detailed("goog", day(2024, 12, 25)).unwrap();
    assert_eq!(r.price, cents(19710));
    assert_eq!(r.gap_days, Some(1));
}

#[test]
fn large_gap_is_tolerated_by_default() {
    let (_, store) = store_with(
        "crm",
        &[("2024-12-02", "300.00"), ("2024-12-20", "330.00")],
    );
    let r = store.resolver().resolve_detailed("crm", day(2024, 12, 18)).unwrap();
    assert_eq!(r.price, cents(33000));
    assert_eq!(r.gap_days, Some(16));
}

#[test]
fn strict_policy_rejects_gaps_over_the_limit() {
    let rows = [("2024-12-02", "300.00"), ("2024-12-20", "330.00")];
    let (_, strict) =
        store_with_policy("crm", &rows, StalenessPolicy::Strict { max_gap_days: 5 });
    let err = strict.resolver().resolve("crm", day(2024, 12, 18)).unwrap_err();
    assert_eq!(
        err,
        VestaError::StaleData {
            ticker: "crm".into(),
            gap_days: 16,
            max_gap_days: 5,
        }
    );

    let (_, relaxed) =
        store_with_policy("crm", &rows, StalenessPolicy::Strict { max_gap_days: 16 });
    assert_eq!(
        relaxed.resolver().resolve("crm", day(2024, 12, 18)).unwrap(),
        cents(33000)
    );
}

#[test]
fn strict_policy_leaves_exact_matches_alone() {
    let rows = [("2024-12-02", "300.00"), ("2024-12-20", "330.00")];
    let (_, store) = store_with_policy("crm", &rows, StalenessPolicy::Strict { max_gap_days: 0 });
    assert_eq!(
        store.resolver().resolve("crm", day(2024, 12, 20)).unwrap(),
        cents(33000)
    );
}

#[test]
fn weekend_price_contradicting_calendar_is_invariant_violation() {
    // A Saturday close before a Sunday target lies after Friday, the last trading day.
    let (_, store) = store_with(
        "meta",
        &[
            ("2024-12-27", "600.00"),
            ("2024-12-28", "601.00"),
            ("2024-12-30", "602.00"),
        ],
    );
    let err = store.resolver().resolve("meta", day(2024, 12, 29)).unwrap_err();
    assert!(matches!(err, VestaError::InvariantViolation(_)));
    assert!(err.is_data_fault());
}

#[test]
fn stale_substitution_emits_a_warning_naming_the_gap() {
    let (_, store) = store_with("x", &[("2024-12-24", "100"), ("2024-12-26", "105")]);
    let (price, events) = capture_events(|| store.resolver().resolve("x", day(2024, 12, 25)));
    assert_eq!(price.unwrap(), cents(10500));

    let warnings = find(&events, Level::WARN, STALE);
    assert_eq!(warnings.len(), 1, "{events:?}");
    let w = warnings[0];
    assert_eq!(w.field("ticker"), Some("x"));
    assert_eq!(w.field("gap_days"), Some("1"));
    assert_eq!(w.field("predecessor"), Some("2024-12-24"));
    assert_eq!(w.field("anchor"), Some("2024-12-26"));
    assert_eq!(w.field("price"), Some("105"));
}

#[test]
fn gap_free_lookups_do_not_warn() {
    let (_, store) = fixture_store();
    let (_, events) = capture_events(|| {
        let resolver = store.resolver();
        resolver.resolve("goog", day(2024, 12, 24)).unwrap();
        resolver.resolve("goog", day(2024, 12, 28)).unwrap();
        resolver.resolve("goog", day(2024, 1, 1)).unwrap();
    });
    assert!(find(&events, Level::WARN, STALE).is_empty(), "{events:?}");
}

#[test]
fn strict_rejection_still_logs_the_gap() {
    let rows = [("2024-12-02", "300.00"), ("2024-12-20", "330.00")];
    let (_, store) = store_with_policy("crm", &rows, StalenessPolicy::Strict { max_gap_days: 5 });
    let (result, events) = capture_events(|| store.resolver().resolve("crm", day(2024, 12, 18)));
    assert!(matches!(result, Err(VestaError::StaleData { .. })));
    let warnings = find(&events, Level::WARN, STALE);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].field("gap_days"), Some("16"));
}
