use proptest::prelude::*;
use vesta::DAY_MS;

use crate::helpers::store_with;

// Weekday closes from 2024-01-01 (Monday) onward, one row per day index.
fn rows_for(days: &[i64]) -> Vec<(String, String)> {
    days.iter()
        .map(|d| {
            let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                + chrono::Days::new(u64::try_from(*d).unwrap());
            (date.format("%Y-%m-%d").to_string(), format!("{}.00", 100 + d))
        })
        .collect()
}

fn weekday_offsets() -> impl Strategy<Value = Vec<i64>> {
    proptest::collection::btree_set(0i64..200, 1..40).prop_map(|set| {
        set.into_iter()
            .filter(|d| d.rem_euclid(7) < 5)
            .collect::<Vec<_>>()
    })
}

proptest! {
    #[test]
    fn exact_hits_return_their_own_price(days in weekday_offsets()) {
        prop_assume!(!days.is_empty());
        let owned = rows_for(&days);
        let rows: Vec<(&str, &str)> = owned.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
        let (_, store) = store_with("p", &rows);
        let series = store.load("p").unwrap();
        for p in series.points() {
            prop_assert_eq!(store.resolver().resolve("p", p.timestamp_ms).unwrap(), p.price);
        }
    }

    #[test]
    fn misses_resolve_to_the_next_point(days in weekday_offsets(), offset in 0i64..200) {
        prop_assume!(!days.is_empty());
        let owned = rows_for(&days);
        let rows: Vec<(&str, &str)> = owned.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
        let (_, store) = store_with("p", &rows);
        let series = store.load("p").unwrap();
        let target = series.points()[0].timestamp_ms + (offset - days[0]) * DAY_MS;

        let expected = series.points().iter().find(|p| p.timestamp_ms >= target);
        let got = store.resolver().resolve("p", target);
        match expected {
            Some(p) => {
                prop_assert_eq!(got.unwrap(), p.price);
            }
            None => {
                prop_assert!(got.is_err());
            }
        }
    }
}
