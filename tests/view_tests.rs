use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use taskpad::store::TaskStore;
use taskpad::view::{format_scheduled, order, DEFAULT_DISPLAY_FORMAT};

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 5)
        .unwrap()
        .and_hms_opt(14, 30, 0)
        .unwrap()
}

#[test]
fn test_scenario_from_empty_store() {
    let t1 = base();
    let t0 = t1 - Duration::hours(3);
    let mut store = TaskStore::new();

    let milk = store.add("Buy milk", Some(t1)).unwrap();
    assert_eq!(store.len(), 1);
    assert!(store.add("", Some(t1 + Duration::days(1))).is_err());
    assert_eq!(store.len(), 1);

    let dentist = store.add("Call dentist", Some(t0)).unwrap();
    let names: Vec<_> = order(store.snapshot()).iter().map(|t| t.text.as_str()).collect();
    assert_eq!(names, ["Call dentist", "Buy milk"]);

    store.toggle_completion(milk);
    assert!(store.get(milk).unwrap().completed);
    let names: Vec<_> = order(store.snapshot()).iter().map(|t| t.text.as_str()).collect();
    assert_eq!(names, ["Call dentist", "Buy milk"]);

    store.remove(dentist);
    assert_eq!(store.len(), 1);
    assert_eq!(store.snapshot()[0].text, "Buy milk");
}

#[test]
fn test_order_leaves_input_untouched() {
    let mut store = TaskStore::new();
    store.add("Later", Some(base() + Duration::minutes(1))).unwrap();
    store.add("Sooner", Some(base())).unwrap();
    let before = store.snapshot().to_vec();

    let first = order(store.snapshot());
    let second = order(store.snapshot());

    assert_eq!(first, second);
    assert_eq!(store.snapshot(), before.as_slice());
}

#[test]
fn test_display_format() {
    assert_eq!(format_scheduled(base(), DEFAULT_DISPLAY_FORMAT), "05/03/2025 14:30");
}

proptest! {
    #[test]
    fn order_is_sorted_and_stable(offsets in prop::collection::vec(0i64..20, 0..50)) {
        let mut store = TaskStore::new();
        for (n, minutes) in offsets.iter().enumerate() {
            store.add(format!("task {}", n), Some(base() + Duration::minutes(*minutes))).unwrap();
        }

        let ordered = order(store.snapshot());
        prop_assert_eq!(ordered.len(), store.len());
        for pair in ordered.windows(2) {
            prop_assert!(pair[0].scheduled_at <= pair[1].scheduled_at);
            if pair[0].scheduled_at == pair[1].scheduled_at {
                // Ids grow with insertion order.
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }
}

#[test]
fn test_offset_layout_falls_back_to_default_display() {
    assert!(taskpad::view::try_format_scheduled(base(), "%H:%M %z").is_err());
    assert_eq!(format_scheduled(base(), "%H:%M %z"), "05/03/2025 14:30");
}
