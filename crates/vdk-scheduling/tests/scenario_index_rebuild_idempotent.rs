//! Scenario: rebuilding the index from the same snapshot changes nothing.
//!
//! Refreshing availability means rebuilding from scratch; two builds from
//! the same rows must answer identically for every date.

use chrono::NaiveDate;
use vdk_scheduling::{AvailabilityIndex, BookedRange, RangeSource};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn snapshot() -> Vec<BookedRange> {
    vec![
        BookedRange::new(d(2025, 2, 3), d(2025, 2, 14), RangeSource::Confirmed),
        BookedRange::new(d(2025, 2, 10), d(2025, 2, 20), RangeSource::Confirmed),
        BookedRange::new(d(2025, 4, 1), d(2025, 4, 7), RangeSource::Blockout),
        // Reversed span: covers nothing, and must do so consistently.
        BookedRange::new(d(2025, 5, 10), d(2025, 5, 1), RangeSource::Confirmed),
    ]
}

#[test]
fn two_builds_from_same_snapshot_agree_on_every_day() {
    let a = AvailabilityIndex::build(snapshot());
    let b = AvailabilityIndex::build(snapshot());

    let mut day = d(2025, 1, 1);
    let last = d(2025, 6, 30);
    while day <= last {
        assert_eq!(
            a.is_free(day),
            b.is_free(day),
            "rebuild disagreed on {day}"
        );
        day = day.succ_opt().unwrap();
    }
}

#[test]
fn reversed_range_covers_no_days() {
    let index = AvailabilityIndex::build(snapshot());
    assert!(index.is_free(d(2025, 5, 1)));
    assert!(index.is_free(d(2025, 5, 5)));
    assert!(index.is_free(d(2025, 5, 10)));
}
