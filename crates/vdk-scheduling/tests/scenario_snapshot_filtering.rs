//! Scenario: snapshot assembly filters exactly what the config says.
//!
//! # Invariants under test
//!
//! 1. Rows missing either date are treated as not-loaded and skipped.
//! 2. Bookings in a configured non-blocking status don't reach the index.
//! 3. Everything else blocks, overlaps included.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;
use vdk_schemas::{
    BlockoutRow, BookingRow, BookingStatus, ClientType, NarrationStyle,
};
use vdk_scheduling::{booked_ranges_from_rows, AvailabilityIndex, RangeSource};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn booking(
    status: BookingStatus,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> BookingRow {
    BookingRow {
        id: Uuid::new_v4(),
        client_name: "Riley Moss".to_string(),
        email: "riley@example.com".to_string(),
        book_title: "The Hollow Key".to_string(),
        word_count: 62_000,
        days_needed: 9,
        start_date: start,
        end_date: end,
        narration_style: NarrationStyle::Solo,
        genre: "thriller".to_string(),
        notes: None,
        is_returning: false,
        discount_applied: None,
        client_type: ClientType::Author,
        status,
        created_at_utc: Utc::now(),
    }
}

fn blockout(start: Option<NaiveDate>, end: Option<NaiveDate>) -> BlockoutRow {
    BlockoutRow {
        id: Uuid::new_v4(),
        start_date: start,
        end_date: end,
        reason: Some("conference".to_string()),
    }
}

const NON_BLOCKING: &[BookingStatus] = &[
    BookingStatus::PendingCoordination,
    BookingStatus::Rejected,
    BookingStatus::Postponed,
    BookingStatus::Archived,
];

// ---------------------------------------------------------------------------
// 1. Half-entered rows are skipped
// ---------------------------------------------------------------------------

#[test]
fn rows_missing_a_date_are_skipped() {
    let bookings = vec![
        booking(BookingStatus::Onboarding, None, Some(d(2025, 3, 10))),
        booking(BookingStatus::Onboarding, Some(d(2025, 3, 1)), None),
        booking(BookingStatus::Onboarding, None, None),
    ];
    let blockouts = vec![blockout(Some(d(2025, 4, 1)), None)];

    let ranges = booked_ranges_from_rows(&bookings, &blockouts, NON_BLOCKING);
    assert!(
        ranges.is_empty(),
        "no row had both dates, so nothing should block"
    );
}

// ---------------------------------------------------------------------------
// 2. Non-blocking statuses are excluded
// ---------------------------------------------------------------------------

#[test]
fn non_blocking_statuses_do_not_reach_the_index() {
    let span = (Some(d(2025, 3, 1)), Some(d(2025, 3, 10)));
    let bookings = vec![
        booking(BookingStatus::Rejected, span.0, span.1),
        booking(BookingStatus::Postponed, span.0, span.1),
        booking(BookingStatus::Archived, span.0, span.1),
        booking(BookingStatus::PendingCoordination, span.0, span.1),
    ];

    let ranges = booked_ranges_from_rows(&bookings, &[], NON_BLOCKING);
    assert!(ranges.is_empty(), "cancelled/parked rows must not block");

    let index = AvailabilityIndex::build(ranges);
    assert!(index.is_free(d(2025, 3, 5)));
}

#[test]
fn active_statuses_block() {
    let span = (Some(d(2025, 3, 1)), Some(d(2025, 3, 10)));
    for status in [
        BookingStatus::Pending,
        BookingStatus::Onboarding,
        BookingStatus::FirstFifteen,
        BookingStatus::Production,
        BookingStatus::Invoiced,
        BookingStatus::Paid,
        BookingStatus::OnHold,
    ] {
        let ranges =
            booked_ranges_from_rows(&[booking(status, span.0, span.1)], &[], NON_BLOCKING);
        assert_eq!(ranges.len(), 1, "{status:?} must block the calendar");
        assert_eq!(ranges[0].source, RangeSource::Confirmed);
    }
}

// ---------------------------------------------------------------------------
// 3. Overlaps and blockouts all make it through
// ---------------------------------------------------------------------------

#[test]
fn overlapping_rows_and_blockouts_all_block() {
    let bookings = vec![
        booking(
            BookingStatus::Production,
            Some(d(2025, 3, 1)),
            Some(d(2025, 3, 10)),
        ),
        booking(
            BookingStatus::Onboarding,
            Some(d(2025, 3, 8)),
            Some(d(2025, 3, 18)),
        ),
    ];
    let blockouts = vec![blockout(Some(d(2025, 3, 20)), Some(d(2025, 3, 22)))];

    let ranges = booked_ranges_from_rows(&bookings, &blockouts, NON_BLOCKING);
    assert_eq!(ranges.len(), 3, "overlaps are kept, never merged");

    let index = AvailabilityIndex::build(ranges);
    assert!(!index.is_free(d(2025, 3, 9)), "covered by both bookings");
    assert!(!index.is_free(d(2025, 3, 21)), "covered by the blockout");
    assert!(index.is_free(d(2025, 3, 19)), "gap day stays free");
}
