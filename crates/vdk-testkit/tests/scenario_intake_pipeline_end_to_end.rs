//! Scenario: the full intake pipeline against an in-memory store.
//!
//! fetch rows → build index → derive duration → compute discount →
//! validate → persist with the style-routed initial status.

use vdk_config::SchedulingConfig;
use vdk_db::{submit, IntakeRequest, SubmitOutcome};
use vdk_schemas::{BookingStatus, NarrationStyle};
use vdk_scheduling::ScheduleError;
use vdk_testkit::{d, solo_request, MemoryStore};

// ---------------------------------------------------------------------------
// 1. Happy path: 50k words, 10 days out, clear calendar
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fifty_thousand_words_ten_days_out_books_eight_days() {
    let store = MemoryStore::new();
    let cfg = SchedulingConfig::sane_defaults();
    let today = d(2025, 6, 1);

    let req = solo_request("Ember and Ash", 50_000, d(2025, 6, 11));
    let outcome = submit(&store, &cfg, today, req).await.unwrap();

    let row = match outcome {
        SubmitOutcome::Created(row) => row,
        SubmitOutcome::Rejected(e) => panic!("expected creation, got refusal {e:?}"),
    };

    assert_eq!(row.days_needed, 8, "ceil(50000 / 6975)");
    assert_eq!(row.start_date, Some(d(2025, 6, 11)));
    assert_eq!(row.end_date, Some(d(2025, 6, 19)), "end = start + 8 days");
    assert_eq!(row.status, BookingStatus::Pending);
    assert_eq!(row.discount_applied, None, "10 days out earns no tier");
}

// ---------------------------------------------------------------------------
// 2. Discount snapshot at intake time
// ---------------------------------------------------------------------------

#[tokio::test]
async fn far_out_booking_snapshots_discount_label() {
    let store = MemoryStore::new();
    let cfg = SchedulingConfig::sane_defaults();
    let today = d(2025, 1, 1);

    let req = solo_request("Long Lead Title", 30_000, d(2025, 5, 1)); // 120 days out
    let outcome = submit(&store, &cfg, today, req).await.unwrap();

    match outcome {
        SubmitOutcome::Created(row) => {
            assert_eq!(row.discount_applied.as_deref(), Some("8%"));
        }
        SubmitOutcome::Rejected(e) => panic!("unexpected refusal {e:?}"),
    }
}

// ---------------------------------------------------------------------------
// 3. Operator day override wins over the derived estimate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn explicit_days_override_is_not_rederived() {
    let store = MemoryStore::new();
    let cfg = SchedulingConfig::sane_defaults();
    let today = d(2025, 6, 1);

    let mut req = solo_request("Short Deadline", 50_000, d(2025, 6, 11));
    req.days_needed = Some(12);

    match submit(&store, &cfg, today, req).await.unwrap() {
        SubmitOutcome::Created(row) => {
            assert_eq!(row.days_needed, 12);
            assert_eq!(row.end_date, Some(d(2025, 6, 23)));
            assert_eq!(
                row.word_count, 50_000,
                "word count is never re-derived from the day override"
            );
        }
        SubmitOutcome::Rejected(e) => panic!("unexpected refusal {e:?}"),
    }
}

// ---------------------------------------------------------------------------
// 4. Style routing: coordination styles queue separately and don't block
// ---------------------------------------------------------------------------

#[tokio::test]
async fn full_cast_routes_to_coordination_and_does_not_block_calendar() {
    let store = MemoryStore::new();
    let cfg = SchedulingConfig::sane_defaults();
    let today = d(2025, 6, 1);

    let mut cast_req = solo_request("Ensemble Piece", 40_000, d(2025, 7, 1));
    cast_req.narration_style = NarrationStyle::FullCast;

    match submit(&store, &cfg, today, cast_req).await.unwrap() {
        SubmitOutcome::Created(row) => {
            assert_eq!(row.status, BookingStatus::PendingCoordination);
        }
        SubmitOutcome::Rejected(e) => panic!("unexpected refusal {e:?}"),
    }

    // The coordination booking sits in an external queue; the same span is
    // still open for a solo project.
    let solo = solo_request("Solo Same Dates", 40_000, d(2025, 7, 1));
    match submit(&store, &cfg, today, solo).await.unwrap() {
        SubmitOutcome::Created(row) => assert_eq!(row.status, BookingStatus::Pending),
        SubmitOutcome::Rejected(e) => panic!("coordination booking must not block: {e:?}"),
    }
}

// ---------------------------------------------------------------------------
// 5. Refusals come back as data, not store errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn blockout_overlap_is_rejected_with_conflict_days() {
    let store = MemoryStore::new();
    store.seed_blockout(d(2025, 6, 15), d(2025, 6, 20));
    let cfg = SchedulingConfig::sane_defaults();
    let today = d(2025, 6, 1);

    let req = solo_request("Clashing Title", 50_000, d(2025, 6, 14)); // 8 days: 14..21
    match submit(&store, &cfg, today, req).await.unwrap() {
        SubmitOutcome::Rejected(ScheduleError::Overlap { days, .. }) => {
            assert!(days.contains(&d(2025, 6, 15)));
            assert!(days.contains(&d(2025, 6, 20)));
            assert!(!days.contains(&d(2025, 6, 14)), "day before blockout is free");
        }
        other => panic!("expected overlap refusal, got {other:?}"),
    }
}

#[tokio::test]
async fn past_start_and_zero_words_are_rejected_in_order() {
    let store = MemoryStore::new();
    let cfg = SchedulingConfig::sane_defaults();
    let today = d(2025, 6, 1);

    let mut no_words = solo_request("No Estimate Yet", 0, d(2025, 6, 10));
    no_words.days_needed = Some(5);
    match submit(&store, &cfg, today, no_words).await.unwrap() {
        SubmitOutcome::Rejected(e) => assert_eq!(e, ScheduleError::EmptyWordCount),
        other => panic!("expected word-count refusal, got {other:?}"),
    }

    let past = solo_request("Yesterday's Book", 20_000, d(2025, 5, 30));
    match submit(&store, &cfg, today, past).await.unwrap() {
        SubmitOutcome::Rejected(e) => {
            assert_eq!(e.code(), "PAST_START_DATE");
        }
        other => panic!("expected past-date refusal, got {other:?}"),
    }
}

#[tokio::test]
async fn unparseable_start_date_is_rejected_not_an_error() {
    let store = MemoryStore::new();
    let cfg = SchedulingConfig::sane_defaults();

    let mut req = solo_request("Bad Date", 20_000, d(2025, 6, 10));
    req.start_date = "2025-06-10T00:00:00Z".to_string();

    match submit(&store, &cfg, d(2025, 6, 1), req).await.unwrap() {
        SubmitOutcome::Rejected(e) => assert_eq!(e.code(), "INVALID_DATE"),
        other => panic!("expected invalid-date refusal, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// 6. Nothing persists on refusal
// ---------------------------------------------------------------------------

#[tokio::test]
async fn refused_submissions_leave_no_rows_behind() {
    let store = MemoryStore::new();
    let cfg = SchedulingConfig::sane_defaults();
    let today = d(2025, 6, 1);

    let _ = submit(&store, &cfg, today, solo_request("Nope", 0, d(2025, 6, 10))).await;

    use vdk_db::RecordStore;
    assert!(
        store.fetch_booking_rows().await.unwrap().is_empty(),
        "validation is side-effect free until the final insert"
    );
}
