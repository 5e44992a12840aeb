//! Shared fixtures for scenario tests.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;
use vdk_db::IntakeRequest;
use vdk_schemas::{BookingRow, BookingStatus, ClientType, NarrationStyle};

/// Calendar date literal. Panics on an impossible date; fixture input is
/// test-author controlled.
pub fn d(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("fixture date must be valid")
}

/// A solo-style intake request for `title`, starting at `start`.
pub fn solo_request(title: &str, word_count: i64, start: NaiveDate) -> IntakeRequest {
    IntakeRequest {
        client_name: "Jordan Hale".to_string(),
        email: "jordan@example.com".to_string(),
        book_title: title.to_string(),
        word_count,
        days_needed: None,
        start_date: start.format("%Y-%m-%d").to_string(),
        narration_style: NarrationStyle::Solo,
        genre: "fantasy".to_string(),
        notes: None,
        is_returning: false,
        client_type: ClientType::Author,
    }
}

/// A confirmed booking row occupying `[start, end]`, for seeding a store
/// directly.
pub fn seeded_booking(title: &str, start: NaiveDate, end: NaiveDate) -> BookingRow {
    BookingRow {
        id: Uuid::new_v4(),
        client_name: "Casey Brook".to_string(),
        email: "casey@example.com".to_string(),
        book_title: title.to_string(),
        word_count: 55_000,
        days_needed: (end - start).num_days() + 1,
        start_date: Some(start),
        end_date: Some(end),
        narration_style: NarrationStyle::Solo,
        genre: "mystery".to_string(),
        notes: None,
        is_returning: true,
        discount_applied: None,
        client_type: ClientType::Publisher,
        status: BookingStatus::Onboarding,
        created_at_utc: Utc::now(),
    }
}
