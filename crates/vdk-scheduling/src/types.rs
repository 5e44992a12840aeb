use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which collection a booked range was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeSource {
    Confirmed,
    Blockout,
}

/// One inclusive span of unavailable days.
///
/// Immutable once loaded. Confirmed ranges may legitimately overlap each
/// other (multi-project states in the store); a day is busy when *any* range
/// covers it, so overlaps are kept as-is and never merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub source: RangeSource,
}

impl BookedRange {
    pub fn new(start: NaiveDate, end: NaiveDate, source: RangeSource) -> Self {
        Self { start, end, source }
    }

    /// Inclusive on both ends. A reversed range covers nothing.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A booking request before it passes the intake gate. Transient; nothing is
/// persisted until validation succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingCandidate {
    pub start_date: NaiveDate,
    /// Usually derived from `word_count` via [`crate::production_days`]; an
    /// operator may override it, and the override wins (the word count is
    /// never re-derived from days).
    pub duration_days: i64,
    pub word_count: i64,
}

/// Output of a successful intake validation: the candidate fields plus the
/// computed end date and the discount tier label snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedBooking {
    pub start_date: NaiveDate,
    /// `start_date + duration_days`, i.e. the day after the last occupied
    /// day. Stored as-is; the availability snapshot treats the stored span as
    /// inclusive, so confirmed bookings carry one day of padding.
    pub end_date: NaiveDate,
    pub duration_days: i64,
    pub word_count: i64,
    pub discount_label: Option<String>,
}
