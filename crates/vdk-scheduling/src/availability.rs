use chrono::NaiveDate;

use crate::dates::day_span;
use crate::error::ScheduleError;
use crate::types::BookedRange;

/// Upper bound on a single free/busy span query. Ten years of calendar is
/// beyond any real booking; anything larger is a caller bug, not a query.
pub const MAX_SPAN_DAYS: i64 = 3650;

/// Free/busy queries over a snapshot of booked ranges.
///
/// Purely a query structure: no interior mutability, no refresh path. When
/// the source collections change, callers rebuild the index from a fresh
/// snapshot; two builds from the same snapshot answer identically.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityIndex {
    ranges: Vec<BookedRange>,
}

impl AvailabilityIndex {
    pub fn build(ranges: Vec<BookedRange>) -> Self {
        Self { ranges }
    }

    pub fn ranges(&self) -> &[BookedRange] {
        &self.ranges
    }

    /// True iff no range covers `date`. Linear scan; the working set is a
    /// narrator's yearly calendar, tens of ranges at most.
    pub fn is_free(&self, date: NaiveDate) -> bool {
        !self.ranges.iter().any(|r| r.covers(date))
    }

    /// True iff all of `start, start+1, …, start+days-1` are free.
    ///
    /// `days` must be in `1..=MAX_SPAN_DAYS`; anything else is a caller bug,
    /// surfaced as `InvalidDuration` rather than an answer.
    pub fn is_range_free(&self, start: NaiveDate, days: i64) -> Result<bool, ScheduleError> {
        if days <= 0 || days > MAX_SPAN_DAYS {
            return Err(ScheduleError::InvalidDuration { days });
        }
        Ok(day_span(start, days).all(|d| self.is_free(d)))
    }

    /// The days within `[start, start+days)` already covered by a booked
    /// range. Empty for a non-positive `days`; clamped to `MAX_SPAN_DAYS`.
    pub fn conflicts(&self, start: NaiveDate, days: i64) -> Vec<NaiveDate> {
        day_span(start, days.clamp(0, MAX_SPAN_DAYS))
            .filter(|d| !self.is_free(*d))
            .collect()
    }
}
