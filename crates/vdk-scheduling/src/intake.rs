use chrono::NaiveDate;
use vdk_schemas::DiscountTier;

use crate::availability::AvailabilityIndex;
use crate::dates::add_days;
use crate::discount::select_tier;
use crate::error::ScheduleError;
use crate::types::{BookingCandidate, ValidatedBooking};

/// Gate a candidate submission against the business rules.
///
/// Checks run in order and the first failure wins (no error accumulation):
///
/// 1. `word_count > 0`, else [`ScheduleError::EmptyWordCount`];
/// 2. `start_date >= today`, else [`ScheduleError::PastStartDate`] (the UI
///    makes past dates unselectable, but the gate re-checks);
/// 3. every day of `[start, start + duration)` is free, else
///    [`ScheduleError::Overlap`] listing the conflicting days.
///
/// Side-effect free; persisting the returned record is the store's job.
pub fn validate(
    candidate: &BookingCandidate,
    index: &AvailabilityIndex,
    today: NaiveDate,
    tiers: &[DiscountTier],
) -> Result<ValidatedBooking, ScheduleError> {
    if candidate.word_count <= 0 {
        return Err(ScheduleError::EmptyWordCount);
    }

    if candidate.start_date < today {
        return Err(ScheduleError::PastStartDate {
            start: candidate.start_date,
            today,
        });
    }

    if !index.is_range_free(candidate.start_date, candidate.duration_days)? {
        return Err(ScheduleError::Overlap {
            start: candidate.start_date,
            days: index.conflicts(candidate.start_date, candidate.duration_days),
        });
    }

    let end_date = add_days(candidate.start_date, candidate.duration_days).ok_or(
        ScheduleError::InvalidDuration {
            days: candidate.duration_days,
        },
    )?;

    let discount_label =
        select_tier(today, candidate.start_date, tiers).map(|t| t.label.clone());

    Ok(ValidatedBooking {
        start_date: candidate.start_date,
        end_date,
        duration_days: candidate.duration_days,
        word_count: candidate.word_count,
        discount_label,
    })
}
