use chrono::NaiveDate;

use crate::error::ScheduleError;

/// Parse a `YYYY-MM-DD` string into a calendar date by splitting it into
/// integer components and constructing the date explicitly.
///
/// The string is never handed to a timezone-aware parser: interpreting
/// `"2025-03-01"` as an instant shifts the displayed day backward in
/// negative-UTC-offset timezones. Day-granularity comparisons stay in a
/// fixed local frame by construction.
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate, ScheduleError> {
    let bad = |reason: &str| ScheduleError::InvalidDate {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let mut parts = input.trim().splitn(3, '-');
    let (y, m, d) = match (parts.next(), parts.next(), parts.next()) {
        (Some(y), Some(m), Some(d)) => (y, m, d),
        _ => return Err(bad("expected YYYY-MM-DD")),
    };

    // Reject anything beyond bare digits so a trailing time component
    // ("2025-03-01T00:00:00Z") cannot slip through as a day number.
    for p in [y, m, d] {
        if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad("expected YYYY-MM-DD"));
        }
    }

    let year: i32 = y.parse().map_err(|_| bad("year out of range"))?;
    let month: u32 = m.parse().map_err(|_| bad("month out of range"))?;
    let day: u32 = d.parse().map_err(|_| bad("day out of range"))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| bad("no such day in that month"))
}

/// `date + days`, `None` on calendar overflow.
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(chrono::Duration::days(days))
}

/// Signed whole days from `today` to `start` (negative when `start` is in
/// the past).
pub fn days_between(today: NaiveDate, start: NaiveDate) -> i64 {
    start.signed_duration_since(today).num_days()
}

/// The `days` consecutive calendar days beginning at `start`.
pub fn day_span(start: NaiveDate, days: i64) -> impl Iterator<Item = NaiveDate> {
    (0..days.max(0)).filter_map(move |i| add_days(start, i))
}
