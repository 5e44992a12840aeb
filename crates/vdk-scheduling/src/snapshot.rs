use vdk_schemas::{BlockoutRow, BookingRow, BookingStatus};

use crate::types::{BookedRange, RangeSource};

/// Assemble the availability snapshot from freshly fetched rows.
///
/// - Rows missing either date are treated as not-loaded and skipped.
/// - Bookings whose status is in `non_blocking` (cancelled / parked /
///   externally-coordinated states, per config) do not block the calendar.
/// - Overlapping spans are kept as-is; the index treats a day as busy when
///   any range covers it.
pub fn booked_ranges_from_rows(
    bookings: &[BookingRow],
    blockouts: &[BlockoutRow],
    non_blocking: &[BookingStatus],
) -> Vec<BookedRange> {
    let mut out = Vec::with_capacity(bookings.len() + blockouts.len());

    for b in bookings {
        if non_blocking.contains(&b.status) {
            continue;
        }
        if let (Some(start), Some(end)) = (b.start_date, b.end_date) {
            out.push(BookedRange::new(start, end, RangeSource::Confirmed));
        }
    }

    for b in blockouts {
        if let (Some(start), Some(end)) = (b.start_date, b.end_date) {
            out.push(BookedRange::new(start, end, RangeSource::Blockout));
        }
    }

    out
}
