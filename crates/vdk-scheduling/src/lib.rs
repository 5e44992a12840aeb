//! Booking availability and discount core.
//!
//! Everything in this crate is pure and synchronous: callers fetch rows from
//! the store, build a snapshot with [`booked_ranges_from_rows`], construct an
//! [`AvailabilityIndex`], and run the intake gate. Refreshing availability
//! means rebuilding the index from a fresh snapshot; there is no incremental
//! update path.

mod availability;
mod dates;
mod discount;
mod error;
mod estimate;
mod intake;
mod snapshot;
mod types;

pub use availability::{AvailabilityIndex, MAX_SPAN_DAYS};
pub use dates::{add_days, day_span, days_between, parse_calendar_date};
pub use discount::select_tier;
pub use error::ScheduleError;
pub use estimate::production_days;
pub use intake::validate;
pub use snapshot::booked_ranges_from_rows;
pub use types::{BookedRange, BookingCandidate, RangeSource, ValidatedBooking};
