use chrono::NaiveDate;
use thiserror::Error;

/// Everything the scheduling core can refuse.
///
/// The first three variants are user-facing and recoverable by correcting
/// input and resubmitting. `InvalidDuration` is a programming error (a
/// non-positive day count reached the range check). Store failures are not
/// represented here: they propagate unchanged from the store layer for the
/// caller to display and allow a manual retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("enter a word count before choosing a start date")]
    EmptyWordCount,

    #[error("start date {start} is before today ({today})")]
    PastStartDate { start: NaiveDate, today: NaiveDate },

    #[error("not enough consecutive free days from {start}; conflicting days: {days:?}")]
    Overlap {
        start: NaiveDate,
        /// The requested days already covered by a booked range.
        days: Vec<NaiveDate>,
    },

    #[error("duration must be at least 1 day, got {days}")]
    InvalidDuration { days: i64 },

    #[error("invalid calendar date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },
}

impl ScheduleError {
    /// Stable machine-readable code, used in API error bodies and logs.
    pub fn code(&self) -> &'static str {
        match self {
            ScheduleError::EmptyWordCount => "EMPTY_WORD_COUNT",
            ScheduleError::PastStartDate { .. } => "PAST_START_DATE",
            ScheduleError::Overlap { .. } => "OVERLAP",
            ScheduleError::InvalidDuration { .. } => "INVALID_DURATION",
            ScheduleError::InvalidDate { .. } => "INVALID_DATE",
        }
    }
}
