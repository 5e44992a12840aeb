use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod status;

pub use status::{BookingStatus, ClientType, NarrationStyle};

/// A booking row as loaded from the hosted store.
///
/// `start_date` / `end_date` are optional on purpose: the store legitimately
/// holds half-entered rows (lead captured, dates not yet set), and the
/// availability snapshot must skip those rather than fail the whole load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRow {
    pub id: Uuid,
    pub client_name: String,
    pub email: String,
    pub book_title: String,
    pub word_count: i64,
    pub days_needed: i64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub narration_style: NarrationStyle,
    pub genre: String,
    pub notes: Option<String>,
    pub is_returning: bool,
    /// Tier label snapshot taken at intake time (e.g. "6%"); `None` when no
    /// tier applied.
    pub discount_applied: Option<String>,
    pub client_type: ClientType,
    pub status: BookingStatus,
    pub created_at_utc: DateTime<Utc>,
}

/// Insert shape for a validated booking. Dates are required here: intake
/// never persists a booking without a computed span.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBooking {
    pub client_name: String,
    pub email: String,
    pub book_title: String,
    pub word_count: i64,
    pub days_needed: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub narration_style: NarrationStyle,
    pub genre: String,
    pub notes: Option<String>,
    pub is_returning: bool,
    pub discount_applied: Option<String>,
    pub client_type: ClientType,
    pub status: BookingStatus,
}

/// A manual block-out row (vacation, conference, studio maintenance).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockoutRow {
    pub id: Uuid,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub reason: Option<String>,
}

/// Companion production-tracking record, created when a booking first moves
/// into `Production`. Keyed one-to-one by `booking_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionRow {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub book_title: String,
    pub created_at_utc: DateTime<Utc>,
}

/// One advance-booking discount step: unlocked when the candidate start date
/// is at least `min_days_out` days from today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountTier {
    pub min_days_out: i64,
    pub label: String,
}

impl DiscountTier {
    pub fn new(min_days_out: i64, label: impl Into<String>) -> Self {
        Self {
            min_days_out,
            label: label.into(),
        }
    }
}
