use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use vdk_config::SchedulingConfig;
use vdk_schemas::{ClientType, NarrationStyle, NewBooking};
use vdk_scheduling::{
    booked_ranges_from_rows, production_days, validate, AvailabilityIndex, BookingCandidate,
    ScheduleError,
};

use crate::store::{DatesTaken, RecordStore};

/// A booking request as submitted by the scheduler form.
///
/// `start_date` arrives as the raw `YYYY-MM-DD` string and is parsed by
/// component here, the one place a date crosses from wire text into a
/// calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeRequest {
    pub client_name: String,
    pub email: String,
    pub book_title: String,
    pub word_count: i64,
    /// Operator override for the derived estimate; when absent the duration
    /// is `ceil(word_count / words_per_day)`.
    pub days_needed: Option<i64>,
    pub start_date: String,
    pub narration_style: NarrationStyle,
    pub genre: String,
    pub notes: Option<String>,
    pub is_returning: bool,
    pub client_type: ClientType,
}

/// What became of a submission. Store failures are `Err`; business-rule
/// refusals are data, so callers can map them to user-facing responses.
#[derive(Debug)]
pub enum SubmitOutcome {
    Created(vdk_schemas::BookingRow),
    Rejected(ScheduleError),
}

/// Fetch both source collections and build a fresh availability index.
pub async fn load_index(
    store: &dyn RecordStore,
    cfg: &SchedulingConfig,
) -> Result<AvailabilityIndex> {
    let bookings = store.fetch_booking_rows().await?;
    let blockouts = store.fetch_blockout_rows().await?;
    let ranges = booked_ranges_from_rows(&bookings, &blockouts, &cfg.non_blocking_statuses);
    Ok(AvailabilityIndex::build(ranges))
}

/// The intake pipeline: fetch ranges → build index → derive duration →
/// validate → persist with the style-routed initial status.
///
/// The snapshot is re-fetched on every submission; between snapshot and
/// insert the storage-layer exclusion guard is the only defense against a
/// concurrent writer, and its refusal surfaces as an overlap rejection.
pub async fn submit(
    store: &dyn RecordStore,
    cfg: &SchedulingConfig,
    today: NaiveDate,
    req: IntakeRequest,
) -> Result<SubmitOutcome> {
    let start_date = match vdk_scheduling::parse_calendar_date(&req.start_date) {
        Ok(d) => d,
        Err(e) => return Ok(SubmitOutcome::Rejected(e)),
    };

    let duration_days = match req.days_needed {
        Some(days) => days,
        None => production_days(req.word_count, cfg.words_per_day),
    };

    let index = load_index(store, cfg).await?;

    let candidate = BookingCandidate {
        start_date,
        duration_days,
        word_count: req.word_count,
    };

    let validated = match validate(&candidate, &index, today, &cfg.discount_tiers) {
        Ok(v) => v,
        Err(e) => return Ok(SubmitOutcome::Rejected(e)),
    };

    let new_booking = NewBooking {
        client_name: req.client_name,
        email: req.email,
        book_title: req.book_title,
        word_count: validated.word_count,
        days_needed: validated.duration_days,
        start_date: validated.start_date,
        end_date: validated.end_date,
        narration_style: req.narration_style,
        genre: req.genre,
        notes: req.notes,
        is_returning: req.is_returning,
        discount_applied: validated.discount_label.clone(),
        client_type: req.client_type,
        status: cfg.initial_status(req.narration_style),
    };

    match store.insert_booking(&new_booking).await {
        Ok(row) => Ok(SubmitOutcome::Created(row)),
        Err(err) if err.downcast_ref::<DatesTaken>().is_some() => {
            Ok(SubmitOutcome::Rejected(ScheduleError::Overlap {
                start: validated.start_date,
                days: Vec::new(),
            }))
        }
        Err(err) => Err(err),
    }
}
