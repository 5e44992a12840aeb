//! In-memory store and fixtures for scenario tests.
//!
//! [`MemoryStore`] implements [`vdk_db::RecordStore`] with the same refusals
//! as the Postgres store (transition-table enforcement and the overlap guard
//! on calendar-blocking rows) so the full intake and lifecycle flows run
//! in-process without a database.

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;
use vdk_config::SchedulingConfig;
use vdk_db::{transition_guard, BlockoutNotFound, BookingNotFound, DatesTaken, RecordStore};
use vdk_schemas::{BlockoutRow, BookingRow, BookingStatus, NewBooking, ProductionRow};

pub mod fixtures;

#[derive(Debug, Default)]
struct Inner {
    bookings: Vec<BookingRow>,
    blockouts: Vec<BlockoutRow>,
    productions: Vec<ProductionRow>,
}

/// In-memory [`RecordStore`].
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    /// Statuses that don't participate in the overlap guard; mirrors the
    /// partial-index predicate of the Postgres exclusion constraint.
    non_blocking: Vec<BookingStatus>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            non_blocking: SchedulingConfig::sane_defaults().non_blocking_statuses,
        }
    }

    /// Seed a booking row directly, bypassing intake (for arranging test
    /// state).
    pub fn seed_booking(&self, row: BookingRow) {
        self.inner.lock().unwrap().bookings.push(row);
    }

    pub fn seed_blockout(&self, start: NaiveDate, end: NaiveDate) {
        self.inner.lock().unwrap().blockouts.push(BlockoutRow {
            id: Uuid::new_v4(),
            start_date: Some(start),
            end_date: Some(end),
            reason: None,
        });
    }

    pub fn production_count(&self) -> usize {
        self.inner.lock().unwrap().productions.len()
    }

    fn blocks_calendar(&self, b: &BookingRow) -> bool {
        !self.non_blocking.contains(&b.status)
    }
}

fn spans_intersect(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    // Both spans inclusive on both ends.
    a_start <= b_end && b_start <= a_end
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn fetch_booking_rows(&self) -> Result<Vec<BookingRow>> {
        Ok(self.inner.lock().unwrap().bookings.clone())
    }

    async fn fetch_blockout_rows(&self) -> Result<Vec<BlockoutRow>> {
        Ok(self.inner.lock().unwrap().blockouts.clone())
    }

    async fn insert_blockout(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        reason: Option<String>,
    ) -> Result<BlockoutRow> {
        let row = BlockoutRow {
            id: Uuid::new_v4(),
            start_date: Some(start),
            end_date: Some(end),
            reason,
        };
        self.inner.lock().unwrap().blockouts.push(row.clone());
        Ok(row)
    }

    async fn delete_blockout(&self, id: Uuid) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.blockouts.len();
        inner.blockouts.retain(|b| b.id != id);
        if inner.blockouts.len() == before {
            return Err(anyhow::Error::new(BlockoutNotFound(id)));
        }
        Ok(())
    }

    async fn fetch_booking(&self, id: Uuid) -> Result<BookingRow> {
        self.inner
            .lock()
            .unwrap()
            .bookings
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| anyhow::Error::new(BookingNotFound(id)))
    }

    async fn insert_booking(&self, booking: &NewBooking) -> Result<BookingRow> {
        let mut inner = self.inner.lock().unwrap();

        let row = BookingRow {
            id: Uuid::new_v4(),
            client_name: booking.client_name.clone(),
            email: booking.email.clone(),
            book_title: booking.book_title.clone(),
            word_count: booking.word_count,
            days_needed: booking.days_needed,
            start_date: Some(booking.start_date),
            end_date: Some(booking.end_date),
            narration_style: booking.narration_style,
            genre: booking.genre.clone(),
            notes: booking.notes.clone(),
            is_returning: booking.is_returning,
            discount_applied: booking.discount_applied.clone(),
            client_type: booking.client_type,
            status: booking.status,
            created_at_utc: Utc::now(),
        };

        if self.blocks_calendar(&row) {
            let collision = inner.bookings.iter().any(|b| {
                self.blocks_calendar(b)
                    && matches!(
                        (b.start_date, b.end_date),
                        (Some(s), Some(e)) if spans_intersect(s, e, booking.start_date, booking.end_date)
                    )
            });
            if collision {
                return Err(anyhow::Error::new(DatesTaken));
            }
        }

        inner.bookings.push(row.clone());
        Ok(row)
    }

    async fn set_booking_status(&self, id: Uuid, next: BookingStatus) -> Result<BookingRow> {
        let mut inner = self.inner.lock().unwrap();
        let row = inner
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(BookingNotFound(id))?;

        transition_guard(row.status, next)?;
        row.status = next;
        Ok(row.clone())
    }

    async fn ensure_production_record(&self, booking_id: Uuid) -> Result<ProductionRow> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(existing) = inner
            .productions
            .iter()
            .find(|p| p.booking_id == booking_id)
        {
            return Ok(existing.clone());
        }

        let book_title = inner
            .bookings
            .iter()
            .find(|b| b.id == booking_id)
            .map(|b| b.book_title.clone())
            .ok_or_else(|| anyhow!("no booking {} to track production for", booking_id))?;

        let record = ProductionRow {
            id: Uuid::new_v4(),
            booking_id,
            book_title,
            created_at_utc: Utc::now(),
        };
        inner.productions.push(record.clone());
        Ok(record)
    }
}

pub use fixtures::{d, seeded_booking, solo_request};
