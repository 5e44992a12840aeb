use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;
use vdk_schemas::{BlockoutRow, BookingRow, BookingStatus, NewBooking, ProductionRow};

/// Capability contract over the hosted record store.
///
/// The Postgres implementation lives in this crate ([`crate::PgStore`]); the
/// in-memory implementation for tests lives in `vdk-testkit`. Store failures
/// propagate unchanged (no retry, no masking) so the caller can surface them
/// and let the user retry manually.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All booking rows, every status included. Callers filter with the
    /// configured non-blocking list when building availability.
    async fn fetch_booking_rows(&self) -> Result<Vec<BookingRow>>;

    async fn fetch_blockout_rows(&self) -> Result<Vec<BlockoutRow>>;

    /// Record a manual block-out (vacation, conference, maintenance).
    async fn insert_blockout(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        reason: Option<String>,
    ) -> Result<BlockoutRow>;

    /// Remove a block-out, releasing its days on the next snapshot rebuild.
    async fn delete_blockout(&self, id: Uuid) -> Result<()>;

    async fn fetch_booking(&self, id: Uuid) -> Result<BookingRow>;

    /// Persist a validated intake. Implementations reject a row whose span
    /// collides with an existing calendar-blocking booking with
    /// [`DatesTaken`], closing the read-then-write race at the storage
    /// layer.
    async fn insert_booking(&self, booking: &NewBooking) -> Result<BookingRow>;

    /// Single-field status write, guarded by the transition table
    /// ([`TransitionRefused`] when the table forbids it).
    async fn set_booking_status(&self, id: Uuid, next: BookingStatus) -> Result<BookingRow>;

    /// Create the companion production-tracking record if one doesn't
    /// already exist, keyed by the booking id. Idempotent.
    async fn ensure_production_record(&self, booking_id: Uuid) -> Result<ProductionRow>;
}

/// The storage-layer overlap guard fired: another writer took the dates
/// between snapshot load and insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("requested dates are no longer available")]
pub struct DatesTaken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("booking {0} not found")]
pub struct BookingNotFound(pub Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("blockout {0} not found")]
pub struct BlockoutNotFound(pub Uuid);

/// A status write was refused by the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("TRANSITION_REFUSED: {from:?} -> {to:?} is not a valid booking transition")]
pub struct TransitionRefused {
    pub from: BookingStatus,
    pub to: BookingStatus,
}

/// Shared legality check used by every [`RecordStore`] implementation before
/// a status write.
pub fn transition_guard(from: BookingStatus, to: BookingStatus) -> Result<(), TransitionRefused> {
    if to.can_follow(from) {
        Ok(())
    } else {
        Err(TransitionRefused { from, to })
    }
}

/// Outcome of an operator-triggered status change.
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub booking: BookingRow,
    /// Present when the change entered `Production` and the companion record
    /// was ensured.
    pub production: Option<ProductionRow>,
}

/// Apply a status change and its one derived side effect: entering
/// `Production` ensures the companion production record exists.
pub async fn apply_status_change(
    store: &dyn RecordStore,
    id: Uuid,
    next: BookingStatus,
) -> Result<StatusChange> {
    let booking = store.set_booking_status(id, next).await?;

    let production = if next == BookingStatus::Production {
        Some(store.ensure_production_record(booking.id).await?)
    } else {
        None
    };

    Ok(StatusChange {
        booking,
        production,
    })
}
