//! Request/response bodies for the HTTP API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use vdk_schemas::{BookingRow, ProductionRow};
use vdk_scheduling::BookedRange;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: &'static str,
    pub version: &'static str,
}

/// Calendar snapshot: every span that currently blocks the calendar, plus
/// the config hash the snapshot was filtered with.
#[derive(Debug, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub config_hash: String,
    pub ranges: Vec<BookedRange>,
}

#[derive(Debug, Deserialize)]
pub struct CheckParams {
    pub start: String,
    pub days: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResponse {
    pub free: bool,
    pub conflicts: Vec<NaiveDate>,
}

/// Error body for every refused request. `code` is stable and
/// machine-matchable; `error` is the human-readable rendering.
#[derive(Debug, Serialize, Deserialize)]
pub struct RefusedResponse {
    pub error: String,
    pub code: String,
}

/// Manual block-out creation. Dates arrive as `YYYY-MM-DD` strings and are
/// parsed by component, like every date crossing the wire.
#[derive(Debug, Serialize, Deserialize)]
pub struct BlockoutRequest {
    pub start_date: String,
    pub end_date: String,
    pub reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusChangeRequest {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusChangeResponse {
    pub booking: BookingRow,
    /// Set when the change entered production and the companion record was
    /// ensured.
    pub production: Option<ProductionRow>,
}
