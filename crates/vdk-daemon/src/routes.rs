//! Axum router and all HTTP handlers for vdk-daemon.
//!
//! `build_router` is the single entry point; `main.rs` calls it and attaches
//! middleware layers. All handlers are `pub(crate)` so the scenario tests in
//! `tests/` can compose the router directly.

use std::{convert::Infallible, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::{delete, get, post},
    Json, Router,
};
use futures_util::{Stream, StreamExt};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tracing::info;
use uuid::Uuid;
use vdk_db::{apply_status_change, load_index, submit, IntakeRequest, RecordStore, SubmitOutcome};
use vdk_scheduling::ScheduleError;

use crate::{
    api_types::{
        AvailabilityResponse, BlockoutRequest, CheckParams, CheckResponse, HealthResponse,
        RefusedResponse, StatusChangeRequest, StatusChangeResponse,
    },
    state::{AppState, BusMsg},
};

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the complete application router wired to the given shared state.
///
/// Middleware layers (CORS, tracing) are **not** applied here; `main.rs`
/// attaches them after this call so tests can use the bare router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/health", get(health))
        .route("/v1/availability", get(availability))
        .route("/v1/availability/check", get(availability_check))
        .route("/v1/bookings", post(bookings_create))
        .route("/v1/bookings/:id/status", post(booking_set_status))
        .route("/v1/blockouts", post(blockouts_create))
        .route("/v1/blockouts/:id", delete(blockouts_delete))
        .route("/v1/stream", get(stream))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

fn refused(status: StatusCode, code: &str, error: String) -> Response {
    (
        status,
        Json(RefusedResponse {
            error,
            code: code.to_string(),
        }),
    )
        .into_response()
}

/// Map a scheduling refusal to its HTTP status: overlaps are conflicts, the
/// rest are unprocessable input.
fn schedule_refusal(e: &ScheduleError) -> Response {
    let status = match e {
        ScheduleError::Overlap { .. } => StatusCode::CONFLICT,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    };
    refused(status, e.code(), e.to_string())
}

/// Map a store-layer failure. Typed refusals become client errors; anything
/// else is surfaced verbatim as a 500 for the operator to retry manually —
/// the daemon never retries on the caller's behalf.
fn store_failure(err: anyhow::Error) -> Response {
    if let Some(t) = err.downcast_ref::<vdk_db::TransitionRefused>() {
        return refused(StatusCode::CONFLICT, "TRANSITION_REFUSED", t.to_string());
    }
    if let Some(nf) = err.downcast_ref::<vdk_db::BookingNotFound>() {
        return refused(StatusCode::NOT_FOUND, "BOOKING_NOT_FOUND", nf.to_string());
    }
    if let Some(nf) = err.downcast_ref::<vdk_db::BlockoutNotFound>() {
        return refused(StatusCode::NOT_FOUND, "BLOCKOUT_NOT_FOUND", nf.to_string());
    }
    refused(
        StatusCode::INTERNAL_SERVER_ERROR,
        "STORE_UNAVAILABLE",
        format!("{err:#}"),
    )
}

fn today_local() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

// ---------------------------------------------------------------------------
// GET /v1/health
// ---------------------------------------------------------------------------

pub(crate) async fn health(State(st): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            ok: true,
            service: st.build.service,
            version: st.build.version,
        }),
    )
}

// ---------------------------------------------------------------------------
// GET /v1/availability
// ---------------------------------------------------------------------------

pub(crate) async fn availability(State(st): State<Arc<AppState>>) -> Response {
    match load_index(st.store.as_ref(), &st.scheduling).await {
        Ok(index) => (
            StatusCode::OK,
            Json(AvailabilityResponse {
                config_hash: st.config_hash.clone(),
                ranges: index.ranges().to_vec(),
            }),
        )
            .into_response(),
        Err(err) => store_failure(err),
    }
}

// ---------------------------------------------------------------------------
// GET /v1/availability/check
// ---------------------------------------------------------------------------

pub(crate) async fn availability_check(
    State(st): State<Arc<AppState>>,
    Query(params): Query<CheckParams>,
) -> Response {
    let start = match vdk_scheduling::parse_calendar_date(&params.start) {
        Ok(d) => d,
        Err(e) => return schedule_refusal(&e),
    };

    let index = match load_index(st.store.as_ref(), &st.scheduling).await {
        Ok(i) => i,
        Err(err) => return store_failure(err),
    };

    match index.is_range_free(start, params.days) {
        Ok(free) => (
            StatusCode::OK,
            Json(CheckResponse {
                free,
                conflicts: index.conflicts(start, params.days),
            }),
        )
            .into_response(),
        Err(e) => schedule_refusal(&e),
    }
}

// ---------------------------------------------------------------------------
// POST /v1/bookings
// ---------------------------------------------------------------------------

pub(crate) async fn bookings_create(
    State(st): State<Arc<AppState>>,
    Json(req): Json<IntakeRequest>,
) -> Response {
    match submit(st.store.as_ref(), &st.scheduling, today_local(), req).await {
        Ok(SubmitOutcome::Created(row)) => {
            info!(booking_id = %row.id, title = %row.book_title, "booking created");
            let _ = st.bus.send(BusMsg::BookingCreated {
                id: row.id,
                book_title: row.book_title.clone(),
                start_date: row.start_date,
                end_date: row.end_date,
                status: row.status,
            });
            (StatusCode::CREATED, Json(row)).into_response()
        }
        Ok(SubmitOutcome::Rejected(e)) => {
            info!(code = e.code(), "booking refused");
            schedule_refusal(&e)
        }
        Err(err) => store_failure(err),
    }
}

// ---------------------------------------------------------------------------
// POST /v1/bookings/:id/status
// ---------------------------------------------------------------------------

pub(crate) async fn booking_set_status(
    State(st): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusChangeRequest>,
) -> Response {
    let next = match vdk_schemas::BookingStatus::parse(&req.status) {
        Ok(s) => s,
        Err(e) => {
            return refused(
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_STATUS",
                e.to_string(),
            )
        }
    };

    let from = match st.store.fetch_booking(id).await {
        Ok(row) => row.status,
        Err(err) => return store_failure(err),
    };

    match apply_status_change(st.store.as_ref(), id, next).await {
        Ok(change) => {
            info!(booking_id = %id, from = from.as_str(), to = next.as_str(), "status changed");
            let _ = st.bus.send(BusMsg::StatusChanged {
                id,
                from,
                to: next,
            });
            (
                StatusCode::OK,
                Json(StatusChangeResponse {
                    booking: change.booking,
                    production: change.production,
                }),
            )
                .into_response()
        }
        Err(err) => store_failure(err),
    }
}

// ---------------------------------------------------------------------------
// POST /v1/blockouts
// ---------------------------------------------------------------------------

pub(crate) async fn blockouts_create(
    State(st): State<Arc<AppState>>,
    Json(req): Json<BlockoutRequest>,
) -> Response {
    let start = match vdk_scheduling::parse_calendar_date(&req.start_date) {
        Ok(d) => d,
        Err(e) => return schedule_refusal(&e),
    };
    let end = match vdk_scheduling::parse_calendar_date(&req.end_date) {
        Ok(d) => d,
        Err(e) => return schedule_refusal(&e),
    };

    match st.store.insert_blockout(start, end, req.reason).await {
        Ok(row) => {
            info!(blockout_id = %row.id, %start, %end, "blockout created");
            let _ = st.bus.send(BusMsg::LogLine {
                level: "INFO".to_string(),
                msg: format!("blockout {start}..{end} created"),
            });
            (StatusCode::CREATED, Json(row)).into_response()
        }
        Err(err) => store_failure(err),
    }
}

// ---------------------------------------------------------------------------
// DELETE /v1/blockouts/:id
// ---------------------------------------------------------------------------

pub(crate) async fn blockouts_delete(
    State(st): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Response {
    match st.store.delete_blockout(id).await {
        Ok(()) => {
            info!(blockout_id = %id, "blockout deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => store_failure(err),
    }
}

// ---------------------------------------------------------------------------
// GET /v1/stream  (SSE)
// ---------------------------------------------------------------------------

pub(crate) async fn stream(State(st): State<Arc<AppState>>) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert("Cache-Control", HeaderValue::from_static("no-cache"));
    headers.insert("Connection", HeaderValue::from_static("keep-alive"));

    let rx = st.bus.subscribe();
    let events = broadcast_to_sse(rx);

    (headers, Sse::new(events).keep_alive(KeepAlive::new())).into_response()
}

fn broadcast_to_sse(
    rx: broadcast::Receiver<BusMsg>,
) -> impl Stream<Item = Result<Event, Infallible>> {
    BroadcastStream::new(rx).filter_map(|msg| async move {
        match msg {
            Ok(m) => {
                let event_name = match &m {
                    BusMsg::Heartbeat { .. } => "heartbeat",
                    BusMsg::BookingCreated { .. } => "booking_created",
                    BusMsg::StatusChanged { .. } => "status_changed",
                    BusMsg::LogLine { .. } => "log",
                };
                let data = serde_json::to_string(&m).ok()?;
                Some(Ok(Event::default().event(event_name).data(data)))
            }
            Err(_) => None, // lagged / closed
        }
    })
}
