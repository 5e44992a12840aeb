//! Shared runtime state for vdk-daemon.
//!
//! Handlers receive `State<Arc<AppState>>` from Axum; this module owns
//! nothing async itself. The scheduling config is loaded once at boot and
//! immutable for the process lifetime — operators restart the daemon to pick
//! up a new tier table.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;
use vdk_config::SchedulingConfig;
use vdk_db::RecordStore;
use vdk_schemas::BookingStatus;

/// Messages broadcast over the internal event bus and surfaced as SSE
/// events to the admin dashboard.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BusMsg {
    Heartbeat {
        ts_millis: i64,
    },
    BookingCreated {
        id: Uuid,
        book_title: String,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        status: BookingStatus,
    },
    StatusChanged {
        id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
    },
    LogLine {
        level: String,
        msg: String,
    },
}

/// Static build metadata included in health responses.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuildInfo {
    pub service: &'static str,
    pub version: &'static str,
}

/// Cloneable (Arc) handle shared across all Axum handlers.
pub struct AppState {
    /// Broadcast bus for SSE.
    pub bus: broadcast::Sender<BusMsg>,
    pub build: BuildInfo,
    pub scheduling: SchedulingConfig,
    /// Hash of the layered config the scheduling values came from; echoed in
    /// availability responses so quotes are attributable to a tier table.
    pub config_hash: String,
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RecordStore>,
        scheduling: SchedulingConfig,
        config_hash: String,
    ) -> Self {
        let (bus, _rx) = broadcast::channel::<BusMsg>(1024);

        Self {
            bus,
            build: BuildInfo {
                service: "vdk-daemon",
                version: env!("CARGO_PKG_VERSION"),
            },
            scheduling,
            config_hash,
            store,
        }
    }
}

/// Spawn a background task that emits a heartbeat SSE every `interval`.
pub fn spawn_heartbeat(bus: broadcast::Sender<BusMsg>, interval: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let ts = chrono::Utc::now().timestamp_millis();
            let _ = bus.send(BusMsg::Heartbeat { ts_millis: ts });
        }
    });
}
