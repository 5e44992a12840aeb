//! vdk-daemon entry point.
//!
//! This file is intentionally thin: it sets up tracing, loads config, opens
//! the store, wires middleware, and starts the HTTP server. All route
//! handlers live in `routes.rs`; all shared state types live in `state.rs`.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};
use vdk_daemon::{routes, state};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env.local if present (dev convenience). Silent if the file does
    // not exist — production injects env vars directly.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let loaded = load_config()?;
    let scheduling = loaded.scheduling()?;
    info!(config_hash = %loaded.config_hash, "config loaded");

    let pool = vdk_db::connect_from_env().await?;
    let store = Arc::new(vdk_db::PgStore::new(pool));

    let shared = Arc::new(state::AppState::new(
        store,
        scheduling,
        loaded.config_hash.clone(),
    ));

    state::spawn_heartbeat(shared.bus.clone(), Duration::from_secs(1));

    let app = routes::build_router(Arc::clone(&shared))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_localhost_only());

    let addr = bind_addr_from_env().unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8790)));
    info!("vdk-daemon listening on http://{}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app)
        .await
        .context("server crashed")?;

    Ok(())
}

/// Layered YAML paths come from VDK_CONFIG (comma-separated, merge order);
/// without it the built-in defaults apply.
fn load_config() -> Result<vdk_config::LoadedConfig> {
    match std::env::var("VDK_CONFIG") {
        Ok(paths) => {
            let parts: Vec<&str> = paths.split(',').map(str::trim).collect();
            vdk_config::load_layered_yaml(&parts)
        }
        Err(_) => Ok(vdk_config::LoadedConfig::defaults()),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

fn bind_addr_from_env() -> Option<SocketAddr> {
    std::env::var("VDK_DAEMON_ADDR").ok()?.parse().ok()
}

/// CORS: allow only localhost origins (the admin UI dev servers).
fn cors_localhost_only() -> CorsLayer {
    let allowed_origins = [
        "http://localhost",
        "http://127.0.0.1",
        "http://localhost:3000",
        "http://127.0.0.1:3000",
        "http://localhost:5173",
        "http://127.0.0.1:5173",
    ];

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(tower_http::cors::Any)
}
