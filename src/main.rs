//! Placemark server: the REST API over the SQLite bookmark store.
//!
//! Configuration comes from the environment: `PLACEMARK_DATA_DIR` for the
//! database location (falls back to the platform data directory) and
//! `PLACEMARK_PORT` for the listening port (default 5000).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::info;
use tracing_subscriber::EnvFilter;

use placemark::database::Database;
use placemark::http::build_router;

const DEFAULT_PORT: u16 = 5000;

fn db_path() -> PathBuf {
    let dir = match std::env::var("PLACEMARK_DATA_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("placemark"),
    };
    dir.join("placemark.db")
}

fn port() -> u16 {
    std::env::var("PLACEMARK_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let path = db_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create data directory");
    }
    let db = Database::open(&path).expect("Failed to open database");
    info!(path = %path.display(), "database ready");

    let state = Arc::new(Mutex::new(db));
    let router = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port()));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    info!(%addr, "placemark server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
    info!("server exited");
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown requested");
}
