//! REST API for the server-backed variant.
//!
//! Five routes under `/api/bookmarks` mapping CRUD requests onto the
//! SQLite store. Each request is handled independently; faults are
//! logged and converted to generic `{"message": ...}` bodies so no
//! store detail leaks to the client.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::database::Database;
use crate::stores::sqlite_store::SqliteStore;
use crate::stores::BookmarkStoreTrait;
use crate::types::bookmark::{BookmarkDraft, BookmarkPatch, BookmarkQuery, SortKey};
use crate::types::errors::BookmarkError;

/// Shared handle to the backing database.
pub type SharedState = Arc<Mutex<Database>>;

/// Query parameters accepted by the list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub sort: Option<String>,
}

impl ListParams {
    fn into_query(self) -> BookmarkQuery {
        let sort = self
            .sort
            .as_deref()
            .map(SortKey::from_param)
            .unwrap_or_default();
        BookmarkQuery::new(self.search, sort)
    }
}

/// Builds the API router. Exposed separately from `serve` so tests can
/// drive it without a listener.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api/bookmarks", get(list_bookmarks).post(create_bookmark))
        .route(
            "/api/bookmarks/{id}",
            get(get_bookmark).put(update_bookmark).delete(delete_bookmark),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn message(text: &str) -> Json<Value> {
    Json(json!({ "message": text }))
}

async fn health() -> &'static str {
    "Placemark server is running"
}

/// GET /api/bookmarks?search=&sort=
async fn list_bookmarks(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let db = match state.lock() {
        Ok(db) => db,
        Err(e) => {
            error!("database lock poisoned: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, message("Server error")).into_response();
        }
    };

    let store = SqliteStore::new(db.connection());
    match store.list(&params.into_query()) {
        Ok(bookmarks) => (StatusCode::OK, Json(json!(bookmarks))).into_response(),
        Err(e) => {
            error!("list failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, message("Server error")).into_response()
        }
    }
}

/// GET /api/bookmarks/{id}
async fn get_bookmark(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let db = match state.lock() {
        Ok(db) => db,
        Err(e) => {
            error!("database lock poisoned: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, message("Error")).into_response();
        }
    };

    let store = SqliteStore::new(db.connection());
    match store.get(&id) {
        Ok(bookmark) => (StatusCode::OK, Json(json!(bookmark))).into_response(),
        Err(BookmarkError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, message("Bookmark not found")).into_response()
        }
        Err(e) => {
            error!("get {} failed: {}", id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, message("Error")).into_response()
        }
    }
}

/// POST /api/bookmarks
///
/// The body is decoded by hand so malformed payloads (including unknown
/// categories) come back as 400 rather than an extractor rejection.
async fn create_bookmark(
    State(state): State<SharedState>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let draft: BookmarkDraft = match serde_json::from_value(body) {
        Ok(draft) => draft,
        Err(e) => {
            error!("create rejected: {}", e);
            return (StatusCode::BAD_REQUEST, message("Error creating bookmark")).into_response();
        }
    };

    let db = match state.lock() {
        Ok(db) => db,
        Err(e) => {
            error!("database lock poisoned: {}", e);
            return (StatusCode::BAD_REQUEST, message("Error creating bookmark")).into_response();
        }
    };

    let mut store = SqliteStore::new(db.connection());
    match store.create(draft) {
        Ok(bookmark) => (StatusCode::CREATED, Json(json!(bookmark))).into_response(),
        Err(e) => {
            error!("create failed: {}", e);
            (StatusCode::BAD_REQUEST, message("Error creating bookmark")).into_response()
        }
    }
}

/// PUT /api/bookmarks/{id}
async fn update_bookmark(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let patch: BookmarkPatch = match serde_json::from_value(body) {
        Ok(patch) => patch,
        Err(e) => {
            error!("update {} rejected: {}", id, e);
            return (StatusCode::BAD_REQUEST, message("Error updating bookmark")).into_response();
        }
    };

    let db = match state.lock() {
        Ok(db) => db,
        Err(e) => {
            error!("database lock poisoned: {}", e);
            return (StatusCode::BAD_REQUEST, message("Error updating bookmark")).into_response();
        }
    };

    let mut store = SqliteStore::new(db.connection());
    match store.update(&id, patch) {
        Ok(bookmark) => (StatusCode::OK, Json(json!(bookmark))).into_response(),
        Err(BookmarkError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, message("Bookmark not found")).into_response()
        }
        Err(e) => {
            error!("update {} failed: {}", id, e);
            (StatusCode::BAD_REQUEST, message("Error updating bookmark")).into_response()
        }
    }
}

/// DELETE /api/bookmarks/{id}
async fn delete_bookmark(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let db = match state.lock() {
        Ok(db) => db,
        Err(e) => {
            error!("database lock poisoned: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, message("Error deleting bookmark"))
                .into_response();
        }
    };

    let mut store = SqliteStore::new(db.connection());
    match store.delete(&id) {
        Ok(()) => (StatusCode::OK, message("Bookmark deleted")).into_response(),
        Err(BookmarkError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, message("Bookmark not found")).into_response()
        }
        Err(e) => {
            error!("delete {} failed: {}", id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, message("Error deleting bookmark")).into_response()
        }
    }
}
