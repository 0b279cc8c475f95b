//! REST API module: routing, shared state, and handlers.
//!
//! Routes follow the conventional `/api` prefix with JSON bodies; the
//! server-rendered page and its form endpoints from [`crate::web`] share the
//! same router and state.

pub mod categories;
pub mod error;
pub mod todos;

pub use error::ApiError;

use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::storage::Storage;
use crate::web;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
}

/// Build the application router.
pub fn router(storage: Storage) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/todos", get(todos::list_todos).post(todos::create_todo))
        .route(
            "/api/todos/:id",
            put(todos::update_todo).delete(todos::delete_todo),
        )
        .route(
            "/api/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/api/categories/:id",
            put(categories::update_category).delete(categories::delete_category),
        )
        .route("/", get(web::index))
        .route("/add", post(web::add_todo))
        .route("/toggle", post(web::toggle_todo))
        .route("/delete", post(web::delete_todo))
        .fallback(not_found)
        .with_state(AppState { storage })
}

/// `GET /api/health`
async fn health() -> Json<Value> {
    Json(json!({ "status": "OK", "message": "taskdeck is running" }))
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Route not found" })))
}
