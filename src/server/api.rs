//! Handlers for `/health`, `/api/todos`, and the devtools routes.
//!
//! Each handler receives [`AppState`] via [`axum::extract::State`] and
//! returns an axum [`Response`]. Error bodies are always
//! `{"error": <message>}`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::AppState;

// ── Request types ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct CreateTodoRequest {
    #[serde(default)]
    title: String,
}

#[derive(Deserialize)]
pub(super) struct UpdateTodoRequest {
    #[serde(default)]
    is_completed: bool,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a JSON error response body.
fn json_error(msg: impl std::fmt::Display) -> Json<serde_json::Value> {
    Json(json!({ "error": format!("{msg}") }))
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// GET /health
pub(super) async fn health() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /api/todos
pub(super) async fn list_todos(State(state): State<AppState>) -> Response {
    match state.service.list() {
        // An empty store serializes as `[]`, never null.
        Ok(todos) => (StatusCode::OK, Json(todos)).into_response(),
        Err(e) => {
            warn!("list todos failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, json_error(e)).into_response()
        }
    }
}

/// POST /api/todos
pub(super) async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(req)) = payload else {
        return (StatusCode::BAD_REQUEST, json_error("invalid request body")).into_response();
    };

    if req.title.is_empty() {
        return (StatusCode::BAD_REQUEST, json_error("title is required")).into_response();
    }

    match state.service.create(&req.title) {
        Ok(todo) => (StatusCode::CREATED, Json(todo)).into_response(),
        Err(e) => {
            warn!("create todo failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, json_error(e)).into_response()
        }
    }
}

/// PATCH /api/todos/{id}
pub(super) async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(req)) = payload else {
        return (StatusCode::BAD_REQUEST, json_error("invalid request body")).into_response();
    };

    match state.service.set_completed(&id, req.is_completed) {
        Ok(Some(todo)) => (StatusCode::OK, Json(todo)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, json_error("todo not found")).into_response(),
        Err(e) => {
            warn!(%id, "update todo failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, json_error(e)).into_response()
        }
    }
}

/// DELETE /api/todos/{id}
pub(super) async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.service.delete(&id) {
        // Unknown ids delete cleanly; the operation is idempotent.
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            warn!(%id, "delete todo failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, json_error(e)).into_response()
        }
    }
}

// ── Devtools ──────────────────────────────────────────────────────────────────

/// GET /_devtools/config — only routed when devtools is enabled.
pub(super) async fn devtools_config(State(state): State<AppState>) -> Response {
    match &state.config_snapshot {
        Some(snapshot) => (StatusCode::OK, Json((**snapshot).clone())).into_response(),
        // Unreachable through the router; kept as a guard for direct calls.
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// GET /_devtools/modules
pub(super) async fn devtools_modules(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        Json(json!({ "modules": state.module_names.as_ref() })),
    )
        .into_response()
}
