//! `/widgets.json` and `/apps.json` for both backends.

use axum::{extract::State, Json};
use serde_json::Value;
use std::path::PathBuf;

use super::run_blocking;
use crate::error::AppError;
use crate::{AppState, DocumentState};

/// Read and parse a JSON document from disk. Any failure is reported with its underlying message.
pub async fn load_json_file(path: PathBuf) -> Result<Value, AppError> {
    let span = tracing::info_span!("load_json_file", path = %path.display());
    run_blocking(span, move || {
        let raw = std::fs::read_to_string(&path).map_err(|e| {
            tracing::error!("Failed to read {}: {}", path.display(), e);
            AppError::ConfigLoad(e.to_string())
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            tracing::error!("Failed to parse {}: {}", path.display(), e);
            AppError::ConfigLoad(e.to_string())
        })
    })
    .await
}

/// Registered widget descriptors keyed by widget id
#[utoipa::path(
    get,
    path = "/widgets.json",
    responses(
        (status = 200, description = "Widget id to descriptor", body = serde_json::Value)
    )
)]
pub async fn get_widgets(State(state): State<AppState>) -> Json<Value> {
    Json(state.registry.list())
}

/// Apps configuration file for the workspace
#[utoipa::path(
    get,
    path = "/apps.json",
    responses(
        (status = 200, description = "Apps descriptor", body = serde_json::Value),
        (status = 500, description = "Apps file missing or malformed")
    )
)]
pub async fn get_apps(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    load_json_file(state.apps_file.clone()).await.map(Json)
}

/// Widget descriptors for the document backend, read from disk on every request
#[utoipa::path(
    get,
    path = "/widgets.json",
    responses(
        (status = 200, description = "Widget descriptors", body = serde_json::Value),
        (status = 500, description = "Widgets file missing or malformed")
    )
)]
pub async fn get_document_widgets(
    State(state): State<DocumentState>,
) -> Result<Json<Value>, AppError> {
    load_json_file(state.widgets_file.clone()).await.map(Json)
}

#[utoipa::path(
    get,
    path = "/apps.json",
    responses(
        (status = 200, description = "Apps descriptor", body = serde_json::Value),
        (status = 500, description = "Apps file missing or malformed")
    )
)]
pub async fn get_document_apps(
    State(state): State<DocumentState>,
) -> Result<Json<Value>, AppError> {
    load_json_file(state.apps_file.clone()).await.map(Json)
}
