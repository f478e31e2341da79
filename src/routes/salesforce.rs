//! List and submit handlers for the CSV-backed entities, plus the combined hub listing.

use axum::{extract::State, Json};
use serde_json::{json, Map, Value};

use super::{run_blocking, SubmitResponse};
use crate::entities::Entity;
use crate::error::AppError;
use crate::store::Row;
use crate::submission;
use crate::AppState;

async fn list_entity(state: &AppState, entity: Entity) -> Result<Json<Vec<Row>>, AppError> {
    let store = state.store(entity);
    let span = tracing::info_span!("csv_list", entity = %entity);
    let rows = run_blocking(span, move || store.list()).await?;
    Ok(Json(rows))
}

async fn submit_entity(
    state: &AppState,
    entity: Entity,
    fields: Map<String, Value>,
) -> Result<Json<SubmitResponse>, AppError> {
    let record = submission::prepare(entity, fields).inspect_err(|e| {
        tracing::info!("Rejected {} submission: {}", entity, e);
    })?;

    let store = state.store(entity);
    let span = tracing::info_span!("csv_append", entity = %entity);
    run_blocking(span, move || store.append(&record)).await?;

    tracing::info!("Recorded {} submission", entity);
    Ok(Json(SubmitResponse { success: true }))
}

/// Returns the list of submitted deals
#[utoipa::path(
    get,
    path = "/salesforce/deals",
    responses(
        (status = 200, description = "Deal rows in file order, or one all-null placeholder row", body = Vec<serde_json::Value>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_deals(State(state): State<AppState>) -> Result<Json<Vec<Row>>, AppError> {
    list_entity(&state, Entity::Deal).await
}

/// Handles deal form submissions
#[utoipa::path(
    post,
    path = "/salesforce/deals",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Deal recorded", body = SubmitResponse),
        (status = 400, description = "Opportunity name, sector or product missing")
    )
)]
#[tracing::instrument(skip(state, fields))]
pub async fn submit_deal(
    State(state): State<AppState>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<SubmitResponse>, AppError> {
    submit_entity(&state, Entity::Deal, fields).await
}

/// Returns the list of tranches
#[utoipa::path(
    get,
    path = "/salesforce/tranches",
    responses(
        (status = 200, description = "Tranche rows in file order, or one all-null placeholder row", body = Vec<serde_json::Value>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_tranches(State(state): State<AppState>) -> Result<Json<Vec<Row>>, AppError> {
    list_entity(&state, Entity::Tranche).await
}

/// Handles tranche form submissions
#[utoipa::path(
    post,
    path = "/salesforce/tranches",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Tranche recorded", body = SubmitResponse),
        (status = 400, description = "Tranche name missing")
    )
)]
#[tracing::instrument(skip(state, fields))]
pub async fn submit_tranche(
    State(state): State<AppState>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<SubmitResponse>, AppError> {
    submit_entity(&state, Entity::Tranche, fields).await
}

/// Returns the list of real estate assets
#[utoipa::path(
    get,
    path = "/salesforce/realestate",
    responses(
        (status = 200, description = "Asset rows in file order, or one all-null placeholder row", body = Vec<serde_json::Value>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_realestate(State(state): State<AppState>) -> Result<Json<Vec<Row>>, AppError> {
    list_entity(&state, Entity::Asset).await
}

/// Handles real estate asset form submissions
#[utoipa::path(
    post,
    path = "/salesforce/realestate",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Asset recorded", body = SubmitResponse),
        (status = 400, description = "Property name missing")
    )
)]
#[tracing::instrument(skip(state, fields))]
pub async fn submit_realestate(
    State(state): State<AppState>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<SubmitResponse>, AppError> {
    submit_entity(&state, Entity::Asset, fields).await
}

/// Returns the list of involved accounts
#[utoipa::path(
    get,
    path = "/salesforce/accounts",
    responses(
        (status = 200, description = "Account rows in file order, or one all-null placeholder row", body = Vec<serde_json::Value>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_accounts(State(state): State<AppState>) -> Result<Json<Vec<Row>>, AppError> {
    list_entity(&state, Entity::Account).await
}

/// Handles account form submissions.
///
/// A value picked in `account_lookup` becomes the account name when no name was typed;
/// the lookup itself is never stored.
#[utoipa::path(
    post,
    path = "/salesforce/accounts",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Account recorded", body = SubmitResponse),
        (status = 400, description = "Account name missing")
    )
)]
#[tracing::instrument(skip(state, fields))]
pub async fn submit_account(
    State(state): State<AppState>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<SubmitResponse>, AppError> {
    submit_entity(&state, Entity::Account, fields).await
}

/// Deals, tranches and assets in one table, each row tagged with `_type`
#[utoipa::path(
    get,
    path = "/salesforce/hub",
    responses(
        (status = 200, description = "Tagged rows, or a single `No data yet` row", body = Vec<serde_json::Value>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_hub(State(state): State<AppState>) -> Result<Json<Vec<Row>>, AppError> {
    let stores: Vec<_> = [Entity::Deal, Entity::Tranche, Entity::Asset]
        .into_iter()
        .map(|entity| (entity, state.store(entity)))
        .collect();

    let span = tracing::info_span!("csv_hub");
    let rows = run_blocking(span, move || {
        let mut combined = Vec::new();
        for (entity, store) in stores {
            for mut row in store.read_rows()?.unwrap_or_default() {
                row.insert("_type".to_string(), json!(entity.kind()));
                combined.push(row);
            }
        }
        Ok(combined)
    })
    .await?;

    if rows.is_empty() {
        let mut placeholder = Row::new();
        placeholder.insert("_type".to_string(), json!("No data yet"));
        return Ok(Json(vec![placeholder]));
    }
    Ok(Json(rows))
}
