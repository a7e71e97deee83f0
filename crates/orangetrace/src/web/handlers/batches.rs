//! `/batches`: farmer registration, marketplace listing and traceability lookup.

use crate::model::{Batch, BatchCreate, BatchId, BatchUpdate};
use crate::web::error::ApiError;
use crate::web::extractors::UserIdentity;
use crate::web::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub variety: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBatchResponse {
    pub batch_id: BatchId,
}

pub async fn register_batch(
    State(state): State<AppState>,
    UserIdentity(farmer): UserIdentity,
    body: Result<Json<BatchCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterBatchResponse>), ApiError> {
    let Json(form) = body?;
    let batch_id = state.batches.register_batch(farmer, form).await?;
    Ok((StatusCode::CREATED, Json(RegisterBatchResponse { batch_id })))
}

/// Batches for sale, optionally of one variety.
pub async fn list_batches(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Batch>>, ApiError> {
    let variety = query.variety.filter(|v| !v.trim().is_empty());
    Ok(Json(state.batches.list_available(variety).await?))
}

/// Public lookup behind the QR code on each crate.
pub async fn get_batch(
    State(state): State<AppState>,
    Path(batch_id): Path<String>,
) -> Result<Json<Batch>, ApiError> {
    Ok(Json(state.batches.get_batch(batch_id.into()).await?))
}

pub async fn update_batch(
    State(state): State<AppState>,
    UserIdentity(farmer): UserIdentity,
    Path(batch_id): Path<String>,
    body: Result<Json<BatchUpdate>, JsonRejection>,
) -> Result<Json<Batch>, ApiError> {
    let Json(changes) = body?;
    let batch = state
        .batches
        .update_batch(farmer, batch_id.into(), changes)
        .await?;
    Ok(Json(batch))
}
