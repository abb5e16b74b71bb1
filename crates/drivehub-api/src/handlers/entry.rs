//! Entry lookup, rename/move, and lifecycle transitions.

use axum::Json;
use axum::extract::{Path, State};

use drivehub_core::types::EntityId;
use drivehub_entity::{Entry, EntryPatch};

use crate::dto::response::{ApiResponse, PurgeResponse};
use crate::error::ApiError;
use crate::extractors::Session;
use crate::state::AppState;

/// GET /api/entries/{id}
pub async fn get_entry(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<EntityId>,
) -> Result<Json<ApiResponse<Entry>>, ApiError> {
    let entry = state.entries.get(&session, id).await?;
    Ok(Json(ApiResponse::ok(entry)))
}

/// PATCH /api/entries/{id}
pub async fn update_entry(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<EntityId>,
    Json(patch): Json<EntryPatch>,
) -> Result<Json<ApiResponse<Entry>>, ApiError> {
    let entry = state.entries.update(&session, id, patch).await?;
    Ok(Json(ApiResponse::ok(entry)))
}

/// POST /api/entries/{id}/trash
pub async fn trash_entry(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<EntityId>,
) -> Result<Json<ApiResponse<Entry>>, ApiError> {
    let entry = state.lifecycle.trash(&session, id).await?;
    Ok(Json(ApiResponse::ok(entry)))
}

/// POST /api/entries/{id}/restore
pub async fn restore_entry(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<EntityId>,
) -> Result<Json<ApiResponse<Entry>>, ApiError> {
    let entry = state.lifecycle.restore(&session, id).await?;
    Ok(Json(ApiResponse::ok(entry)))
}

/// DELETE /api/entries/{id}
pub async fn purge_entry(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<EntityId>,
) -> Result<Json<ApiResponse<PurgeResponse>>, ApiError> {
    let outcome = state.lifecycle.purge(&session, id).await?;
    Ok(Json(ApiResponse::ok(outcome.into())))
}
