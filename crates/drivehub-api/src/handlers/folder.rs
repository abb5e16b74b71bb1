//! Folder creation and folder views.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use drivehub_core::types::EntityId;
use drivehub_entity::Folder;
use drivehub_service::projection::{FolderContents, FolderPath};

use crate::dto::request::CreateFolderRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::Session;
use crate::state::AppState;

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<CreateFolderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Folder>>), ApiError> {
    let folder = state
        .entries
        .create_folder(&session, req.name, req.parent_id)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(folder))))
}

/// GET /api/folders/{id}
pub async fn folder_contents(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<EntityId>,
) -> Result<Json<ApiResponse<FolderContents>>, ApiError> {
    let contents = state.projector.folder_contents(&session, id).await?;
    Ok(Json(ApiResponse::ok(contents)))
}

/// GET /api/folders/{id}/path
pub async fn folder_path(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<EntityId>,
) -> Result<Json<ApiResponse<FolderPath>>, ApiError> {
    let path = state.projector.folder_path(&session, id).await?;
    Ok(Json(ApiResponse::ok(path)))
}
