//! Share link handlers, including anonymous access by token.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::Response;

use drivehub_core::types::EntityId;
use drivehub_entity::File;
use drivehub_entity::share::ShareLink;

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::Session;
use crate::handlers::file::content_response;
use crate::state::AppState;

/// POST /api/files/{id}/share
pub async fn issue_share(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<EntityId>,
) -> Result<Json<ApiResponse<ShareLink>>, ApiError> {
    let link = state.shares.issue(&session, id).await?;
    Ok(Json(ApiResponse::ok(link)))
}

/// DELETE /api/files/{id}/share
pub async fn revoke_share(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<EntityId>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.shares.revoke(&session, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Share link revoked"))))
}

/// GET /api/shared/{token} (anonymous)
pub async fn resolve_share(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse<File>>, ApiError> {
    let file = state.shares.resolve(&token).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// GET /api/shared/{token}/download (anonymous)
pub async fn download_shared(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Response, ApiError> {
    let file = state.shares.resolve(&token).await?;
    let content = state.entries.read_content(&file).await?;
    content_response(&file, content)
}
