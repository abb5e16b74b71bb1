//! File content download.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;

use drivehub_core::error::AppError;
use drivehub_core::types::EntityId;
use drivehub_entity::File;
use drivehub_entity::file::DEFAULT_MIME_TYPE;

use crate::error::ApiError;
use crate::extractors::Session;
use crate::state::AppState;

/// GET /api/files/{id}/download
pub async fn download_file(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<EntityId>,
) -> Result<Response, ApiError> {
    let (file, content) = state.entries.download(&session, id).await?;
    content_response(&file, content)
}

/// Build an attachment response for `file`.
pub(crate) fn content_response(file: &File, content: Bytes) -> Result<Response, ApiError> {
    let content_type = file.mime_type.as_deref().unwrap_or(DEFAULT_MIME_TYPE);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.name.replace('"', "")),
        )
        .header(header::CONTENT_LENGTH, content.len())
        .body(Body::from(content))
        .map_err(|e| ApiError(AppError::internal(format!("Response build failed: {e}"))))
}
