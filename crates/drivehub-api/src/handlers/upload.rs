//! Batch upload handler.

use axum::Json;
use axum::extract::{Multipart, State};

use drivehub_core::types::EntityId;
use drivehub_entity::file::DEFAULT_MIME_TYPE;
use drivehub_entity::upload::{BatchReport, UploadItem};

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::Session;
use crate::state::AppState;

/// POST /api/uploads
///
/// Multipart body: any number of `file` parts plus an optional `folder_id`
/// part naming the target folder for all of them. Items are processed one
/// at a time in part order; per-item failures are reported in the batch
/// report rather than as an error response.
pub async fn upload_batch(
    State(state): State<AppState>,
    session: Session,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<BatchReport>>, ApiError> {
    let mut folder_id: Option<EntityId> = None;
    let mut items: Vec<UploadItem> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "folder_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::validation(format!("Read error: {e}")))?;
                if !text.trim().is_empty() {
                    folder_id = Some(
                        text.trim()
                            .parse()
                            .map_err(|_| ApiError::validation("Invalid folder_id"))?,
                    );
                }
            }
            "file" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                // Generic types from the client are replaced by name inference.
                let mime_type = field
                    .content_type()
                    .filter(|m| *m != DEFAULT_MIME_TYPE)
                    .map(String::from);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::validation(format!("Read error: {e}")))?;

                let mut item = UploadItem::new(data, file_name, None);
                if let Some(mime_type) = mime_type {
                    item = item.with_mime_type(mime_type);
                }
                items.push(item);
            }
            _ => {}
        }
    }

    if items.is_empty() {
        return Err(ApiError::validation("At least one file part is required"));
    }
    for item in &mut items {
        item.folder_id = folder_id;
    }

    let report = state.uploads.run_batch_simple(&session, items).await;
    Ok(Json(ApiResponse::ok(report)))
}
