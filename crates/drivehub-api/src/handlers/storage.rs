//! Storage usage handler.

use axum::Json;
use axum::extract::State;

use drivehub_entity::storage::StorageUsage;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::Session;
use crate::state::AppState;

/// GET /api/storage/usage
pub async fn usage(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<ApiResponse<StorageUsage>>, ApiError> {
    let usage = state.storage.usage(&session).await?;
    Ok(Json(ApiResponse::ok(usage)))
}
