//! Root, recent, trash and search listings.

use axum::Json;
use axum::extract::{Query, State};

use drivehub_entity::{Entry, File};
use drivehub_service::projection::RootListing;

use crate::dto::request::{RecentQuery, SearchQuery};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::Session;
use crate::state::AppState;

/// GET /api/root
pub async fn root_listing(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<ApiResponse<RootListing>>, ApiError> {
    let listing = state.projector.root_listing(&session).await?;
    Ok(Json(ApiResponse::ok(listing)))
}

/// GET /api/recent?limit=N
pub async fn recent_files(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<RecentQuery>,
) -> Result<Json<ApiResponse<Vec<File>>>, ApiError> {
    let files = state.projector.recent_files(&session, query.limit).await?;
    Ok(Json(ApiResponse::ok(files)))
}

/// GET /api/trash
pub async fn trash_listing(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<ApiResponse<Vec<Entry>>>, ApiError> {
    let entries = state.projector.trash_listing(&session).await?;
    Ok(Json(ApiResponse::ok(entries)))
}

/// GET /api/search?q=...
pub async fn search(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<File>>>, ApiError> {
    let files = state.projector.search(&session, &query.q).await?;
    Ok(Json(ApiResponse::ok(files)))
}
