//! Route definitions for the DriveHub HTTP API.
//!
//! All routes are organized by resource and mounted under `/api`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with all routes, threading `state` through them.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(listing_routes())
        .merge(folder_routes())
        .merge(entry_routes())
        .merge(file_routes())
        .merge(share_routes())
        .merge(upload_routes())
        .merge(storage_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        // A batch carries many items; the per-item ceiling is enforced by the
        // upload orchestrator.
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}

/// Root, recent, trash, search
fn listing_routes() -> Router<AppState> {
    Router::new()
        .route("/root", get(handlers::listing::root_listing))
        .route("/recent", get(handlers::listing::recent_files))
        .route("/trash", get(handlers::listing::trash_listing))
        .route("/search", get(handlers::listing::search))
}

/// Folder creation, contents, breadcrumbs
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/folders", post(handlers::folder::create_folder))
        .route("/folders/{id}", get(handlers::folder::folder_contents))
        .route("/folders/{id}/path", get(handlers::folder::folder_path))
}

/// Lookup, rename/move, trash, restore, purge
fn entry_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/entries/{id}",
            get(handlers::entry::get_entry)
                .patch(handlers::entry::update_entry)
                .delete(handlers::entry::purge_entry),
        )
        .route("/entries/{id}/trash", post(handlers::entry::trash_entry))
        .route("/entries/{id}/restore", post(handlers::entry::restore_entry))
}

/// File content
fn file_routes() -> Router<AppState> {
    Router::new().route("/files/{id}/download", get(handlers::file::download_file))
}

/// Share links and anonymous access
fn share_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/files/{id}/share",
            post(handlers::share::issue_share).delete(handlers::share::revoke_share),
        )
        .route("/shared/{token}", get(handlers::share::resolve_share))
        .route(
            "/shared/{token}/download",
            get(handlers::share::download_shared),
        )
}

/// Batch upload
fn upload_routes() -> Router<AppState> {
    Router::new().route("/uploads", post(handlers::upload::upload_batch))
}

/// Usage summary
fn storage_routes() -> Router<AppState> {
    Router::new().route("/storage/usage", get(handlers::storage::usage))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
