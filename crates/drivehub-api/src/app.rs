//! Application builder: wires services, router and middleware into an Axum app.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use drivehub_core::config::AppConfig;
use drivehub_core::error::AppError;
use drivehub_core::traits::{QuotaSource, UploadTransport};
use drivehub_service::{
    EntityStore, EntryService, EventBus, FixedQuota, HierarchyProjector, LifecycleManager,
    MemoryTransport, ShareIssuer, StorageService, TokenGenerator, UploadOrchestrator,
};

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Wire every service onto one fresh entity store.
pub fn build_state(
    config: AppConfig,
    transport: Arc<dyn UploadTransport>,
    quota: Arc<dyn QuotaSource>,
) -> AppState {
    let store = EntityStore::new();
    let events = EventBus::default();

    let storage = StorageService::new(store.clone(), quota);
    let entries = EntryService::new(store.clone(), events.clone(), Arc::clone(&transport));
    let projector = HierarchyProjector::new(store.clone(), config.storage.recent_limit);
    let lifecycle = LifecycleManager::new(store.clone(), events.clone(), Arc::clone(&transport));
    let shares = ShareIssuer::new(
        store.clone(),
        events.clone(),
        TokenGenerator::new(config.share.token_bytes),
        config.share.base_url.clone(),
    );
    let uploads = UploadOrchestrator::new(
        store,
        events.clone(),
        transport,
        storage.clone(),
        config.storage.max_upload_size_bytes,
    );

    AppState {
        config: Arc::new(config),
        events,
        entries,
        projector,
        lifecycle,
        shares,
        uploads,
        storage,
    }
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Runs the DriveHub server with the in-memory transport and fixed quota.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting DriveHub server...");

    let transport: Arc<dyn UploadTransport> = Arc::new(MemoryTransport::new());
    let quota: Arc<dyn QuotaSource> = Arc::new(FixedQuota::new(config.storage.total_quota_bytes));
    tracing::info!(
        transport = transport.transport_type(),
        quota_bytes = config.storage.total_quota_bytes,
        "Storage collaborators ready"
    );

    let addr = config.server.bind_address();
    let app = build_app(build_state(config, transport, quota));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("DriveHub server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("DriveHub server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}
