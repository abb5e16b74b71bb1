//! Single-lane batch upload orchestrator.
//!
//! Items are attempted strictly one at a time in submission order. Each item
//! walks `Queued -> Uploading -> Succeeded | Failed`, or goes straight from
//! `Queued` to `Cancelled` once the batch token fires. A failed item never
//! stops the batch, and exactly one `BatchCompleted` closes the stream.
//!
//! Clones of one orchestrator share a single upload lane: a batch (or a
//! retried item) holds it while transferring, and later batches wait their
//! turn in arrival order.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, trace, warn};
use uuid::Uuid;

use drivehub_core::error::{AppError, ErrorKind};
use drivehub_core::events::EntryEvent;
use drivehub_core::result::AppResult;
use drivehub_core::traits::UploadTransport;
use drivehub_core::types::BatchId;
use drivehub_entity::file::mime_from_name;
use drivehub_entity::upload::{BatchReport, ItemReport, UploadEvent, UploadItem, UploadStatus};
use drivehub_entity::{CreateFile, File};

use crate::context::SessionContext;
use crate::events::EventBus;
use crate::storage::StorageService;
use crate::store::EntityStore;

/// Drives upload batches through the transport into the entity store.
#[derive(Debug, Clone)]
pub struct UploadOrchestrator {
    /// Entity store handle.
    store: EntityStore,
    /// Event bus for the batch-level refresh trigger.
    events: EventBus,
    /// Content transport.
    transport: Arc<dyn UploadTransport>,
    /// Quota checks.
    storage: StorageService,
    /// Per-item size ceiling.
    max_upload_size_bytes: u64,
    /// Held while any transfer runs; tokio's mutex queues waiters fairly.
    lane: Arc<Mutex<()>>,
}

impl UploadOrchestrator {
    /// Creates a new orchestrator.
    pub fn new(
        store: EntityStore,
        events: EventBus,
        transport: Arc<dyn UploadTransport>,
        storage: StorageService,
        max_upload_size_bytes: u64,
    ) -> Self {
        Self {
            store,
            events,
            transport,
            storage,
            max_upload_size_bytes,
            lane: Arc::new(Mutex::new(())),
        }
    }

    /// Run a batch, reporting every transition on `progress`.
    ///
    /// A dropped receiver does not affect the batch.
    #[instrument(
        skip(self, ctx, items, cancel, progress),
        fields(batch_id = tracing::field::Empty, items = items.len())
    )]
    pub async fn run_batch(
        &self,
        ctx: &SessionContext,
        items: Vec<UploadItem>,
        cancel: CancellationToken,
        progress: mpsc::UnboundedSender<UploadEvent>,
    ) -> BatchReport {
        let batch_id = BatchId::new();
        tracing::Span::current().record("batch_id", batch_id.to_string());

        for index in 0..items.len() {
            emit(&progress, batch_id, index, UploadStatus::Queued);
        }

        let lane = self.lane.lock().await;
        debug!("Upload lane acquired");

        let mut reports = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let status = if cancel.is_cancelled() {
                UploadStatus::Cancelled
            } else {
                emit(&progress, batch_id, index, UploadStatus::Uploading);
                match self.upload_one(ctx, &item).await {
                    Ok(file) => UploadStatus::Succeeded { file_id: file.id },
                    Err(e) => {
                        warn!(index, name = %item.name, error = %e, "Upload item failed");
                        UploadStatus::failed(&e)
                    }
                }
            };
            emit(&progress, batch_id, index, status.clone());

            reports.push(ItemReport {
                index,
                name: item.name,
                folder_id: item.folder_id,
                mime_type: item.mime_type,
                content: item.content,
                status,
            });
        }
        drop(lane);

        let report = BatchReport {
            batch_id,
            items: reports,
        };

        info!(
            user_id = %ctx.user_id,
            succeeded = report.succeeded(),
            failed = report.failed(),
            cancelled = report.cancelled(),
            "Upload batch completed"
        );
        self.events.publish(
            ctx,
            EntryEvent::BatchCompleted {
                batch_id,
                succeeded: report.succeeded(),
                failed: report.failed(),
                cancelled: report.cancelled(),
            },
        );
        if progress
            .send(UploadEvent::BatchCompleted(report.clone()))
            .is_err()
        {
            trace!("Upload progress receiver dropped");
        }

        report
    }

    /// Run a batch with no cancellation and no progress observer.
    pub async fn run_batch_simple(&self, ctx: &SessionContext, items: Vec<UploadItem>) -> BatchReport {
        let (tx, _rx) = mpsc::unbounded_channel();
        self.run_batch(ctx, items, CancellationToken::new(), tx).await
    }

    /// Attempt a single failed item again, outside any batch.
    ///
    /// The returned report keeps the original index.
    pub async fn retry_item(&self, ctx: &SessionContext, failed: &ItemReport) -> AppResult<ItemReport> {
        if !matches!(failed.status, UploadStatus::Failed { .. }) {
            return Err(AppError::invalid_state("Only failed items can be retried"));
        }

        let item = failed.to_item();
        let status = {
            let _lane = self.lane.lock().await;
            match self.upload_one(ctx, &item).await {
                Ok(file) => UploadStatus::Succeeded { file_id: file.id },
                Err(e) => UploadStatus::failed(&e),
            }
        };

        Ok(ItemReport {
            status,
            ..failed.clone()
        })
    }

    /// Transfer one item and create its file record.
    async fn upload_one(&self, ctx: &SessionContext, item: &UploadItem) -> AppResult<File> {
        let name = item.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("File name cannot be empty"));
        }

        let size = item.size_bytes();
        if size > self.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "File too large: {size} bytes (max {} bytes)",
                self.max_upload_size_bytes
            )));
        }

        self.storage.ensure_space(ctx, size).await?;

        if let Some(folder_id) = item.folder_id {
            let folder = self
                .store
                .get_folder(ctx.user_id, folder_id)
                .await
                .map_err(|_| {
                    AppError::validation(format!("Target folder {folder_id} does not exist"))
                })?;
            if folder.is_trashed() {
                return Err(AppError::validation(format!(
                    "Target folder {folder_id} is in the trash"
                )));
            }
        }

        let mime_type = item
            .mime_type
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| mime_from_name(name));
        let storage_key = format!("{}/{}", ctx.user_id, Uuid::new_v4());

        let written = self
            .transport
            .put(&storage_key, item.content.clone())
            .await
            .map_err(|e| {
                if e.is(ErrorKind::Transport) {
                    e
                } else {
                    AppError::with_source(ErrorKind::Transport, "Content transfer failed", e)
                }
            })?;
        let size_bytes = i64::try_from(written)
            .map_err(|_| AppError::validation("File size exceeds supported range"))?;

        let created = self
            .store
            .create_file(CreateFile {
                owner_id: ctx.user_id,
                name: name.to_string(),
                size_bytes,
                mime_type: Some(mime_type),
                parent_id: item.folder_id,
                storage_key: storage_key.clone(),
            })
            .await;

        let file = match created {
            Ok(file) => file,
            Err(e) => {
                if let Err(cleanup) = self.transport.delete(&storage_key).await {
                    warn!(storage_key = %storage_key, error = %cleanup, "Failed to remove orphaned content");
                }
                return Err(e);
            }
        };

        debug!(file_id = %file.id, size_bytes, "Upload item stored");
        self.events.publish(
            ctx,
            EntryEvent::FileUploaded {
                file_id: file.id,
                parent_id: file.parent_id,
                size_bytes,
            },
        );

        Ok(file)
    }
}

fn emit(
    progress: &mpsc::UnboundedSender<UploadEvent>,
    batch_id: BatchId,
    index: usize,
    status: UploadStatus,
) {
    let event = UploadEvent::ItemStatusChanged {
        batch_id,
        index,
        status,
    };
    if progress.send(event).is_err() {
        trace!("Upload progress receiver dropped");
    }
}
