use crate::application::ports::{ConnectivityMonitor, PoiRecordStore, SyncQueueStore};
use crate::application::services::sync_engine::SyncEngine;
use crate::domain::entities::{
    PoiPatch, PoiPayload, PoiRecord, QueuedOperation, SyncPassOutcome, SyncSummary,
};
use crate::domain::value_objects::{LocalId, SyncStatus};
use crate::shared::error::AppError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info};

/// The only entry point UI code uses. Every mutation is written locally
/// first and queued for the engine; nothing here waits on the network.
#[async_trait]
pub trait PoiServiceTrait: Send + Sync {
    async fn create_poi(&self, payload: PoiPayload) -> Result<PoiRecord, AppError>;
    async fn update_poi(&self, id: LocalId, patch: PoiPatch) -> Result<PoiRecord, AppError>;
    async fn delete_poi(&self, id: LocalId) -> Result<(), AppError>;
    async fn get_poi(&self, id: LocalId) -> Result<Option<PoiRecord>, AppError>;
    async fn list_pois(&self) -> Result<Vec<PoiRecord>, AppError>;
    async fn pending_pois(&self) -> Result<Vec<PoiRecord>, AppError>;
    async fn sync_now(&self) -> Result<SyncPassOutcome, AppError>;
    async fn sync_summary(&self) -> Result<SyncSummary, AppError>;
    async fn retry_poi(&self, id: LocalId) -> Result<(), AppError>;
    async fn reset(&self) -> Result<(), AppError>;
}

pub struct PoiService {
    records: Arc<dyn PoiRecordStore>,
    queue: Arc<dyn SyncQueueStore>,
    connectivity: Arc<dyn ConnectivityMonitor>,
    engine: Arc<SyncEngine>,
}

impl PoiService {
    pub fn new(
        records: Arc<dyn PoiRecordStore>,
        queue: Arc<dyn SyncQueueStore>,
        connectivity: Arc<dyn ConnectivityMonitor>,
        engine: Arc<SyncEngine>,
    ) -> Self {
        Self {
            records,
            queue,
            connectivity,
            engine,
        }
    }

    /// Kicks a pass off without holding the caller; the engine's overlap
    /// guard makes redundant triggers harmless.
    fn trigger_background_sync(&self) {
        if !self.connectivity.is_online() {
            return;
        }
        let engine = Arc::clone(&self.engine);
        tokio::spawn(async move {
            if let Err(e) = engine.run_pass().await {
                error!("Background sync pass failed: {}", e);
            }
        });
    }
}

#[async_trait]
impl PoiServiceTrait for PoiService {
    async fn create_poi(&self, payload: PoiPayload) -> Result<PoiRecord, AppError> {
        let record = self.records.insert(payload).await?;
        self.queue
            .enqueue(&QueuedOperation::CreatePoi {
                local_id: record.id.clone(),
                poi: record.payload.clone(),
            })
            .await?;

        info!(poi = %record.id, "Captured POI locally");
        self.trigger_background_sync();
        Ok(record)
    }

    async fn update_poi(&self, id: LocalId, patch: PoiPatch) -> Result<PoiRecord, AppError> {
        if patch.is_empty() {
            return Err(AppError::InvalidInput("Patch has no fields".to_string()));
        }

        let mut record = self
            .records
            .get(&id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("POI {id}")))?;

        patch.apply(&mut record.payload);
        self.records.update_payload(&id, &record.payload).await?;
        // An edit re-enters the sync cycle and clears a previous error.
        self.records
            .update_sync_status(&id, SyncStatus::Pending, None, None)
            .await?;
        record.sync_status = SyncStatus::Pending;
        record.sync_error = None;

        // Full snapshot, not a diff: queue items must stay self-contained.
        self.queue
            .enqueue(&QueuedOperation::UpdatePoi {
                local_id: id.clone(),
                poi: record.payload.clone(),
            })
            .await?;

        self.trigger_background_sync();
        Ok(record)
    }

    async fn delete_poi(&self, id: LocalId) -> Result<(), AppError> {
        let record = self
            .records
            .get(&id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("POI {id}")))?;

        match record.remote_id {
            None => {
                // The create never landed: cancel everything queued for this
                // POI and delete locally, leaving no network trace.
                let dropped = self.queue.remove_for_record(&id).await?;
                self.records.delete(&id).await?;
                debug!(poi = %id, dropped, "Deleted unsynced POI locally");
            }
            Some(remote_id) => {
                // Everything still queued for this POI, parked items
                // included, is superseded by the delete.
                self.queue.remove_for_record(&id).await?;
                self.queue
                    .enqueue(&QueuedOperation::DeletePoi {
                        local_id: id.clone(),
                        remote_id: Some(remote_id),
                    })
                    .await?;
                // The record stays visible until the remote delete confirms.
                self.records
                    .update_sync_status(&id, SyncStatus::Pending, None, None)
                    .await?;
                self.trigger_background_sync();
            }
        }

        Ok(())
    }

    async fn get_poi(&self, id: LocalId) -> Result<Option<PoiRecord>, AppError> {
        self.records.get(&id).await
    }

    async fn list_pois(&self) -> Result<Vec<PoiRecord>, AppError> {
        self.records.get_all().await
    }

    async fn pending_pois(&self) -> Result<Vec<PoiRecord>, AppError> {
        self.records.get_pending().await
    }

    async fn sync_now(&self) -> Result<SyncPassOutcome, AppError> {
        self.engine.run_pass().await
    }

    async fn sync_summary(&self) -> Result<SyncSummary, AppError> {
        let counts = self.records.count_by_status().await?;
        let queued = self.queue.len().await?;
        let stuck = self.queue.stuck_items().await?.len() as u32;

        Ok(SyncSummary {
            pending: counts.pending,
            syncing: counts.syncing,
            synced: counts.synced,
            error: counts.error,
            queued,
            stuck,
        })
    }

    async fn retry_poi(&self, id: LocalId) -> Result<(), AppError> {
        self.records
            .get(&id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("POI {id}")))?;

        // Explicit user override of the automatic ceiling.
        let reset = self.queue.reset_attempts_for_record(&id).await?;
        self.records
            .update_sync_status(&id, SyncStatus::Pending, None, None)
            .await?;

        info!(poi = %id, reset, "Manual retry requested");
        self.trigger_background_sync();
        Ok(())
    }

    async fn reset(&self) -> Result<(), AppError> {
        self.queue.clear_all().await?;
        self.records.clear_all().await?;
        info!("Local capture state cleared");
        Ok(())
    }
}
