use crate::application::ports::{
    ConnectivityMonitor, PoiRecordStore, RemoteApiError, RemoteLocationApi, SyncQueueStore,
};
use crate::domain::entities::{QueuedOperation, SyncPassOutcome, SyncQueueItem};
use crate::domain::value_objects::{LocalId, SyncStatus};
use crate::shared::config::SyncConfig;
use crate::shared::error::AppError;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

#[derive(Debug, Default)]
struct EngineState {
    is_syncing: bool,
    last_pass_at: Option<i64>,
}

enum ItemOutcome {
    Synced,
    Failed,
    Skipped,
    AuthRequired,
}

/// Drives one bounded "sync pass": drain eligible queue items against the
/// remote API and fold the results back into local record state. The only
/// component of the capture flow that talks to the network.
pub struct SyncEngine {
    records: Arc<dyn PoiRecordStore>,
    queue: Arc<dyn SyncQueueStore>,
    remote: Arc<dyn RemoteLocationApi>,
    connectivity: Arc<dyn ConnectivityMonitor>,
    state: Arc<RwLock<EngineState>>,
    config: SyncConfig,
}

impl SyncEngine {
    pub fn new(
        records: Arc<dyn PoiRecordStore>,
        queue: Arc<dyn SyncQueueStore>,
        remote: Arc<dyn RemoteLocationApi>,
        connectivity: Arc<dyn ConnectivityMonitor>,
        config: SyncConfig,
    ) -> Self {
        Self {
            records,
            queue,
            remote,
            connectivity,
            state: Arc::new(RwLock::new(EngineState::default())),
            config,
        }
    }

    /// Cheap to call speculatively: returns a skipped outcome when offline
    /// or when another pass is already in flight. Overlapping triggers are
    /// dropped, not queued, so no queue item ever has two concurrent calls.
    pub async fn run_pass(&self) -> Result<SyncPassOutcome, AppError> {
        {
            let mut state = self.state.write().await;
            if state.is_syncing {
                debug!("Sync pass already in flight, dropping trigger");
                return Ok(SyncPassOutcome::skipped());
            }
            if !self.connectivity.is_online() {
                debug!("Offline, skipping sync pass");
                return Ok(SyncPassOutcome::skipped());
            }
            state.is_syncing = true;
        }

        let result = self.drain_batch().await;

        let mut state = self.state.write().await;
        state.is_syncing = false;
        state.last_pass_at = Some(chrono::Utc::now().timestamp());

        result
    }

    pub async fn is_syncing(&self) -> bool {
        self.state.read().await.is_syncing
    }

    /// Re-runs a pass on every offline→online transition. The embedder owns
    /// any additional triggers (foreground, timer, manual).
    pub fn spawn_connectivity_sync(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let engine = Arc::clone(self);
        let mut changes = engine.connectivity.subscribe();
        tokio::spawn(async move {
            while changes.changed().await.is_ok() {
                let online = *changes.borrow_and_update();
                if !online {
                    continue;
                }
                match engine.run_pass().await {
                    Ok(outcome) => {
                        info!(
                            synced = outcome.synced_count,
                            failed = outcome.failed_count,
                            "Connectivity restored, sync pass finished"
                        );
                    }
                    Err(e) => error!("Sync pass failed: {}", e),
                }
            }
        })
    }

    async fn drain_batch(&self) -> Result<SyncPassOutcome, AppError> {
        let items = self.queue.get_eligible(self.config.batch_size).await?;
        let mut outcome = SyncPassOutcome {
            ran: true,
            ..Default::default()
        };

        info!(batch = items.len(), "Starting sync pass");

        for item in &items {
            // Connectivity can drop mid-pass; stop before the next item
            // rather than burning attempts on calls that cannot succeed.
            if !self.connectivity.is_online() {
                debug!("Went offline mid-pass, stopping early");
                break;
            }

            match self.process_item(item).await? {
                ItemOutcome::Synced => outcome.synced_count += 1,
                ItemOutcome::Failed => outcome.failed_count += 1,
                ItemOutcome::Skipped => outcome.skipped_count += 1,
                ItemOutcome::AuthRequired => {
                    warn!("Remote rejected the session token, aborting pass");
                    outcome.auth_required = true;
                    break;
                }
            }
        }

        Ok(outcome)
    }

    async fn process_item(&self, item: &SyncQueueItem) -> Result<ItemOutcome, AppError> {
        debug!(queue_id = %item.id, kind = %item.kind, poi = %item.local_id, "Processing queue item");

        // Best-effort: the record may have been deleted since enqueue.
        self.records
            .update_sync_status(&item.local_id, SyncStatus::Syncing, None, None)
            .await?;

        match &item.operation {
            QueuedOperation::CreatePoi { local_id, poi } => {
                match self.remote.create_location(poi).await {
                    Ok(remote_id) => {
                        self.records
                            .update_sync_status(local_id, SyncStatus::Synced, Some(&remote_id), None)
                            .await?;
                        self.queue.remove(item.id).await?;
                        Ok(ItemOutcome::Synced)
                    }
                    Err(RemoteApiError::Unauthorized) => self.abort_for_auth(local_id).await,
                    Err(err) => self.record_failure(item, local_id, &err).await,
                }
            }
            QueuedOperation::UpdatePoi { local_id, poi } => {
                let Some(record) = self.records.get(local_id).await? else {
                    // The record is gone; a delete further down the queue
                    // (or a local-only delete) outlived this item.
                    debug!(poi = %local_id, "Dropping update for deleted record");
                    self.queue.remove(item.id).await?;
                    return Ok(ItemOutcome::Skipped);
                };
                let Some(remote_id) = record.remote_id.clone() else {
                    // The create ahead of it in FIFO order has not landed
                    // yet. Wait for a later pass without charging an attempt.
                    self.records
                        .update_sync_status(local_id, SyncStatus::Pending, None, None)
                        .await?;
                    return Ok(ItemOutcome::Skipped);
                };
                match self.remote.update_location(&remote_id, poi).await {
                    Ok(()) => {
                        self.records
                            .update_sync_status(local_id, SyncStatus::Synced, None, None)
                            .await?;
                        self.queue.remove(item.id).await?;
                        Ok(ItemOutcome::Synced)
                    }
                    Err(RemoteApiError::Unauthorized) => self.abort_for_auth(local_id).await,
                    Err(err) => self.record_failure(item, local_id, &err).await,
                }
            }
            QueuedOperation::DeletePoi { local_id, remote_id } => match remote_id {
                None => {
                    // Never synced: the deletion is entirely local.
                    self.queue.remove(item.id).await?;
                    self.records.delete(local_id).await?;
                    Ok(ItemOutcome::Synced)
                }
                Some(remote_id) => match self.remote.delete_location(remote_id).await {
                    Ok(()) => {
                        self.queue.remove(item.id).await?;
                        self.records.delete(local_id).await?;
                        Ok(ItemOutcome::Synced)
                    }
                    Err(RemoteApiError::Unauthorized) => self.abort_for_auth(local_id).await,
                    Err(err) => self.record_failure(item, local_id, &err).await,
                },
            },
        }
    }

    /// Uniform retry policy: every failure shape except 401 counts against
    /// the same attempt ceiling. At the ceiling the record turns `error`
    /// and the item is parked; below it the record goes back to `pending`.
    async fn record_failure(
        &self,
        item: &SyncQueueItem,
        local_id: &LocalId,
        err: &RemoteApiError,
    ) -> Result<ItemOutcome, AppError> {
        let message = err.to_string();
        let attempts = self.queue.record_attempt(item.id, Some(&message)).await?;

        if attempts >= self.config.max_attempts {
            error!(poi = %local_id, attempts, "Queue item exhausted its attempts: {}", message);
            self.records
                .update_sync_status(local_id, SyncStatus::Error, None, Some(&message))
                .await?;
        } else {
            warn!(poi = %local_id, attempts, "Sync attempt failed, will retry: {}", message);
            self.records
                .update_sync_status(local_id, SyncStatus::Pending, None, None)
                .await?;
        }

        Ok(ItemOutcome::Failed)
    }

    /// A dead token fails every item the same way; attempts are not charged
    /// because the item itself did nothing wrong.
    async fn abort_for_auth(&self, local_id: &LocalId) -> Result<ItemOutcome, AppError> {
        self.records
            .update_sync_status(local_id, SyncStatus::Pending, None, None)
            .await?;
        Ok(ItemOutcome::AuthRequired)
    }
}
