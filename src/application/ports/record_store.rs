use crate::domain::entities::{PoiPayload, PoiRecord, RecordStatusCounts};
use crate::domain::value_objects::{LocalId, RemoteId, SyncStatus};
use crate::shared::error::AppError;
use async_trait::async_trait;

/// Durable mapping from local POI id to record. Performs no network I/O.
#[async_trait]
pub trait PoiRecordStore: Send + Sync {
    /// Creates a record with a fresh local id and `pending` status.
    async fn insert(&self, payload: PoiPayload) -> Result<PoiRecord, AppError>;

    async fn get(&self, id: &LocalId) -> Result<Option<PoiRecord>, AppError>;

    /// All records, newest first.
    async fn get_all(&self) -> Result<Vec<PoiRecord>, AppError>;

    /// Pending records, oldest first, preserving capture order.
    async fn get_pending(&self) -> Result<Vec<PoiRecord>, AppError>;

    /// Idempotent partial update. Unknown ids are a silent no-op: the engine
    /// may act on a queue item whose record has already been deleted.
    async fn update_sync_status(
        &self,
        id: &LocalId,
        status: SyncStatus,
        remote_id: Option<&RemoteId>,
        error: Option<&str>,
    ) -> Result<(), AppError>;

    /// Replaces the payload fields of an existing record.
    async fn update_payload(&self, id: &LocalId, payload: &PoiPayload) -> Result<(), AppError>;

    /// Removes the record only; queued operations are the caller's concern.
    async fn delete(&self, id: &LocalId) -> Result<(), AppError>;

    /// Account logout / reset. Not part of the normal sync flow.
    async fn clear_all(&self) -> Result<(), AppError>;

    async fn count_by_status(&self) -> Result<RecordStatusCounts, AppError>;
}
