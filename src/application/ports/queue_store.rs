use crate::domain::entities::{QueuedOperation, SyncQueueItem};
use crate::domain::value_objects::{LocalId, SyncQueueId};
use crate::shared::error::AppError;
use async_trait::async_trait;

/// Durable FIFO queue of pending remote operations, decoupled from the
/// record store so ordering and retry bookkeeping survive restarts.
#[async_trait]
pub trait SyncQueueStore: Send + Sync {
    async fn enqueue(&self, operation: &QueuedOperation) -> Result<SyncQueueId, AppError>;

    /// Up to `limit` items below the attempt ceiling, oldest first.
    async fn get_eligible(&self, limit: u32) -> Result<Vec<SyncQueueItem>, AppError>;

    /// Increments `attempts`, stamps the attempt time, stores the error.
    /// Returns the new attempt count.
    async fn record_attempt(&self, id: SyncQueueId, error: Option<&str>)
        -> Result<u32, AppError>;

    /// Deletes an item after confirmed success (or staleness).
    async fn remove(&self, id: SyncQueueId) -> Result<(), AppError>;

    /// Cancels every queued operation for one POI. Returns how many items
    /// were dropped. Used by the local-only delete path.
    async fn remove_for_record(&self, local_id: &LocalId) -> Result<u64, AppError>;

    /// User-triggered override of the automatic ceiling.
    async fn reset_attempts_for_record(&self, local_id: &LocalId) -> Result<u64, AppError>;

    /// Items parked at the attempt ceiling; surfaced, never silently dropped.
    async fn stuck_items(&self) -> Result<Vec<SyncQueueItem>, AppError>;

    async fn len(&self) -> Result<u32, AppError>;

    async fn clear_all(&self) -> Result<(), AppError>;
}
