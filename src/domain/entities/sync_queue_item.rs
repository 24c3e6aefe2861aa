use crate::domain::entities::queued_operation::QueuedOperation;
use crate::domain::value_objects::{LocalId, OperationKind, SyncQueueId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Delivery attempts after which an item is parked and surfaced to the user
/// instead of being retried automatically.
pub const MAX_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncQueueItem {
    pub id: SyncQueueId,
    pub kind: OperationKind,
    pub local_id: LocalId,
    pub operation: QueuedOperation,
    pub attempts: u32,
    pub created_at: DateTime<Utc>,
    pub last_attempt_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

impl SyncQueueItem {
    pub fn is_eligible(&self) -> bool {
        self.attempts < MAX_ATTEMPTS
    }
}
