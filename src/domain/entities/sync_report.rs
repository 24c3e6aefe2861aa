use serde::{Deserialize, Serialize};

/// Result of one bounded sync pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncPassOutcome {
    /// False when the pass was skipped (offline, or another pass in flight).
    pub ran: bool,
    pub synced_count: u32,
    pub failed_count: u32,
    pub skipped_count: u32,
    /// Set when a 401 aborted the pass; the embedder must re-authenticate.
    pub auth_required: bool,
}

impl SyncPassOutcome {
    pub fn skipped() -> Self {
        Self::default()
    }
}

/// Record counts per sync status, as reported by the record store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordStatusCounts {
    pub pending: u32,
    pub syncing: u32,
    pub synced: u32,
    pub error: u32,
}

/// Aggregate counts for the offline indicator badge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncSummary {
    pub pending: u32,
    pub syncing: u32,
    pub synced: u32,
    pub error: u32,
    /// Queue items still waiting for delivery.
    pub queued: u32,
    /// Queue items parked at the attempt ceiling.
    pub stuck: u32,
}
