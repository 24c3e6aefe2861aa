mod poi_record;
mod queued_operation;
mod sync_queue_item;
mod sync_report;

pub use poi_record::{PoiPatch, PoiPayload, PoiRecord};
pub use queued_operation::QueuedOperation;
pub use sync_queue_item::{SyncQueueItem, MAX_ATTEMPTS};
pub use sync_report::{RecordStatusCounts, SyncPassOutcome, SyncSummary};
