mod local_id;
mod operation_kind;
mod remote_id;
mod sync_queue_id;
mod sync_status;

pub use local_id::LocalId;
pub use operation_kind::OperationKind;
pub use remote_id::RemoteId;
pub use sync_queue_id::SyncQueueId;
pub use sync_status::SyncStatus;
