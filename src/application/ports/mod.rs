pub mod auth;
pub mod connectivity;
pub mod queue_store;
pub mod record_store;
pub mod remote_api;

pub use auth::AccessTokenProvider;
pub use connectivity::ConnectivityMonitor;
pub use queue_store::SyncQueueStore;
pub use record_store::PoiRecordStore;
pub use remote_api::{RemoteApiError, RemoteLocationApi};
