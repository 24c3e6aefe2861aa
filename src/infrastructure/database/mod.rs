mod connection_pool;
mod mappers;
mod poi_record_store;
mod rows;
mod sync_queue_store;

pub use connection_pool::ConnectionPool;
pub use poi_record_store::SqlitePoiRecordStore;
pub use sync_queue_store::SqliteSyncQueueStore;
