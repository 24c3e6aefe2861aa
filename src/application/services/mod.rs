pub mod poi_service;
pub mod sync_engine;

pub use poi_service::{PoiService, PoiServiceTrait};
pub use sync_engine::SyncEngine;
