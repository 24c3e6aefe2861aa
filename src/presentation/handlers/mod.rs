mod poi_handler;

pub use poi_handler::PoiHandler;
