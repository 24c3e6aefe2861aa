mod monitor;

pub use monitor::SharedConnectivityMonitor;
