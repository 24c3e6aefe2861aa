use crate::application::ports::connectivity::ConnectivityMonitor;
use tokio::sync::watch;
use tracing::info;

/// Connectivity state fed by the platform's reachability callbacks. The
/// core never probes the network itself.
pub struct SharedConnectivityMonitor {
    sender: watch::Sender<bool>,
}

impl SharedConnectivityMonitor {
    pub fn new(initially_online: bool) -> Self {
        let (sender, _) = watch::channel(initially_online);
        Self { sender }
    }

    /// Called by the embedder whenever reachability changes.
    pub fn set_online(&self, online: bool) {
        // send_replace stores the value even when nobody is subscribed.
        let previous = self.sender.send_replace(online);
        if previous != online {
            info!(online, "Connectivity changed");
        }
    }
}

impl Default for SharedConnectivityMonitor {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ConnectivityMonitor for SharedConnectivityMonitor {
    fn is_online(&self) -> bool {
        *self.sender.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.sender.subscribe()
    }
}
