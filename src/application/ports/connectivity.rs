use tokio::sync::watch;

/// Reachability as observed by the platform. The core only needs the current
/// status and a change stream; probing lives with the embedder.
pub trait ConnectivityMonitor: Send + Sync {
    fn is_online(&self) -> bool;

    fn subscribe(&self) -> watch::Receiver<bool>;
}
