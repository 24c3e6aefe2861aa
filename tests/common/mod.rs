// Shared by every integration binary; not all of them use every helper.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use geocollect::application::ports::remote_api::{RemoteApiError, RemoteLocationApi};
use geocollect::application::ports::{ConnectivityMonitor, PoiRecordStore, SyncQueueStore};
use geocollect::application::services::{PoiService, PoiServiceTrait, SyncEngine};
use geocollect::domain::entities::PoiPayload;
use geocollect::domain::value_objects::RemoteId;
use geocollect::infrastructure::connectivity::SharedConnectivityMonitor;
use geocollect::infrastructure::database::{
    ConnectionPool, SqlitePoiRecordStore, SqliteSyncQueueStore,
};
use geocollect::shared::config::SyncConfig;

#[derive(Clone)]
pub enum RemoteBehavior {
    Succeed,
    ServerError(u16),
    Unauthorized,
    /// Completes each call only after the delay; used to hold a pass open.
    Delayed(Duration),
    /// Flips the monitor offline after the first successful call.
    SucceedThenOffline(Arc<SharedConnectivityMonitor>),
}

/// In-memory stand-in for the locations API. Records every attempted call
/// and mirrors the remote state so tests can assert what the server ended
/// up with.
pub struct MockRemoteApi {
    behavior: Mutex<RemoteBehavior>,
    calls: Mutex<Vec<String>>,
    locations: Mutex<HashMap<String, PoiPayload>>,
    counter: AtomicU64,
}

impl MockRemoteApi {
    pub fn new(behavior: RemoteBehavior) -> Self {
        Self {
            behavior: Mutex::new(behavior),
            calls: Mutex::new(Vec::new()),
            locations: Mutex::new(HashMap::new()),
            counter: AtomicU64::new(0),
        }
    }

    pub fn set_behavior(&self, behavior: RemoteBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn location(&self, remote_id: &str) -> Option<PoiPayload> {
        self.locations.lock().unwrap().get(remote_id).cloned()
    }

    pub fn location_count(&self) -> usize {
        self.locations.lock().unwrap().len()
    }

    fn behavior(&self) -> RemoteBehavior {
        self.behavior.lock().unwrap().clone()
    }

    async fn gate(&self, call: String) -> Result<(), RemoteApiError> {
        self.calls.lock().unwrap().push(call);
        match self.behavior() {
            RemoteBehavior::Succeed => Ok(()),
            RemoteBehavior::ServerError(status) => Err(RemoteApiError::Server { status }),
            RemoteBehavior::Unauthorized => Err(RemoteApiError::Unauthorized),
            RemoteBehavior::Delayed(delay) => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
            RemoteBehavior::SucceedThenOffline(monitor) => {
                monitor.set_online(false);
                Ok(())
            }
        }
    }
}

#[async_trait]
impl RemoteLocationApi for MockRemoteApi {
    async fn create_location(&self, poi: &PoiPayload) -> Result<RemoteId, RemoteApiError> {
        self.gate(format!("create:{}", poi.name)).await?;

        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let id = format!("srv-{n}");
        self.locations.lock().unwrap().insert(id.clone(), poi.clone());
        RemoteId::new(id).map_err(RemoteApiError::InvalidResponse)
    }

    async fn update_location(&self, id: &RemoteId, poi: &PoiPayload) -> Result<(), RemoteApiError> {
        self.gate(format!("update:{id}")).await?;

        let mut locations = self.locations.lock().unwrap();
        if !locations.contains_key(id.as_str()) {
            return Err(RemoteApiError::Rejected {
                status: 404,
                message: "unknown location".to_string(),
            });
        }
        locations.insert(id.as_str().to_string(), poi.clone());
        Ok(())
    }

    async fn delete_location(&self, id: &RemoteId) -> Result<(), RemoteApiError> {
        self.gate(format!("delete:{id}")).await?;

        self.locations.lock().unwrap().remove(id.as_str());
        Ok(())
    }
}

pub struct TestApp {
    pub records: Arc<dyn PoiRecordStore>,
    pub queue: Arc<dyn SyncQueueStore>,
    pub remote: Arc<MockRemoteApi>,
    pub monitor: Arc<SharedConnectivityMonitor>,
    pub engine: Arc<SyncEngine>,
    pub service: Arc<dyn PoiServiceTrait>,
}

/// Wires the full capture stack over an in-memory database and the mock
/// remote. No connectivity watcher task: passes run only when a test asks.
pub async fn setup_app(online: bool, behavior: RemoteBehavior) -> TestApp {
    let pool = ConnectionPool::from_memory().await.unwrap();
    pool.migrate().await.unwrap();

    let records: Arc<dyn PoiRecordStore> =
        Arc::new(SqlitePoiRecordStore::new(pool.get_pool().clone()));
    let queue: Arc<dyn SyncQueueStore> =
        Arc::new(SqliteSyncQueueStore::new(pool.get_pool().clone()));
    let remote = Arc::new(MockRemoteApi::new(behavior));
    let monitor = Arc::new(SharedConnectivityMonitor::new(online));
    let monitor_port: Arc<dyn ConnectivityMonitor> = monitor.clone();

    let engine = Arc::new(SyncEngine::new(
        records.clone(),
        queue.clone(),
        remote.clone(),
        monitor_port.clone(),
        SyncConfig::default(),
    ));
    let service: Arc<dyn PoiServiceTrait> = Arc::new(PoiService::new(
        records.clone(),
        queue.clone(),
        monitor_port,
        engine.clone(),
    ));

    TestApp {
        records,
        queue,
        remote,
        monitor,
        engine,
        service,
    }
}

pub fn cafe_test() -> PoiPayload {
    PoiPayload {
        name: "Café Test".to_string(),
        description: None,
        category_id: "c1".to_string(),
        latitude: 14.69,
        longitude: -17.44,
        photos: None,
    }
}

pub fn poi(name: &str) -> PoiPayload {
    PoiPayload {
        name: name.to_string(),
        description: Some("captured in the field".to_string()),
        category_id: "c2".to_string(),
        latitude: 14.7167,
        longitude: -17.4677,
        photos: None,
    }
}
