use std::sync::Arc;

use crate::application::ports::{
    AccessTokenProvider, ConnectivityMonitor, PoiRecordStore, RemoteLocationApi, SyncQueueStore,
};
use crate::application::services::{PoiService, PoiServiceTrait, SyncEngine};
use crate::infrastructure::connectivity::SharedConnectivityMonitor;
use crate::infrastructure::database::{ConnectionPool, SqlitePoiRecordStore, SqliteSyncQueueStore};
use crate::infrastructure::remote::{HttpRemoteLocationApi, SessionTokenProvider};
use crate::presentation::handlers::PoiHandler;
use crate::shared::config::AppConfig;
use crate::shared::error::AppError;

/// Explicitly constructed application state: one per session, created at
/// startup/login, released at logout. No module-level singletons.
#[derive(Clone)]
pub struct AppState {
    pub pool: ConnectionPool,
    pub connectivity: Arc<SharedConnectivityMonitor>,
    pub tokens: Arc<SessionTokenProvider>,
    pub engine: Arc<SyncEngine>,
    pub poi_service: Arc<dyn PoiServiceTrait>,
    pub poi_handler: Arc<PoiHandler>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self, AppError> {
        let pool = ConnectionPool::new(&config.database.url, config.database.max_connections)
            .await?;
        pool.migrate().await?;

        let tokens = Arc::new(SessionTokenProvider::new());
        let token_provider: Arc<dyn AccessTokenProvider> = tokens.clone();
        let remote: Arc<dyn RemoteLocationApi> = Arc::new(HttpRemoteLocationApi::new(
            &config.remote,
            token_provider,
        )
        .map_err(|e| AppError::Network(e.to_string()))?);

        let connectivity = Arc::new(SharedConnectivityMonitor::default());

        Self::assemble(pool, remote, connectivity, tokens, config)
    }

    /// Wiring seam for tests and alternative transports.
    pub fn assemble(
        pool: ConnectionPool,
        remote: Arc<dyn RemoteLocationApi>,
        connectivity: Arc<SharedConnectivityMonitor>,
        tokens: Arc<SessionTokenProvider>,
        config: AppConfig,
    ) -> Result<Self, AppError> {
        let records: Arc<dyn PoiRecordStore> =
            Arc::new(SqlitePoiRecordStore::new(pool.get_pool().clone()));
        let queue: Arc<dyn SyncQueueStore> = Arc::new(SqliteSyncQueueStore::with_max_attempts(
            pool.get_pool().clone(),
            config.sync.max_attempts,
        ));

        let monitor: Arc<dyn ConnectivityMonitor> = connectivity.clone();
        let engine = Arc::new(SyncEngine::new(
            records.clone(),
            queue.clone(),
            remote,
            monitor.clone(),
            config.sync,
        ));
        // Every offline→online transition kicks a pass.
        engine.spawn_connectivity_sync();

        let poi_service: Arc<dyn PoiServiceTrait> = Arc::new(PoiService::new(
            records,
            queue,
            monitor,
            engine.clone(),
        ));
        let poi_handler = Arc::new(PoiHandler::new(poi_service.clone()));

        Ok(Self {
            pool,
            connectivity,
            tokens,
            engine,
            poi_service,
            poi_handler,
        })
    }

    /// Logout: wipe captured state, drop the session token, release the pool.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.poi_service.reset().await?;
        self.tokens.clear();
        self.pool.close().await;
        Ok(())
    }
}
