mod common;

use common::{poi, setup_app, RemoteBehavior};
use geocollect::domain::value_objects::SyncStatus;
use geocollect::presentation::dto::poi::{CreatePoiRequest, PoiIdRequest};
use geocollect::shared::config::{AppConfig, DatabaseConfig};
use geocollect::AppState;
use std::time::Duration;

/// Polls until the predicate holds or the deadline passes.
async fn wait_for<F, Fut>(mut check: F)
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..100 {
        if check().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("condition not reached within deadline");
}

#[tokio::test]
async fn regaining_connectivity_drains_the_queue_unprompted() {
    let app = setup_app(false, RemoteBehavior::Succeed).await;
    let watcher = app.engine.spawn_connectivity_sync();

    let record = app.service.create_poi(poi("Île de Gorée")).await.unwrap();
    assert_eq!(app.remote.call_count(), 0);

    app.monitor.set_online(true);

    let service = app.service.clone();
    let id = record.id.clone();
    wait_for(|| {
        let service = service.clone();
        let id = id.clone();
        async move {
            service
                .get_poi(id)
                .await
                .unwrap()
                .is_some_and(|r| r.sync_status == SyncStatus::Synced)
        }
    })
    .await;

    assert_eq!(app.queue.len().await.unwrap(), 0);
    assert_eq!(app.remote.call_count(), 1);
    watcher.abort();
}

#[tokio::test]
async fn offline_toggles_without_a_recovery_do_not_trigger_passes() {
    let app = setup_app(true, RemoteBehavior::Succeed).await;
    let watcher = app.engine.spawn_connectivity_sync();

    app.monitor.set_online(false);
    app.service.create_poi(poi("Lac Rose")).await.unwrap();
    // Going offline again is not a recovery.
    app.monitor.set_online(false);
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(app.remote.call_count(), 0);
    assert_eq!(app.queue.len().await.unwrap(), 1);
    watcher.abort();
}

#[tokio::test]
async fn app_state_captures_through_the_handler_and_shuts_down_clean() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        database: DatabaseConfig {
            url: format!("sqlite://{}?mode=rwc", dir.path().join("capture.db").display()),
            max_connections: 2,
        },
        ..Default::default()
    };

    let state = AppState::new(config).await.unwrap();
    // Keep the session offline so nothing reaches out to the real API.
    state.connectivity.set_online(false);

    let created = state
        .poi_handler
        .create_poi(CreatePoiRequest {
            name: "Marché Sandaga".to_string(),
            description: None,
            category_id: "market".to_string(),
            latitude: 14.6761,
            longitude: -17.4396,
            photos: None,
        })
        .await
        .unwrap();
    assert_eq!(created.sync_status, "pending");

    let summary = state.poi_handler.get_sync_summary().await.unwrap();
    assert_eq!(summary.pending, 1);
    assert_eq!(summary.queued, 1);

    let fetched = state
        .poi_handler
        .get_poi(PoiIdRequest {
            id: created.id.clone(),
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.name, "Marché Sandaga");

    state.shutdown().await.unwrap();
}

#[tokio::test]
async fn handler_rejects_out_of_range_coordinates() {
    let app = setup_app(false, RemoteBehavior::Succeed).await;
    let handler = geocollect::presentation::handlers::PoiHandler::new(app.service.clone());

    let result = handler
        .create_poi(CreatePoiRequest {
            name: "Nowhere".to_string(),
            description: None,
            category_id: "c1".to_string(),
            latitude: 91.0,
            longitude: 0.0,
            photos: None,
        })
        .await;

    assert!(result.is_err());
    assert!(app.service.list_pois().await.unwrap().is_empty());
}
