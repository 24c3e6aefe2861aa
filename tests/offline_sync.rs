mod common;

use common::{cafe_test, poi, setup_app, RemoteBehavior};
use geocollect::domain::entities::PoiPatch;
use geocollect::domain::value_objects::{LocalId, SyncStatus};
use std::time::Duration;

#[tokio::test]
async fn scenario_a_offline_capture_drains_once_online() {
    let app = setup_app(false, RemoteBehavior::Succeed).await;

    let record = app.service.create_poi(cafe_test()).await.unwrap();
    assert!(LocalId::is_local(record.id.as_str()));

    let all = app.service.list_pois().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].sync_status, SyncStatus::Pending);
    assert!(all[0].remote_id.is_none());
    assert_eq!(app.remote.call_count(), 0);

    app.monitor.set_online(true);
    let outcome = app.service.sync_now().await.unwrap();

    assert!(outcome.ran);
    assert_eq!(outcome.synced_count, 1);
    let synced = app.service.get_poi(record.id).await.unwrap().unwrap();
    assert_eq!(synced.sync_status, SyncStatus::Synced);
    assert_eq!(synced.remote_id.unwrap().as_str(), "srv-1");
    assert_eq!(app.queue.len().await.unwrap(), 0);
}

#[tokio::test]
async fn scenario_b_create_then_delete_offline_leaves_no_trace() {
    let app = setup_app(false, RemoteBehavior::Succeed).await;

    let record = app.service.create_poi(cafe_test()).await.unwrap();
    app.service.delete_poi(record.id).await.unwrap();

    assert!(app.service.list_pois().await.unwrap().is_empty());
    assert_eq!(app.queue.len().await.unwrap(), 0);

    app.monitor.set_online(true);
    let outcome = app.service.sync_now().await.unwrap();

    assert!(outcome.ran);
    assert_eq!(outcome.synced_count + outcome.failed_count + outcome.skipped_count, 0);
    assert_eq!(app.remote.call_count(), 0);
}

#[tokio::test]
async fn scenario_c_five_server_errors_park_the_item() {
    let app = setup_app(false, RemoteBehavior::ServerError(500)).await;
    let record = app.service.create_poi(cafe_test()).await.unwrap();
    app.monitor.set_online(true);

    for _ in 0..5 {
        let outcome = app.service.sync_now().await.unwrap();
        assert_eq!(outcome.failed_count, 1);
    }

    let stuck = app.service.get_poi(record.id.clone()).await.unwrap().unwrap();
    assert_eq!(stuck.sync_status, SyncStatus::Error);
    assert_eq!(stuck.sync_error.as_deref(), Some("Server error (500)"));

    let parked = app.queue.stuck_items().await.unwrap();
    assert_eq!(parked.len(), 1);
    assert_eq!(parked[0].attempts, 5);

    // A sixth pass must not touch the parked item.
    let outcome = app.service.sync_now().await.unwrap();
    assert!(outcome.ran);
    assert_eq!(outcome.failed_count, 0);
    assert_eq!(app.remote.call_count(), 5);
}

#[tokio::test]
async fn create_and_two_updates_apply_in_enqueue_order() {
    let app = setup_app(false, RemoteBehavior::Succeed).await;

    let record = app.service.create_poi(cafe_test()).await.unwrap();
    app.service
        .update_poi(
            record.id.clone(),
            PoiPatch {
                name: Some("Café Renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    app.service
        .update_poi(
            record.id.clone(),
            PoiPatch {
                name: Some("Café Final".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(app.queue.len().await.unwrap(), 3);

    app.monitor.set_online(true);
    let outcome = app.service.sync_now().await.unwrap();

    assert_eq!(outcome.synced_count, 3);
    assert_eq!(
        app.remote.calls(),
        vec![
            "create:Café Test".to_string(),
            "update:srv-1".to_string(),
            "update:srv-1".to_string(),
        ]
    );
    // Both updates ran, each against the then-current remote state; the
    // final values win.
    assert_eq!(app.remote.location("srv-1").unwrap().name, "Café Final");
}

#[tokio::test]
async fn queued_update_waits_for_its_create_without_burning_attempts() {
    let app = setup_app(false, RemoteBehavior::ServerError(503)).await;

    let record = app.service.create_poi(cafe_test()).await.unwrap();
    app.service
        .update_poi(
            record.id.clone(),
            PoiPatch {
                description: Some("now with details".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    app.monitor.set_online(true);
    let outcome = app.service.sync_now().await.unwrap();
    assert_eq!(outcome.failed_count, 1);
    assert_eq!(outcome.skipped_count, 1);

    let items = app.queue.get_eligible(10).await.unwrap();
    let update_item = items
        .iter()
        .find(|item| item.kind.as_str() == "update_poi")
        .unwrap();
    assert_eq!(update_item.attempts, 0);

    app.remote.set_behavior(RemoteBehavior::Succeed);
    let outcome = app.service.sync_now().await.unwrap();
    assert_eq!(outcome.synced_count, 2);
    assert_eq!(
        app.remote.location("srv-1").unwrap().description.as_deref(),
        Some("now with details")
    );
}

#[tokio::test]
async fn deleting_a_synced_poi_reaches_the_remote() {
    let app = setup_app(false, RemoteBehavior::Succeed).await;
    let record = app.service.create_poi(poi("Phare des Mamelles")).await.unwrap();

    app.monitor.set_online(true);
    app.service.sync_now().await.unwrap();
    assert_eq!(app.remote.location_count(), 1);

    app.monitor.set_online(false);
    app.service.delete_poi(record.id.clone()).await.unwrap();
    // Still visible until the remote delete confirms.
    assert!(app.service.get_poi(record.id.clone()).await.unwrap().is_some());

    app.monitor.set_online(true);
    let outcome = app.service.sync_now().await.unwrap();

    assert_eq!(outcome.synced_count, 1);
    assert!(app.service.get_poi(record.id).await.unwrap().is_none());
    assert_eq!(app.remote.location_count(), 0);
    assert_eq!(app.queue.len().await.unwrap(), 0);
}

#[tokio::test]
async fn deleting_a_synced_poi_discards_its_parked_items() {
    let app = setup_app(false, RemoteBehavior::Succeed).await;
    let record = app.service.create_poi(cafe_test()).await.unwrap();
    app.monitor.set_online(true);
    app.service.sync_now().await.unwrap();

    // Park an update at the attempt ceiling.
    app.monitor.set_online(false);
    app.remote.set_behavior(RemoteBehavior::ServerError(500));
    app.service
        .update_poi(
            record.id.clone(),
            PoiPatch {
                name: Some("unreachable".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    app.monitor.set_online(true);
    for _ in 0..5 {
        app.service.sync_now().await.unwrap();
    }
    assert_eq!(app.queue.stuck_items().await.unwrap().len(), 1);

    // The delete supersedes the parked update; nothing stays stuck.
    app.monitor.set_online(false);
    app.remote.set_behavior(RemoteBehavior::Succeed);
    app.service.delete_poi(record.id.clone()).await.unwrap();
    assert!(app.queue.stuck_items().await.unwrap().is_empty());
    assert_eq!(app.queue.len().await.unwrap(), 1);

    app.monitor.set_online(true);
    app.service.sync_now().await.unwrap();
    assert!(app.service.get_poi(record.id).await.unwrap().is_none());
    assert_eq!(app.queue.len().await.unwrap(), 0);
    assert_eq!(app.remote.location_count(), 0);
}

#[tokio::test]
async fn auth_failure_aborts_the_pass_without_charging_attempts() {
    let app = setup_app(false, RemoteBehavior::Unauthorized).await;
    app.service.create_poi(poi("one")).await.unwrap();
    app.service.create_poi(poi("two")).await.unwrap();

    app.monitor.set_online(true);
    let outcome = app.service.sync_now().await.unwrap();

    assert!(outcome.auth_required);
    // The pass stopped at the first 401; the second item was never tried.
    assert_eq!(app.remote.call_count(), 1);

    let items = app.queue.get_eligible(10).await.unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item.attempts == 0));

    for record in app.service.list_pois().await.unwrap() {
        assert_eq!(record.sync_status, SyncStatus::Pending);
    }
}

#[tokio::test]
async fn concurrent_triggers_run_a_single_pass() {
    let app = setup_app(false, RemoteBehavior::Delayed(Duration::from_millis(100))).await;
    app.service.create_poi(cafe_test()).await.unwrap();
    app.monitor.set_online(true);

    let (first, second) = tokio::join!(app.engine.run_pass(), app.engine.run_pass());
    let (first, second) = (first.unwrap(), second.unwrap());

    // Exactly one of the two triggers ran; the other was dropped.
    assert_ne!(first.ran, second.ran);
    assert_eq!(app.remote.call_count(), 1);
}

#[tokio::test]
async fn going_offline_mid_pass_stops_the_batch() {
    let app = setup_app(false, RemoteBehavior::Succeed).await;
    app.service.create_poi(poi("first")).await.unwrap();
    app.service.create_poi(poi("second")).await.unwrap();

    app.monitor.set_online(true);
    app.remote
        .set_behavior(RemoteBehavior::SucceedThenOffline(app.monitor.clone()));
    let outcome = app.service.sync_now().await.unwrap();

    assert_eq!(outcome.synced_count, 1);
    assert_eq!(app.remote.call_count(), 1);
    assert_eq!(app.queue.len().await.unwrap(), 1);
}

#[tokio::test]
async fn manual_retry_resets_the_ceiling_and_drains() {
    let app = setup_app(false, RemoteBehavior::ServerError(500)).await;
    let record = app.service.create_poi(cafe_test()).await.unwrap();
    app.monitor.set_online(true);

    for _ in 0..5 {
        app.service.sync_now().await.unwrap();
    }
    let stuck = app.service.get_poi(record.id.clone()).await.unwrap().unwrap();
    assert_eq!(stuck.sync_status, SyncStatus::Error);

    app.monitor.set_online(false);
    app.remote.set_behavior(RemoteBehavior::Succeed);
    app.service.retry_poi(record.id.clone()).await.unwrap();

    let retried = app.service.get_poi(record.id.clone()).await.unwrap().unwrap();
    assert_eq!(retried.sync_status, SyncStatus::Pending);
    assert!(retried.sync_error.is_none());

    app.monitor.set_online(true);
    let outcome = app.service.sync_now().await.unwrap();
    assert_eq!(outcome.synced_count, 1);

    let synced = app.service.get_poi(record.id).await.unwrap().unwrap();
    assert_eq!(synced.sync_status, SyncStatus::Synced);
}

#[tokio::test]
async fn summary_counts_feed_the_offline_badge() {
    let app = setup_app(false, RemoteBehavior::ServerError(500)).await;
    let doomed = app.service.create_poi(poi("doomed")).await.unwrap();
    app.monitor.set_online(true);
    for _ in 0..5 {
        app.service.sync_now().await.unwrap();
    }
    app.monitor.set_online(false);
    app.service.create_poi(poi("waiting")).await.unwrap();

    let summary = app.service.sync_summary().await.unwrap();
    assert_eq!(summary.pending, 1);
    assert_eq!(summary.error, 1);
    assert_eq!(summary.synced, 0);
    assert_eq!(summary.queued, 2);
    assert_eq!(summary.stuck, 1);

    let doomed_record = app.service.get_poi(doomed.id).await.unwrap().unwrap();
    assert!(doomed_record.has_consistent_error_state());
}

#[tokio::test]
async fn updating_a_synced_poi_re_enters_the_cycle() {
    let app = setup_app(false, RemoteBehavior::Succeed).await;
    let record = app.service.create_poi(cafe_test()).await.unwrap();
    app.monitor.set_online(true);
    app.service.sync_now().await.unwrap();

    app.monitor.set_online(false);
    let updated = app
        .service
        .update_poi(
            record.id.clone(),
            PoiPatch {
                latitude: Some(14.6928),
                longitude: Some(-17.4467),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.sync_status, SyncStatus::Pending);
    // The remote id survives the edit.
    assert_eq!(updated.remote_id.as_ref().unwrap().as_str(), "srv-1");

    app.monitor.set_online(true);
    app.service.sync_now().await.unwrap();

    let final_record = app.service.get_poi(record.id).await.unwrap().unwrap();
    assert_eq!(final_record.sync_status, SyncStatus::Synced);
    assert_eq!(app.remote.location("srv-1").unwrap().latitude, 14.6928);
}

#[tokio::test]
async fn reset_wipes_records_and_queue() {
    let app = setup_app(false, RemoteBehavior::Succeed).await;
    app.service.create_poi(poi("a")).await.unwrap();
    app.service.create_poi(poi("b")).await.unwrap();

    app.service.reset().await.unwrap();

    assert!(app.service.list_pois().await.unwrap().is_empty());
    assert_eq!(app.queue.len().await.unwrap(), 0);
    let summary = app.service.sync_summary().await.unwrap();
    assert_eq!(summary.pending + summary.queued, 0);
}
