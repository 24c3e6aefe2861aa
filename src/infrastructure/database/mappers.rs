use crate::domain::entities::{PoiPayload, PoiRecord, QueuedOperation, SyncQueueItem};
use crate::domain::value_objects::{LocalId, OperationKind, RemoteId, SyncQueueId, SyncStatus};
use crate::shared::error::AppError;
use chrono::{DateTime, Utc};
use std::str::FromStr;

use super::rows::{PoiRow, SyncQueueRow};

fn datetime_from_millis(millis: i64) -> Result<DateTime<Utc>, AppError> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| AppError::Database(format!("Timestamp out of range: {millis}")))
}

pub fn poi_record_from_row(row: PoiRow) -> Result<PoiRecord, AppError> {
    let photos = row
        .photos
        .as_deref()
        .map(serde_json::from_str::<Vec<String>>)
        .transpose()
        .map_err(|e| AppError::Database(format!("Corrupt photos column: {e}")))?;

    Ok(PoiRecord {
        id: LocalId::new(row.local_id).map_err(AppError::Database)?,
        payload: PoiPayload {
            name: row.name,
            description: row.description,
            category_id: row.category_id,
            latitude: row.latitude,
            longitude: row.longitude,
            photos,
        },
        created_at: datetime_from_millis(row.created_at)?,
        sync_status: SyncStatus::from_str(&row.sync_status).map_err(AppError::Database)?,
        sync_error: row.sync_error,
        remote_id: row
            .remote_id
            .map(RemoteId::new)
            .transpose()
            .map_err(AppError::Database)?,
    })
}

pub fn queue_item_from_row(row: SyncQueueRow) -> Result<SyncQueueItem, AppError> {
    let operation = QueuedOperation::from_json_str(&row.payload).map_err(AppError::Database)?;
    let kind = OperationKind::from_str(&row.operation_type).map_err(AppError::Database)?;

    Ok(SyncQueueItem {
        id: SyncQueueId::new(row.id).map_err(AppError::Database)?,
        kind,
        local_id: LocalId::new(row.local_id).map_err(AppError::Database)?,
        operation,
        attempts: u32::try_from(row.attempts)
            .map_err(|_| AppError::Database(format!("Negative attempt count: {}", row.attempts)))?,
        created_at: datetime_from_millis(row.created_at)?,
        last_attempt_at: row.last_attempt_at.map(datetime_from_millis).transpose()?,
        error: row.error_message,
    })
}

pub fn photos_to_column(photos: &Option<Vec<String>>) -> Result<Option<String>, AppError> {
    photos
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| AppError::SerializationError(e.to_string()))
}
