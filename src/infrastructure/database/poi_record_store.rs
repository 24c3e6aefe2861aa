use crate::application::ports::record_store::PoiRecordStore;
use crate::domain::entities::{PoiPayload, PoiRecord, RecordStatusCounts};
use crate::domain::value_objects::{LocalId, RemoteId, SyncStatus};
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use super::mappers::{photos_to_column, poi_record_from_row};
use super::rows::PoiRow;

pub struct SqlitePoiRecordStore {
    pool: SqlitePool,
}

impl SqlitePoiRecordStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PoiRecordStore for SqlitePoiRecordStore {
    async fn insert(&self, payload: PoiPayload) -> Result<PoiRecord, AppError> {
        let id = LocalId::generate();
        // The column stores milliseconds; the returned record must carry the
        // same precision so it equals any later read of the row.
        let millis = Utc::now().timestamp_millis();
        let created_at = DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| AppError::Database(format!("Timestamp out of range: {millis}")))?;
        let photos = photos_to_column(&payload.photos)?;

        sqlx::query(
            r#"
            INSERT INTO pois (
                local_id, name, description, category_id, latitude, longitude,
                photos, created_at, sync_status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(id.as_str())
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(&payload.category_id)
        .bind(payload.latitude)
        .bind(payload.longitude)
        .bind(&photos)
        .bind(created_at.timestamp_millis())
        .bind(SyncStatus::Pending.as_str())
        .execute(&self.pool)
        .await?;

        Ok(PoiRecord::new(id, payload, created_at))
    }

    async fn get(&self, id: &LocalId) -> Result<Option<PoiRecord>, AppError> {
        let row = sqlx::query_as::<_, PoiRow>("SELECT * FROM pois WHERE local_id = ?1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(poi_record_from_row).transpose()
    }

    async fn get_all(&self) -> Result<Vec<PoiRecord>, AppError> {
        let rows = sqlx::query_as::<_, PoiRow>(
            "SELECT * FROM pois ORDER BY created_at DESC, local_id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(poi_record_from_row).collect()
    }

    async fn get_pending(&self) -> Result<Vec<PoiRecord>, AppError> {
        let rows = sqlx::query_as::<_, PoiRow>(
            r#"
            SELECT * FROM pois
            WHERE sync_status = 'pending'
            ORDER BY created_at ASC, local_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(poi_record_from_row).collect()
    }

    async fn update_sync_status(
        &self,
        id: &LocalId,
        status: SyncStatus,
        remote_id: Option<&RemoteId>,
        error: Option<&str>,
    ) -> Result<(), AppError> {
        // No-op for unknown ids: the queue can outlive its record.
        sqlx::query(
            r#"
            UPDATE pois
            SET sync_status = ?1,
                sync_error = ?2,
                remote_id = COALESCE(?3, remote_id)
            WHERE local_id = ?4
            "#,
        )
        .bind(status.as_str())
        .bind(error)
        .bind(remote_id.map(RemoteId::as_str))
        .bind(id.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_payload(&self, id: &LocalId, payload: &PoiPayload) -> Result<(), AppError> {
        let photos = photos_to_column(&payload.photos)?;

        let result = sqlx::query(
            r#"
            UPDATE pois
            SET name = ?1, description = ?2, category_id = ?3,
                latitude = ?4, longitude = ?5, photos = ?6
            WHERE local_id = ?7
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(&payload.category_id)
        .bind(payload.latitude)
        .bind(payload.longitude)
        .bind(&photos)
        .bind(id.as_str())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("POI {id}")));
        }
        Ok(())
    }

    async fn delete(&self, id: &LocalId) -> Result<(), AppError> {
        sqlx::query("DELETE FROM pois WHERE local_id = ?1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn clear_all(&self) -> Result<(), AppError> {
        sqlx::query("DELETE FROM pois").execute(&self.pool).await?;
        Ok(())
    }

    async fn count_by_status(&self) -> Result<RecordStatusCounts, AppError> {
        let rows = sqlx::query(
            "SELECT sync_status, COUNT(*) as count FROM pois GROUP BY sync_status",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut counts = RecordStatusCounts::default();
        for row in rows {
            let status: String = row.try_get("sync_status")?;
            let count: i64 = row.try_get("count")?;
            let count = u32::try_from(count).unwrap_or(u32::MAX);
            match status.as_str() {
                "pending" => counts.pending = count,
                "syncing" => counts.syncing = count,
                "synced" => counts.synced = count,
                "error" => counts.error = count,
                other => {
                    return Err(AppError::Database(format!("Unknown sync status: {other}")));
                }
            }
        }

        Ok(counts)
    }
}
