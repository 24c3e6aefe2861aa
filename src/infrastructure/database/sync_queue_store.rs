use crate::application::ports::queue_store::SyncQueueStore;
use crate::domain::entities::{QueuedOperation, SyncQueueItem, MAX_ATTEMPTS};
use crate::domain::value_objects::{LocalId, SyncQueueId};
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use super::mappers::queue_item_from_row;
use super::rows::SyncQueueRow;

pub struct SqliteSyncQueueStore {
    pool: SqlitePool,
    max_attempts: u32,
}

impl SqliteSyncQueueStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_max_attempts(pool, MAX_ATTEMPTS)
    }

    pub fn with_max_attempts(pool: SqlitePool, max_attempts: u32) -> Self {
        Self { pool, max_attempts }
    }
}

#[async_trait]
impl SyncQueueStore for SqliteSyncQueueStore {
    async fn enqueue(&self, operation: &QueuedOperation) -> Result<SyncQueueId, AppError> {
        let payload = operation
            .to_json_string()
            .map_err(AppError::SerializationError)?;

        let result = sqlx::query(
            r#"
            INSERT INTO sync_queue (operation_type, local_id, payload, attempts, created_at)
            VALUES (?1, ?2, ?3, 0, ?4)
            "#,
        )
        .bind(operation.kind().as_str())
        .bind(operation.local_id().as_str())
        .bind(&payload)
        .bind(Utc::now().timestamp_millis())
        .execute(&self.pool)
        .await?;

        SyncQueueId::new(result.last_insert_rowid()).map_err(AppError::Database)
    }

    async fn get_eligible(&self, limit: u32) -> Result<Vec<SyncQueueItem>, AppError> {
        let rows = sqlx::query_as::<_, SyncQueueRow>(
            r#"
            SELECT * FROM sync_queue
            WHERE attempts < ?1
            ORDER BY created_at ASC, id ASC
            LIMIT ?2
            "#,
        )
        .bind(i64::from(self.max_attempts))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(queue_item_from_row).collect()
    }

    async fn record_attempt(
        &self,
        id: SyncQueueId,
        error: Option<&str>,
    ) -> Result<u32, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE sync_queue
            SET attempts = attempts + 1, last_attempt_at = ?1, error_message = ?2
            WHERE id = ?3
            "#,
        )
        .bind(Utc::now().timestamp_millis())
        .bind(error)
        .bind(id.value())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Queue item {id}")));
        }

        let row = sqlx::query("SELECT attempts FROM sync_queue WHERE id = ?1")
            .bind(id.value())
            .fetch_one(&self.pool)
            .await?;
        let attempts: i64 = row.try_get("attempts")?;

        Ok(u32::try_from(attempts).unwrap_or(u32::MAX))
    }

    async fn remove(&self, id: SyncQueueId) -> Result<(), AppError> {
        sqlx::query("DELETE FROM sync_queue WHERE id = ?1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn remove_for_record(&self, local_id: &LocalId) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM sync_queue WHERE local_id = ?1")
            .bind(local_id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn reset_attempts_for_record(&self, local_id: &LocalId) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE sync_queue SET attempts = 0, error_message = NULL WHERE local_id = ?1",
        )
        .bind(local_id.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn stuck_items(&self) -> Result<Vec<SyncQueueItem>, AppError> {
        let rows = sqlx::query_as::<_, SyncQueueRow>(
            r#"
            SELECT * FROM sync_queue
            WHERE attempts >= ?1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(i64::from(self.max_attempts))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(queue_item_from_row).collect()
    }

    async fn len(&self) -> Result<u32, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM sync_queue")
            .fetch_one(&self.pool)
            .await?;
        let count: i64 = row.try_get("count")?;

        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    async fn clear_all(&self) -> Result<(), AppError> {
        sqlx::query("DELETE FROM sync_queue")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
