use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PoiRow {
    pub local_id: String,
    pub name: String,
    pub description: Option<String>,
    pub category_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub photos: Option<String>,
    pub created_at: i64,
    pub sync_status: String,
    pub sync_error: Option<String>,
    pub remote_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SyncQueueRow {
    pub id: i64,
    pub operation_type: String,
    pub local_id: String,
    pub payload: String,
    pub attempts: i64,
    pub created_at: i64,
    pub last_attempt_at: Option<i64>,
    pub error_message: Option<String>,
}
