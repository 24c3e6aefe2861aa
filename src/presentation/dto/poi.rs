use crate::domain::entities::{PoiRecord, SyncPassOutcome, SyncSummary};
use crate::presentation::dto::Validate;
use serde::{Deserialize, Serialize};

const MAX_NAME_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 2_000;
const MAX_PHOTOS: usize = 10;

fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), String> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err("Latitude must be between -90 and 90".to_string());
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err("Longitude must be between -180 and 180".to_string());
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePoiRequest {
    pub name: String,
    pub description: Option<String>,
    pub category_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub photos: Option<Vec<String>>,
}

impl Validate for CreatePoiRequest {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        if self.name.len() > MAX_NAME_LEN {
            return Err("Name is too long (max 200 characters)".to_string());
        }
        if self.category_id.trim().is_empty() {
            return Err("Category is required".to_string());
        }
        if let Some(description) = &self.description {
            if description.len() > MAX_DESCRIPTION_LEN {
                return Err("Description is too long (max 2000 characters)".to_string());
            }
        }
        if let Some(photos) = &self.photos {
            if photos.len() > MAX_PHOTOS {
                return Err("Too many photos (max 10)".to_string());
            }
        }
        validate_coordinates(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePoiRequest {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub photos: Option<Vec<String>>,
}

impl Validate for UpdatePoiRequest {
    fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("POI id is required".to_string());
        }
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err("Name cannot be blank".to_string());
            }
            if name.len() > MAX_NAME_LEN {
                return Err("Name is too long (max 200 characters)".to_string());
            }
        }
        if let Some(category_id) = &self.category_id {
            if category_id.trim().is_empty() {
                return Err("Category cannot be blank".to_string());
            }
        }
        if let Some(description) = &self.description {
            if description.len() > MAX_DESCRIPTION_LEN {
                return Err("Description is too long (max 2000 characters)".to_string());
            }
        }
        if let Some(photos) = &self.photos {
            if photos.len() > MAX_PHOTOS {
                return Err("Too many photos (max 10)".to_string());
            }
        }
        if let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) {
            return validate_coordinates(latitude, longitude);
        }
        if let Some(latitude) = self.latitude {
            validate_coordinates(latitude, 0.0)?;
        }
        if let Some(longitude) = self.longitude {
            validate_coordinates(0.0, longitude)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoiIdRequest {
    pub id: String,
}

impl Validate for PoiIdRequest {
    fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("POI id is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoiResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub photos: Option<Vec<String>>,
    pub created_at: i64,
    pub sync_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,
}

impl From<PoiRecord> for PoiResponse {
    fn from(record: PoiRecord) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.payload.name,
            description: record.payload.description,
            category_id: record.payload.category_id,
            latitude: record.payload.latitude,
            longitude: record.payload.longitude,
            photos: record.payload.photos,
            created_at: record.created_at.timestamp_millis(),
            sync_status: record.sync_status.to_string(),
            sync_error: record.sync_error,
            remote_id: record.remote_id.map(|id| id.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummaryResponse {
    pub pending: u32,
    pub syncing: u32,
    pub synced: u32,
    pub error: u32,
    pub queued: u32,
    pub stuck: u32,
}

impl From<SyncSummary> for SyncSummaryResponse {
    fn from(summary: SyncSummary) -> Self {
        Self {
            pending: summary.pending,
            syncing: summary.syncing,
            synced: summary.synced,
            error: summary.error,
            queued: summary.queued,
            stuck: summary.stuck,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPassResponse {
    pub ran: bool,
    pub synced_count: u32,
    pub failed_count: u32,
    pub skipped_count: u32,
    pub auth_required: bool,
}

impl From<SyncPassOutcome> for SyncPassResponse {
    fn from(outcome: SyncPassOutcome) -> Self {
        Self {
            ran: outcome.ran,
            synced_count: outcome.synced_count,
            failed_count: outcome.failed_count,
            skipped_count: outcome.skipped_count,
            auth_required: outcome.auth_required,
        }
    }
}
