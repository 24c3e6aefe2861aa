use crate::domain::value_objects::{LocalId, RemoteId, SyncStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User-captured POI fields. Opaque to the sync engine; it only ships them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiPayload {
    pub name: String,
    pub description: Option<String>,
    pub category_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub photos: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiRecord {
    pub id: LocalId,
    pub payload: PoiPayload,
    pub created_at: DateTime<Utc>,
    pub sync_status: SyncStatus,
    pub sync_error: Option<String>,
    pub remote_id: Option<RemoteId>,
}

impl PoiRecord {
    pub fn new(id: LocalId, payload: PoiPayload, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            payload,
            created_at,
            sync_status: SyncStatus::Pending,
            sync_error: None,
            remote_id: None,
        }
    }

    /// A record only carries an error message while in the error state.
    pub fn has_consistent_error_state(&self) -> bool {
        match self.sync_status {
            SyncStatus::Error => self
                .sync_error
                .as_deref()
                .is_some_and(|msg| !msg.is_empty()),
            _ => true,
        }
    }
}

/// Partial edit applied to an existing record; absent fields stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoiPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub photos: Option<Vec<String>>,
}

impl PoiPatch {
    pub fn apply(&self, payload: &mut PoiPayload) {
        if let Some(name) = &self.name {
            payload.name = name.clone();
        }
        if let Some(description) = &self.description {
            payload.description = Some(description.clone());
        }
        if let Some(category_id) = &self.category_id {
            payload.category_id = category_id.clone();
        }
        if let Some(latitude) = self.latitude {
            payload.latitude = latitude;
        }
        if let Some(longitude) = self.longitude {
            payload.longitude = longitude;
        }
        if let Some(photos) = &self.photos {
            payload.photos = Some(photos.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.category_id.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.photos.is_none()
    }
}
