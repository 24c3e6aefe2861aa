use crate::domain::entities::PoiPayload;
use crate::domain::value_objects::RemoteId;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteApiError {
    /// 401. Aborts the whole pass; retrying other items with a dead token
    /// is pointless.
    #[error("Authentication required")]
    Unauthorized,

    /// Other 4xx. Falls under the same attempt ceiling as transient errors.
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Server error ({status})")]
    Server { status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// The GeoCollect REST API, seen from the capture flow. The engine is the
/// only caller.
#[async_trait]
pub trait RemoteLocationApi: Send + Sync {
    /// `POST /locations`; returns the server-assigned id.
    async fn create_location(&self, poi: &PoiPayload) -> Result<RemoteId, RemoteApiError>;

    /// `PATCH /locations/{id}`.
    async fn update_location(&self, id: &RemoteId, poi: &PoiPayload)
        -> Result<(), RemoteApiError>;

    /// `DELETE /locations/{id}`.
    async fn delete_location(&self, id: &RemoteId) -> Result<(), RemoteApiError>;
}
