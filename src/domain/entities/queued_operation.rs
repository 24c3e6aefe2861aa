use crate::domain::entities::poi_record::PoiPayload;
use crate::domain::value_objects::{LocalId, OperationKind, RemoteId};
use serde::{Deserialize, Serialize};

/// Self-contained snapshot of one mutating operation. Stored serialized in
/// the queue so it stays valid even after the source record is mutated or
/// deleted locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueuedOperation {
    CreatePoi {
        local_id: LocalId,
        poi: PoiPayload,
    },
    UpdatePoi {
        local_id: LocalId,
        poi: PoiPayload,
    },
    DeletePoi {
        local_id: LocalId,
        remote_id: Option<RemoteId>,
    },
}

impl QueuedOperation {
    pub fn kind(&self) -> OperationKind {
        match self {
            QueuedOperation::CreatePoi { .. } => OperationKind::CreatePoi,
            QueuedOperation::UpdatePoi { .. } => OperationKind::UpdatePoi,
            QueuedOperation::DeletePoi { .. } => OperationKind::DeletePoi,
        }
    }

    pub fn local_id(&self) -> &LocalId {
        match self {
            QueuedOperation::CreatePoi { local_id, .. }
            | QueuedOperation::UpdatePoi { local_id, .. }
            | QueuedOperation::DeletePoi { local_id, .. } => local_id,
        }
    }

    pub fn to_json_string(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("Invalid queue payload: {e}"))
    }

    pub fn from_json_str(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid queue payload: {e}"))
    }
}
