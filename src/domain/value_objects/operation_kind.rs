use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The mutating operation a queue item carries against the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    CreatePoi,
    UpdatePoi,
    DeletePoi,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::CreatePoi => "create_poi",
            OperationKind::UpdatePoi => "update_poi",
            OperationKind::DeletePoi => "delete_poi",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "create_poi" => Ok(OperationKind::CreatePoi),
            "update_poi" => Ok(OperationKind::UpdatePoi),
            "delete_poi" => Ok(OperationKind::DeletePoi),
            other => Err(format!("Unknown queue operation: {other}")),
        }
    }
}
