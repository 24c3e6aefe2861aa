use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const LOCAL_PREFIX: &str = "local:";

/// Locally generated POI identifier, namespaced so it can never be
/// mistaken for a server-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalId(String);

impl LocalId {
    pub fn generate() -> Self {
        Self(format!("{}{}", LOCAL_PREFIX, Uuid::new_v4()))
    }

    pub fn new(value: String) -> Result<Self, String> {
        Self::validate(&value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_local(value: &str) -> bool {
        value.starts_with(LOCAL_PREFIX)
    }

    fn validate(value: &str) -> Result<(), String> {
        let Some(suffix) = value.strip_prefix(LOCAL_PREFIX) else {
            return Err(format!("Local id must start with '{LOCAL_PREFIX}'"));
        };
        if suffix.trim().is_empty() {
            return Err("Local id cannot be empty".to_string());
        }
        Ok(())
    }
}

impl fmt::Display for LocalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<LocalId> for String {
    fn from(id: LocalId) -> Self {
        id.0
    }
}
