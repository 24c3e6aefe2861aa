use crate::application::ports::auth::AccessTokenProvider;
use crate::application::ports::remote_api::RemoteApiError;
use async_trait::async_trait;
use std::sync::RwLock;

/// Holds the bearer token obtained by the embedder's auth flow. The core
/// never refreshes it; a 401 surfaces a re-auth requirement instead.
#[derive(Default)]
pub struct SessionTokenProvider {
    token: RwLock<Option<String>>,
}

impl SessionTokenProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_token(&self, token: String) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(token);
    }

    pub fn clear(&self) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }
}

#[async_trait]
impl AccessTokenProvider for SessionTokenProvider {
    async fn access_token(&self) -> Result<String, RemoteApiError> {
        let guard = self.token.read().unwrap_or_else(|e| e.into_inner());
        guard.clone().ok_or(RemoteApiError::Unauthorized)
    }
}
