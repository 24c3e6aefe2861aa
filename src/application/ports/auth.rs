use super::remote_api::RemoteApiError;
use async_trait::async_trait;

/// External auth capability. Yields `Unauthorized` when no session exists,
/// which the engine surfaces as a re-auth requirement.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, RemoteApiError>;
}
