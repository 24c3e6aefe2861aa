use crate::application::ports::auth::AccessTokenProvider;
use crate::application::ports::remote_api::{RemoteApiError, RemoteLocationApi};
use crate::domain::entities::PoiPayload;
use crate::domain::value_objects::RemoteId;
use crate::shared::config::RemoteConfig;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CreatedLocation {
    id: String,
}

/// reqwest-backed client for the GeoCollect locations API.
pub struct HttpRemoteLocationApi {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl HttpRemoteLocationApi {
    pub fn new(
        config: &RemoteConfig,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self, RemoteApiError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("geocollect/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| RemoteApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    fn locations_url(&self, remote_id: Option<&RemoteId>) -> String {
        match remote_id {
            Some(id) => format!("{}/locations/{}", self.base_url, id),
            None => format!("{}/locations", self.base_url),
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, RemoteApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::UNAUTHORIZED => Err(RemoteApiError::Unauthorized),
            status if status.is_client_error() => {
                let message = response.text().await.unwrap_or_default();
                Err(RemoteApiError::Rejected {
                    status: status.as_u16(),
                    message,
                })
            }
            status => Err(RemoteApiError::Server {
                status: status.as_u16(),
            }),
        }
    }
}

#[async_trait]
impl RemoteLocationApi for HttpRemoteLocationApi {
    async fn create_location(&self, poi: &PoiPayload) -> Result<RemoteId, RemoteApiError> {
        let token = self.tokens.access_token().await?;
        debug!(name = %poi.name, "POST /locations");

        let response = self
            .client
            .post(self.locations_url(None))
            .bearer_auth(token)
            .json(poi)
            .send()
            .await
            .map_err(|e| RemoteApiError::Network(e.to_string()))?;

        let response = Self::check_status(response).await?;
        let created: CreatedLocation = response
            .json()
            .await
            .map_err(|e| RemoteApiError::InvalidResponse(e.to_string()))?;

        RemoteId::new(created.id).map_err(RemoteApiError::InvalidResponse)
    }

    async fn update_location(
        &self,
        id: &RemoteId,
        poi: &PoiPayload,
    ) -> Result<(), RemoteApiError> {
        let token = self.tokens.access_token().await?;
        debug!(remote_id = %id, "PATCH /locations/{{id}}");

        let response = self
            .client
            .patch(self.locations_url(Some(id)))
            .bearer_auth(token)
            .json(poi)
            .send()
            .await
            .map_err(|e| RemoteApiError::Network(e.to_string()))?;

        Self::check_status(response).await?;
        Ok(())
    }

    async fn delete_location(&self, id: &RemoteId) -> Result<(), RemoteApiError> {
        let token = self.tokens.access_token().await?;
        debug!(remote_id = %id, "DELETE /locations/{{id}}");

        let response = self
            .client
            .delete(self.locations_url(Some(id)))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| RemoteApiError::Network(e.to_string()))?;

        Self::check_status(response).await?;
        Ok(())
    }
}
