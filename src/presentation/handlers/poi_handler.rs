use crate::application::services::poi_service::PoiServiceTrait;
use crate::domain::entities::{PoiPatch, PoiPayload};
use crate::domain::value_objects::LocalId;
use crate::presentation::dto::poi::{
    CreatePoiRequest, PoiIdRequest, PoiResponse, SyncPassResponse, SyncSummaryResponse,
    UpdatePoiRequest,
};
use crate::presentation::dto::Validate;
use crate::shared::AppError;
use std::sync::Arc;

pub struct PoiHandler {
    service: Arc<dyn PoiServiceTrait>,
}

impl PoiHandler {
    pub fn new(service: Arc<dyn PoiServiceTrait>) -> Self {
        Self { service }
    }

    pub async fn create_poi(&self, request: CreatePoiRequest) -> Result<PoiResponse, AppError> {
        request.validate().map_err(AppError::ValidationError)?;

        let payload = PoiPayload {
            name: request.name,
            description: request.description,
            category_id: request.category_id,
            latitude: request.latitude,
            longitude: request.longitude,
            photos: request.photos,
        };

        let record = self.service.create_poi(payload).await?;
        Ok(record.into())
    }

    pub async fn update_poi(&self, request: UpdatePoiRequest) -> Result<PoiResponse, AppError> {
        request.validate().map_err(AppError::ValidationError)?;

        let id = parse_local_id(&request.id)?;
        let patch = PoiPatch {
            name: request.name,
            description: request.description,
            category_id: request.category_id,
            latitude: request.latitude,
            longitude: request.longitude,
            photos: request.photos,
        };

        let record = self.service.update_poi(id, patch).await?;
        Ok(record.into())
    }

    pub async fn delete_poi(&self, request: PoiIdRequest) -> Result<(), AppError> {
        request.validate().map_err(AppError::ValidationError)?;

        let id = parse_local_id(&request.id)?;
        self.service.delete_poi(id).await
    }

    pub async fn get_poi(&self, request: PoiIdRequest) -> Result<Option<PoiResponse>, AppError> {
        request.validate().map_err(AppError::ValidationError)?;

        let id = parse_local_id(&request.id)?;
        Ok(self.service.get_poi(id).await?.map(PoiResponse::from))
    }

    pub async fn list_pois(&self) -> Result<Vec<PoiResponse>, AppError> {
        let records = self.service.list_pois().await?;
        Ok(records.into_iter().map(PoiResponse::from).collect())
    }

    pub async fn sync_now(&self) -> Result<SyncPassResponse, AppError> {
        Ok(self.service.sync_now().await?.into())
    }

    pub async fn get_sync_summary(&self) -> Result<SyncSummaryResponse, AppError> {
        Ok(self.service.sync_summary().await?.into())
    }

    pub async fn retry_poi(&self, request: PoiIdRequest) -> Result<(), AppError> {
        request.validate().map_err(AppError::ValidationError)?;

        let id = parse_local_id(&request.id)?;
        self.service.retry_poi(id).await
    }

    pub async fn reset(&self) -> Result<(), AppError> {
        self.service.reset().await
    }
}

fn parse_local_id(value: &str) -> Result<LocalId, AppError> {
    LocalId::new(value.to_string()).map_err(AppError::InvalidInput)
}
