use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::TransactionTrait;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

use super::validation::CONTAINER_CODE_REGEX;
use crate::db::DbPool;
use crate::entities::{container, ContainerSize, ContainerType};
use crate::errors::ServiceError;
use crate::repositories::{FreightRepository, NewContainer, SeaOrmRepository};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[schema(example = json!({"container_code": "MSCU1234567", "size": "FORTY_FOOT", "container_type": "DRY"}))]
pub struct CreateContainerRequest {
    #[validate(regex(
        path = "CONTAINER_CODE_REGEX",
        message = "must be 4 capital letters followed by 7 digits"
    ))]
    pub container_code: String,
    pub size: ContainerSize,
    pub container_type: ContainerType,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContainerResponse {
    pub id: i32,
    pub container_code: String,
    pub size: ContainerSize,
    pub container_type: ContainerType,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<container::Model> for ContainerResponse {
    fn from(model: container::Model) -> Self {
        Self {
            id: model.id,
            container_code: model.container_code,
            size: model.size,
            container_type: model.container_type,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct ContainerService {
    db: Arc<DbPool>,
}

impl ContainerService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(container_code = %request.container_code))]
    pub async fn create_container(
        &self,
        request: CreateContainerRequest,
    ) -> Result<ContainerResponse, ServiceError> {
        let container = self
            .db
            .transaction::<_, container::Model, ServiceError>(|txn| {
                Box::pin(
                    async move { create_container(&SeaOrmRepository::new(txn), request).await },
                )
            })
            .await?;

        info!(container_id = container.id, "Container registered");
        Ok(container.into())
    }

    #[instrument(skip(self))]
    pub async fn get_container(&self, id: i32) -> Result<ContainerResponse, ServiceError> {
        let repo = SeaOrmRepository::new(self.db.as_ref());
        repo.find_container(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| ServiceError::NotFound(format!("Container not found: {}", id)))
    }

    #[instrument(skip(self))]
    pub async fn list_containers(&self) -> Result<Vec<ContainerResponse>, ServiceError> {
        let repo = SeaOrmRepository::new(self.db.as_ref());
        let containers = repo.list_containers().await?;
        Ok(containers.into_iter().map(Into::into).collect())
    }
}

pub(crate) async fn create_container<R>(
    repo: &R,
    request: CreateContainerRequest,
) -> Result<container::Model, ServiceError>
where
    R: FreightRepository + ?Sized,
{
    if repo.container_exists_by_code(&request.container_code).await? {
        warn!(container_code = %request.container_code, "Duplicate container code");
        return Err(ServiceError::Conflict(format!(
            "Container with code already exists: {}",
            request.container_code
        )));
    }

    repo.insert_container(NewContainer {
        container_code: request.container_code,
        size: request.size,
        container_type: request.container_type,
    })
    .await
}
