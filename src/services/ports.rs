use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::TransactionTrait;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

use super::validation::{validate_not_blank, UNLOCODE_REGEX};
use crate::db::DbPool;
use crate::entities::port;
use crate::errors::ServiceError;
use crate::repositories::{FreightRepository, NewPort, SeaOrmRepository};

/// Request to register a port
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[schema(example = json!({"unlocode": "NLRTM", "name": "Rotterdam", "country": "Netherlands"}))]
pub struct CreatePortRequest {
    /// UN/LOCODE, e.g. `NLRTM`
    #[validate(regex(path = "UNLOCODE_REGEX", message = "must be a 5-character UN/LOCODE"))]
    pub unlocode: String,
    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub name: String,
    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PortResponse {
    pub id: i32,
    pub unlocode: String,
    pub name: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<port::Model> for PortResponse {
    fn from(model: port::Model) -> Self {
        Self {
            id: model.id,
            unlocode: model.unlocode,
            name: model.name,
            country: model.country,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Service for port reference data
#[derive(Clone)]
pub struct PortService {
    db: Arc<DbPool>,
}

impl PortService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(unlocode = %request.unlocode))]
    pub async fn create_port(&self, request: CreatePortRequest) -> Result<PortResponse, ServiceError> {
        let port = self
            .db
            .transaction::<_, port::Model, ServiceError>(|txn| {
                Box::pin(async move { create_port(&SeaOrmRepository::new(txn), request).await })
            })
            .await?;

        info!(port_id = port.id, "Port created");
        Ok(port.into())
    }

    #[instrument(skip(self))]
    pub async fn get_port(&self, id: i32) -> Result<PortResponse, ServiceError> {
        let repo = SeaOrmRepository::new(self.db.as_ref());
        get_port(&repo, id).await.map(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn list_ports(&self) -> Result<Vec<PortResponse>, ServiceError> {
        let repo = SeaOrmRepository::new(self.db.as_ref());
        let ports = repo.list_ports().await?;
        Ok(ports.into_iter().map(Into::into).collect())
    }
}

pub(crate) async fn create_port<R>(
    repo: &R,
    request: CreatePortRequest,
) -> Result<port::Model, ServiceError>
where
    R: FreightRepository + ?Sized,
{
    if repo.port_exists_by_unlocode(&request.unlocode).await? {
        warn!(unlocode = %request.unlocode, "Duplicate UN/LOCODE");
        return Err(ServiceError::Conflict(format!(
            "Port with unlocode already exists: {}",
            request.unlocode
        )));
    }

    repo.insert_port(NewPort {
        unlocode: request.unlocode,
        name: request.name.trim().to_string(),
        country: request.country.trim().to_string(),
    })
    .await
}

pub(crate) async fn get_port<R>(repo: &R, id: i32) -> Result<port::Model, ServiceError>
where
    R: FreightRepository + ?Sized,
{
    repo.find_port(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Port not found: {}", id)))
}
