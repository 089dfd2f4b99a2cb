use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::TransactionTrait;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

use super::validation::validate_not_blank;
use crate::db::DbPool;
use crate::entities::vessel;
use crate::errors::ServiceError;
use crate::repositories::{FreightRepository, NewVessel, SeaOrmRepository};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[schema(example = json!({"name": "Ever Given", "imo_number": "IMO9811000", "capacity_teu": 20124}))]
pub struct CreateVesselRequest {
    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub name: String,
    #[validate(length(min = 7, max = 16), custom = "validate_not_blank")]
    pub imo_number: String,
    #[validate(range(min = 1, message = "must be a positive number of TEU"))]
    pub capacity_teu: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VesselResponse {
    pub id: i32,
    pub name: String,
    pub imo_number: String,
    pub capacity_teu: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<vessel::Model> for VesselResponse {
    fn from(model: vessel::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            imo_number: model.imo_number,
            capacity_teu: model.capacity_teu,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct VesselService {
    db: Arc<DbPool>,
}

impl VesselService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(imo_number = %request.imo_number))]
    pub async fn create_vessel(
        &self,
        request: CreateVesselRequest,
    ) -> Result<VesselResponse, ServiceError> {
        let vessel = self
            .db
            .transaction::<_, vessel::Model, ServiceError>(|txn| {
                Box::pin(async move { create_vessel(&SeaOrmRepository::new(txn), request).await })
            })
            .await?;

        info!(vessel_id = vessel.id, "Vessel created");
        Ok(vessel.into())
    }

    #[instrument(skip(self))]
    pub async fn get_vessel(&self, id: i32) -> Result<VesselResponse, ServiceError> {
        let repo = SeaOrmRepository::new(self.db.as_ref());
        repo.find_vessel(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| ServiceError::NotFound(format!("Vessel not found: {}", id)))
    }

    #[instrument(skip(self))]
    pub async fn list_vessels(&self) -> Result<Vec<VesselResponse>, ServiceError> {
        let repo = SeaOrmRepository::new(self.db.as_ref());
        let vessels = repo.list_vessels().await?;
        Ok(vessels.into_iter().map(Into::into).collect())
    }
}

pub(crate) async fn create_vessel<R>(
    repo: &R,
    request: CreateVesselRequest,
) -> Result<vessel::Model, ServiceError>
where
    R: FreightRepository + ?Sized,
{
    let imo_number = request.imo_number.trim().to_string();
    if repo.vessel_exists_by_imo(&imo_number).await? {
        warn!(imo_number = %imo_number, "Duplicate IMO number");
        return Err(ServiceError::Conflict(format!(
            "Vessel with IMO number already exists: {}",
            imo_number
        )));
    }

    repo.insert_vessel(NewVessel {
        name: request.name.trim().to_string(),
        imo_number,
        capacity_teu: request.capacity_teu,
    })
    .await
}
