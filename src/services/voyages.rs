use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::TransactionTrait;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::distinct_ids;
use super::pricing::{money, normalize_base_price};
use super::validation::validate_not_blank;
use crate::common::{Page, PageRequest};
use crate::db::DbPool;
use crate::entities::{voyage, voyage_price, ContainerSize, VoyageStatus};
use crate::errors::ServiceError;
use crate::repositories::{FreightRepository, NewVoyage, NewVoyagePrice, SeaOrmRepository};

const PRICE_EXISTS: &str = "Price already exists for this container size on this voyage";

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "voyage_number": "VOY-2025-001",
    "vessel_id": 1,
    "departure_port_id": 1,
    "arrival_port_id": 2,
    "departure_time": "2030-03-01T08:00:00Z",
    "arrival_time": "2030-03-21T17:00:00Z"
}))]
pub struct CreateVoyageRequest {
    #[validate(length(max = 32), custom = "validate_not_blank")]
    pub voyage_number: String,
    pub vessel_id: i32,
    pub departure_port_id: i32,
    pub arrival_port_id: i32,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    /// Defaults to `PLANNED`
    pub status: Option<VoyageStatus>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VoyageListParams {
    pub status: Option<VoyageStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VoyageResponse {
    pub id: i32,
    pub voyage_number: String,
    pub vessel_id: i32,
    pub vessel_name: String,
    pub departure_port_id: i32,
    pub departure_port_name: String,
    pub arrival_port_id: i32,
    pub arrival_port_name: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub status: VoyageStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Base price must be greater than 0 and at most 9999999999.99; it is stored at two decimal places
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"container_size": "TWENTY_FOOT", "base_price_usd": "1000.00"}))]
pub struct CreateVoyagePriceRequest {
    pub container_size: ContainerSize,
    #[schema(value_type = String)]
    pub base_price_usd: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VoyagePriceResponse {
    pub id: i32,
    pub voyage_id: i32,
    pub container_size: ContainerSize,
    #[schema(value_type = String, example = "1000.00")]
    pub base_price_usd: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<voyage_price::Model> for VoyagePriceResponse {
    fn from(model: voyage_price::Model) -> Self {
        Self {
            id: model.id,
            voyage_id: model.voyage_id,
            container_size: model.container_size,
            base_price_usd: money(model.base_price_usd),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Service for voyages and their per-container-size pricing
#[derive(Clone)]
pub struct VoyageService {
    db: Arc<DbPool>,
}

impl VoyageService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(voyage_number = %request.voyage_number))]
    pub async fn create_voyage(
        &self,
        request: CreateVoyageRequest,
    ) -> Result<VoyageResponse, ServiceError> {
        let now = Utc::now();
        let response = self
            .db
            .transaction::<_, VoyageResponse, ServiceError>(|txn| {
                Box::pin(async move {
                    let repo = SeaOrmRepository::new(txn);
                    let voyage = create_voyage(&repo, request, now).await?;
                    render_voyage(&repo, voyage).await
                })
            })
            .await?;

        info!(voyage_id = response.id, status = %response.status, "Voyage created");
        Ok(response)
    }

    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: i32,
        status: VoyageStatus,
    ) -> Result<VoyageResponse, ServiceError> {
        let response = self
            .db
            .transaction::<_, VoyageResponse, ServiceError>(|txn| {
                Box::pin(async move {
                    let repo = SeaOrmRepository::new(txn);
                    let voyage = update_status(&repo, id, status).await?;
                    render_voyage(&repo, voyage).await
                })
            })
            .await?;

        info!(voyage_id = id, status = %status, "Voyage status updated");
        Ok(response)
    }

    #[instrument(skip(self))]
    pub async fn get_voyage(&self, id: i32) -> Result<VoyageResponse, ServiceError> {
        let repo = SeaOrmRepository::new(self.db.as_ref());
        let voyage = find_voyage(&repo, id).await?;
        render_voyage(&repo, voyage).await
    }

    #[instrument(skip(self))]
    pub async fn list_voyages(
        &self,
        params: VoyageListParams,
    ) -> Result<Vec<VoyageResponse>, ServiceError> {
        let repo = SeaOrmRepository::new(self.db.as_ref());
        let voyages = repo.list_voyages(params.status).await?;
        render_voyages(&repo, voyages).await
    }

    #[instrument(skip(self))]
    pub async fn delete_voyage(&self, id: i32) -> Result<(), ServiceError> {
        self.db
            .transaction::<_, (), ServiceError>(|txn| {
                Box::pin(async move { delete_voyage(&SeaOrmRepository::new(txn), id).await })
            })
            .await?;

        info!(voyage_id = id, "Voyage deleted");
        Ok(())
    }

    #[instrument(skip(self, request), fields(container_size = %request.container_size))]
    pub async fn set_price(
        &self,
        voyage_id: i32,
        request: CreateVoyagePriceRequest,
    ) -> Result<VoyagePriceResponse, ServiceError> {
        let price = self
            .db
            .transaction::<_, voyage_price::Model, ServiceError>(|txn| {
                Box::pin(
                    async move { set_price(&SeaOrmRepository::new(txn), voyage_id, request).await },
                )
            })
            .await?;

        info!(price_id = price.id, voyage_id, "Voyage price set");
        Ok(price.into())
    }

    #[instrument(skip(self))]
    pub async fn list_prices(
        &self,
        voyage_id: i32,
        page: PageRequest,
    ) -> Result<Page<VoyagePriceResponse>, ServiceError> {
        let repo = SeaOrmRepository::new(self.db.as_ref());
        find_voyage(&repo, voyage_id).await?;
        let prices = repo.list_prices(voyage_id, page).await?;
        Ok(prices.map(Into::into))
    }
}

pub(crate) async fn find_voyage<R>(repo: &R, id: i32) -> Result<voyage::Model, ServiceError>
where
    R: FreightRepository + ?Sized,
{
    repo.find_voyage(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Voyage not found: {}", id)))
}

pub(crate) async fn create_voyage<R>(
    repo: &R,
    request: CreateVoyageRequest,
    now: DateTime<Utc>,
) -> Result<voyage::Model, ServiceError>
where
    R: FreightRepository + ?Sized,
{
    if request.departure_port_id == request.arrival_port_id {
        return Err(ServiceError::BadRequest(
            "Departure port must be different from arrival port".to_string(),
        ));
    }

    if repo.find_vessel(request.vessel_id).await?.is_none() {
        return Err(ServiceError::NotFound(format!(
            "Vessel not found: {}",
            request.vessel_id
        )));
    }
    if repo.find_port(request.arrival_port_id).await?.is_none() {
        return Err(ServiceError::NotFound(format!(
            "Port not found: {}",
            request.arrival_port_id
        )));
    }
    if repo.find_port(request.departure_port_id).await?.is_none() {
        return Err(ServiceError::NotFound(format!(
            "Port not found: {}",
            request.departure_port_id
        )));
    }

    if request.departure_time <= now {
        return Err(ServiceError::BadRequest(
            "Departure date must be in future".to_string(),
        ));
    }
    if request.arrival_time < request.departure_time {
        return Err(ServiceError::BadRequest(
            "Arrival date must be after departure date".to_string(),
        ));
    }

    let voyage_number = request.voyage_number.trim().to_string();
    if repo.voyage_exists_by_number(&voyage_number).await? {
        warn!(voyage_number = %voyage_number, "Duplicate voyage number");
        return Err(ServiceError::Conflict(format!(
            "Voyage number already exists: {}",
            voyage_number
        )));
    }

    repo.insert_voyage(NewVoyage {
        voyage_number,
        vessel_id: request.vessel_id,
        departure_port_id: request.departure_port_id,
        arrival_port_id: request.arrival_port_id,
        departure_time: request.departure_time,
        arrival_time: request.arrival_time,
        status: request.status.unwrap_or(VoyageStatus::Planned),
    })
    .await
}

pub(crate) async fn update_status<R>(
    repo: &R,
    id: i32,
    status: VoyageStatus,
) -> Result<voyage::Model, ServiceError>
where
    R: FreightRepository + ?Sized,
{
    let mut voyage = find_voyage(repo, id).await?;
    voyage.status = status;
    repo.save_voyage(voyage).await
}

pub(crate) async fn delete_voyage<R>(repo: &R, id: i32) -> Result<(), ServiceError>
where
    R: FreightRepository + ?Sized,
{
    find_voyage(repo, id).await?;

    let booked = repo.count_orders_for_voyage(id).await?;
    if booked > 0 {
        warn!(voyage_id = id, booked, "Refusing to delete booked voyage");
        return Err(ServiceError::Conflict(format!(
            "Cannot delete voyage {} with {} freight order(s)",
            id, booked
        )));
    }

    repo.delete_prices_for_voyage(id).await?;
    repo.delete_voyage(id).await
}

pub(crate) async fn set_price<R>(
    repo: &R,
    voyage_id: i32,
    request: CreateVoyagePriceRequest,
) -> Result<voyage_price::Model, ServiceError>
where
    R: FreightRepository + ?Sized,
{
    find_voyage(repo, voyage_id).await?;

    if repo
        .find_price(voyage_id, request.container_size)
        .await?
        .is_some()
    {
        return Err(ServiceError::Conflict(PRICE_EXISTS.to_string()));
    }

    let base_price_usd = normalize_base_price(request.base_price_usd)?;

    repo.insert_price(NewVoyagePrice {
        voyage_id,
        container_size: request.container_size,
        base_price_usd,
    })
    .await
    .map_err(|err| match err {
        // lost a race against a concurrent insert of the same size
        ServiceError::Conflict(_) => ServiceError::Conflict(PRICE_EXISTS.to_string()),
        other => other,
    })
}

pub(crate) async fn render_voyage<R>(
    repo: &R,
    voyage: voyage::Model,
) -> Result<VoyageResponse, ServiceError>
where
    R: FreightRepository + ?Sized,
{
    let mut rendered = render_voyages(repo, vec![voyage]).await?;
    rendered
        .pop()
        .ok_or_else(|| ServiceError::InternalError("voyage rendering produced no row".into()))
}

/// Resolves vessel and port names with one batched lookup per table.
pub(crate) async fn render_voyages<R>(
    repo: &R,
    voyages: Vec<voyage::Model>,
) -> Result<Vec<VoyageResponse>, ServiceError>
where
    R: FreightRepository + ?Sized,
{
    let vessel_ids = distinct_ids(voyages.iter().map(|v| v.vessel_id));
    let port_ids = distinct_ids(
        voyages
            .iter()
            .flat_map(|v| [v.departure_port_id, v.arrival_port_id]),
    );

    let vessel_names: HashMap<i32, String> = repo
        .find_vessels(vessel_ids)
        .await?
        .into_iter()
        .map(|v| (v.id, v.name))
        .collect();
    let port_names: HashMap<i32, String> = repo
        .find_ports(port_ids)
        .await?
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect();

    Ok(voyages
        .into_iter()
        .map(|v| VoyageResponse {
            id: v.id,
            vessel_name: vessel_names.get(&v.vessel_id).cloned().unwrap_or_default(),
            departure_port_name: port_names
                .get(&v.departure_port_id)
                .cloned()
                .unwrap_or_default(),
            arrival_port_name: port_names
                .get(&v.arrival_port_id)
                .cloned()
                .unwrap_or_default(),
            voyage_number: v.voyage_number,
            vessel_id: v.vessel_id,
            departure_port_id: v.departure_port_id,
            arrival_port_id: v.arrival_port_id,
            departure_time: v.departure_time,
            arrival_time: v.arrival_time,
            status: v.status,
            created_at: v.created_at,
            updated_at: v.updated_at,
        })
        .collect())
}
