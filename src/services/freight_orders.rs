//! Freight order booking: the voyage/container/agent resolution and pricing workflow.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::TransactionTrait;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::agents::find_agent;
use super::distinct_ids;
use super::pricing::{final_price, money, resolve_discount};
use super::voyages::find_voyage;
use crate::common::{Page, PageRequest};
use crate::db::DbPool;
use crate::entities::{agent, freight_order, ContainerSize, ContainerType, OrderStatus};
use crate::errors::ServiceError;
use crate::repositories::{FreightRepository, NewFreightOrder, SeaOrmRepository, VoyageBooking};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "voyage_id": 1,
    "container_id": 4,
    "agent_id": 2,
    "ordered_by": "Acme Imports",
    "notes": "Keep away from heat",
    "discount_percent": "10"
}))]
pub struct CreateFreightOrderRequest {
    pub voyage_id: i32,
    pub container_id: i32,
    pub agent_id: i32,
    #[validate(length(max = 100))]
    pub ordered_by: Option<String>,
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub notes: Option<String>,
    /// Percentage in `[0, 100]`, defaults to 0
    #[schema(value_type = Option<String>)]
    pub discount_percent: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateDiscountRequest {
    /// Percentage in `[0, 100]`, defaults to 0
    #[schema(value_type = Option<String>)]
    pub discount_percent: Option<Decimal>,
    #[validate(length(max = 255))]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

/// `?voyage_id=` filter for order listing
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderListParams {
    pub voyage_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FreightOrderResponse {
    pub id: i32,
    pub voyage_id: i32,
    pub voyage_number: String,
    pub container_id: i32,
    pub container_code: String,
    pub agent_id: i32,
    pub agent_name: String,
    pub agent_email: String,
    pub ordered_by: Option<String>,
    pub notes: Option<String>,
    pub status: OrderStatus,
    #[schema(value_type = String, example = "1000.00")]
    pub base_price_usd: Decimal,
    #[schema(value_type = String, example = "10.00")]
    pub discount_percent: Decimal,
    #[schema(value_type = String, example = "900.00")]
    pub final_price: Decimal,
    pub discount_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl FreightOrderResponse {
    fn new(
        order: freight_order::Model,
        voyage_number: String,
        container_code: String,
        agent: Option<&agent::Model>,
    ) -> Self {
        Self {
            id: order.id,
            voyage_id: order.voyage_id,
            voyage_number,
            container_id: order.container_id,
            container_code,
            agent_id: order.agent_id,
            agent_name: agent.map(|a| a.name.clone()).unwrap_or_default(),
            agent_email: agent.map(|a| a.email.clone()).unwrap_or_default(),
            ordered_by: order.ordered_by,
            notes: order.notes,
            status: order.status,
            base_price_usd: money(order.base_price_usd),
            discount_percent: money(order.discount_percent),
            final_price: money(order.final_price),
            discount_reason: order.discount_reason,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// A container booked on a voyage
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VoyageContainerResponse {
    pub order_id: i32,
    pub container_id: i32,
    pub container_code: String,
    pub size: ContainerSize,
    pub container_type: ContainerType,
    pub ordered_by: Option<String>,
    pub status: OrderStatus,
}

impl From<VoyageBooking> for VoyageContainerResponse {
    fn from(booking: VoyageBooking) -> Self {
        Self {
            order_id: booking.order.id,
            container_id: booking.container.id,
            container_code: booking.container.container_code,
            size: booking.container.size,
            container_type: booking.container.container_type,
            ordered_by: booking.order.ordered_by,
            status: booking.order.status,
        }
    }
}

#[derive(Clone)]
pub struct FreightOrderService {
    db: Arc<DbPool>,
}

impl FreightOrderService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(
        skip(self, request),
        fields(
            voyage_id = request.voyage_id,
            container_id = request.container_id,
            agent_id = request.agent_id
        )
    )]
    pub async fn create_order(
        &self,
        request: CreateFreightOrderRequest,
    ) -> Result<FreightOrderResponse, ServiceError> {
        let order = self
            .db
            .transaction::<_, FreightOrderResponse, ServiceError>(|txn| {
                Box::pin(async move { create_order(&SeaOrmRepository::new(txn), request).await })
            })
            .await?;

        info!(
            order_id = order.id,
            final_price = %order.final_price,
            "Freight order created"
        );
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: i32) -> Result<FreightOrderResponse, ServiceError> {
        let repo = SeaOrmRepository::new(self.db.as_ref());
        let order = find_order(&repo, id).await?;
        render_order(&repo, order).await
    }

    #[instrument(skip(self))]
    pub async fn list_orders(
        &self,
        params: OrderListParams,
        page: PageRequest,
    ) -> Result<Page<FreightOrderResponse>, ServiceError> {
        let repo = SeaOrmRepository::new(self.db.as_ref());
        let orders = repo.list_orders(params.voyage_id, page).await?;

        let Page {
            items,
            page,
            size,
            total_elements,
            total_pages,
        } = orders;
        Ok(Page {
            items: render_orders(&repo, items).await?,
            page,
            size,
            total_elements,
            total_pages,
        })
    }

    #[instrument(skip(self))]
    pub async fn voyage_containers(
        &self,
        voyage_id: i32,
    ) -> Result<Vec<VoyageContainerResponse>, ServiceError> {
        let repo = SeaOrmRepository::new(self.db.as_ref());
        voyage_containers(&repo, voyage_id).await
    }

    #[instrument(skip(self, request))]
    pub async fn update_discount(
        &self,
        id: i32,
        request: UpdateDiscountRequest,
    ) -> Result<FreightOrderResponse, ServiceError> {
        let order = self
            .db
            .transaction::<_, FreightOrderResponse, ServiceError>(|txn| {
                Box::pin(async move {
                    let repo = SeaOrmRepository::new(txn);
                    let order = update_discount(&repo, id, request).await?;
                    render_order(&repo, order).await
                })
            })
            .await?;

        info!(
            order_id = id,
            discount_percent = %order.discount_percent,
            final_price = %order.final_price,
            "Freight order discount updated"
        );
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: i32,
        status: OrderStatus,
    ) -> Result<FreightOrderResponse, ServiceError> {
        let order = self
            .db
            .transaction::<_, FreightOrderResponse, ServiceError>(|txn| {
                Box::pin(async move {
                    let repo = SeaOrmRepository::new(txn);
                    let order = update_status(&repo, id, status).await?;
                    render_order(&repo, order).await
                })
            })
            .await?;

        info!(order_id = id, status = %status, "Freight order status updated");
        Ok(order)
    }
}

pub(crate) async fn find_order<R>(repo: &R, id: i32) -> Result<freight_order::Model, ServiceError>
where
    R: FreightRepository + ?Sized,
{
    repo.find_order(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Freight order not found: {}", id)))
}

pub(crate) async fn create_order<R>(
    repo: &R,
    request: CreateFreightOrderRequest,
) -> Result<FreightOrderResponse, ServiceError>
where
    R: FreightRepository + ?Sized,
{
    let voyage = find_voyage(repo, request.voyage_id).await?;
    if !voyage.status.accepts_bookings() {
        warn!(voyage_id = voyage.id, status = %voyage.status, "Booking rejected");
        return Err(ServiceError::Conflict(
            "Cannot book freight on a cancelled voyage".to_string(),
        ));
    }

    let container = repo
        .find_container(request.container_id)
        .await?
        .ok_or_else(|| {
            ServiceError::NotFound(format!("Container not found: {}", request.container_id))
        })?;

    let agent = find_agent(repo, request.agent_id).await?;
    if !agent.active {
        warn!(agent_id = agent.id, "Booking rejected for inactive agent");
        return Err(ServiceError::Conflict(
            "Cannot place order with inactive agent".to_string(),
        ));
    }

    let price = repo
        .find_price(voyage.id, container.size)
        .await?
        .ok_or_else(|| {
            ServiceError::BadRequest("No price defined for voyage and container size".to_string())
        })?;

    let discount_percent = resolve_discount(request.discount_percent)?;
    let base_price_usd = money(price.base_price_usd);
    let final_price = final_price(base_price_usd, discount_percent);

    let order = repo
        .insert_order(NewFreightOrder {
            voyage_id: voyage.id,
            container_id: container.id,
            agent_id: agent.id,
            ordered_by: request.ordered_by,
            notes: request.notes,
            status: OrderStatus::Pending,
            base_price_usd,
            discount_percent,
            final_price,
            discount_reason: None,
        })
        .await?;

    Ok(FreightOrderResponse::new(
        order,
        voyage.voyage_number,
        container.container_code,
        Some(&agent),
    ))
}

pub(crate) async fn update_discount<R>(
    repo: &R,
    id: i32,
    request: UpdateDiscountRequest,
) -> Result<freight_order::Model, ServiceError>
where
    R: FreightRepository + ?Sized,
{
    let mut order = find_order(repo, id).await?;
    if order.status.is_closed() {
        warn!(order_id = id, status = %order.status, "Discount change rejected");
        return Err(ServiceError::Conflict(
            "New discount cannot be applied on the cancelled or delivered freight order"
                .to_string(),
        ));
    }

    let discount_percent = resolve_discount(request.discount_percent)?;
    order.final_price = final_price(money(order.base_price_usd), discount_percent);
    order.discount_percent = discount_percent;
    order.discount_reason = request.reason;

    repo.save_order(order).await
}

pub(crate) async fn update_status<R>(
    repo: &R,
    id: i32,
    status: OrderStatus,
) -> Result<freight_order::Model, ServiceError>
where
    R: FreightRepository + ?Sized,
{
    let mut order = find_order(repo, id).await?;
    order.status = status;
    repo.save_order(order).await
}

pub(crate) async fn voyage_containers<R>(
    repo: &R,
    voyage_id: i32,
) -> Result<Vec<VoyageContainerResponse>, ServiceError>
where
    R: FreightRepository + ?Sized,
{
    find_voyage(repo, voyage_id).await?;
    let bookings = repo.list_voyage_bookings(voyage_id).await?;
    Ok(bookings.into_iter().map(Into::into).collect())
}

async fn render_order<R>(
    repo: &R,
    order: freight_order::Model,
) -> Result<FreightOrderResponse, ServiceError>
where
    R: FreightRepository + ?Sized,
{
    let mut rendered = render_orders(repo, vec![order]).await?;
    rendered
        .pop()
        .ok_or_else(|| ServiceError::InternalError("order rendering produced no row".into()))
}

async fn render_orders<R>(
    repo: &R,
    orders: Vec<freight_order::Model>,
) -> Result<Vec<FreightOrderResponse>, ServiceError>
where
    R: FreightRepository + ?Sized,
{
    let voyage_numbers: HashMap<i32, String> = repo
        .find_voyages(distinct_ids(orders.iter().map(|o| o.voyage_id)))
        .await?
        .into_iter()
        .map(|v| (v.id, v.voyage_number))
        .collect();
    let container_codes: HashMap<i32, String> = repo
        .find_containers(distinct_ids(orders.iter().map(|o| o.container_id)))
        .await?
        .into_iter()
        .map(|c| (c.id, c.container_code))
        .collect();
    let agents: HashMap<i32, agent::Model> = repo
        .find_agents(distinct_ids(orders.iter().map(|o| o.agent_id)))
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();

    Ok(orders
        .into_iter()
        .map(|order| {
            let voyage_number = voyage_numbers
                .get(&order.voyage_id)
                .cloned()
                .unwrap_or_default();
            let container_code = container_codes
                .get(&order.container_id)
                .cloned()
                .unwrap_or_default();
            let agent = agents.get(&order.agent_id);
            FreightOrderResponse::new(order, voyage_number, container_code, agent)
        })
        .collect())
}
