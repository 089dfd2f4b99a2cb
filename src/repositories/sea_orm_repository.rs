use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, Unchanged,
};
use tracing::debug;

use super::{
    AgentFilter, FreightRepository, NewAgent, NewContainer, NewCustomer, NewFreightOrder, NewPort,
    NewVessel, NewVoyage, NewVoyagePrice, VoyageBooking,
};
use crate::common::{Page, PageRequest};
use crate::entities::{
    agent, container, customer, freight_order, port, vessel, voyage, voyage_price, ContainerSize,
    VoyageStatus,
};
use crate::errors::ServiceError;

/// [`FreightRepository`] over any SeaORM connection: the pool or an open transaction.
pub struct SeaOrmRepository<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> SeaOrmRepository<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<'c, C> FreightRepository for SeaOrmRepository<'c, C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn find_port(&self, id: i32) -> Result<Option<port::Model>, ServiceError> {
        Ok(port::Entity::find_by_id(id).one(self.conn).await?)
    }

    async fn port_exists_by_unlocode(&self, unlocode: &str) -> Result<bool, ServiceError> {
        let count = port::Entity::find()
            .filter(port::Column::Unlocode.eq(unlocode))
            .count(self.conn)
            .await?;
        Ok(count > 0)
    }

    async fn insert_port(&self, new: NewPort) -> Result<port::Model, ServiceError> {
        let model = port::ActiveModel {
            unlocode: Set(new.unlocode),
            name: Set(new.name),
            country: Set(new.country),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;
        debug!(port_id = model.id, "Inserted port");
        Ok(model)
    }

    async fn list_ports(&self) -> Result<Vec<port::Model>, ServiceError> {
        Ok(port::Entity::find()
            .order_by_asc(port::Column::Id)
            .all(self.conn)
            .await?)
    }

    async fn find_ports(&self, ids: Vec<i32>) -> Result<Vec<port::Model>, ServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(port::Entity::find()
            .filter(port::Column::Id.is_in(ids))
            .all(self.conn)
            .await?)
    }

    async fn find_vessel(&self, id: i32) -> Result<Option<vessel::Model>, ServiceError> {
        Ok(vessel::Entity::find_by_id(id).one(self.conn).await?)
    }

    async fn vessel_exists_by_imo(&self, imo_number: &str) -> Result<bool, ServiceError> {
        let count = vessel::Entity::find()
            .filter(vessel::Column::ImoNumber.eq(imo_number))
            .count(self.conn)
            .await?;
        Ok(count > 0)
    }

    async fn insert_vessel(&self, new: NewVessel) -> Result<vessel::Model, ServiceError> {
        let model = vessel::ActiveModel {
            name: Set(new.name),
            imo_number: Set(new.imo_number),
            capacity_teu: Set(new.capacity_teu),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;
        debug!(vessel_id = model.id, "Inserted vessel");
        Ok(model)
    }

    async fn list_vessels(&self) -> Result<Vec<vessel::Model>, ServiceError> {
        Ok(vessel::Entity::find()
            .order_by_asc(vessel::Column::Id)
            .all(self.conn)
            .await?)
    }

    async fn find_vessels(&self, ids: Vec<i32>) -> Result<Vec<vessel::Model>, ServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vessel::Entity::find()
            .filter(vessel::Column::Id.is_in(ids))
            .all(self.conn)
            .await?)
    }

    async fn find_customer(&self, id: i32) -> Result<Option<customer::Model>, ServiceError> {
        Ok(customer::Entity::find_by_id(id).one(self.conn).await?)
    }

    async fn insert_customer(&self, new: NewCustomer) -> Result<customer::Model, ServiceError> {
        let model = customer::ActiveModel {
            company_name: Set(new.company_name),
            contact_name: Set(new.contact_name),
            email: Set(new.email),
            phone: Set(new.phone),
            address: Set(new.address),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;
        debug!(customer_id = model.id, "Inserted customer");
        Ok(model)
    }

    async fn list_customers(&self) -> Result<Vec<customer::Model>, ServiceError> {
        Ok(customer::Entity::find()
            .order_by_asc(customer::Column::Id)
            .all(self.conn)
            .await?)
    }

    async fn find_agent(&self, id: i32) -> Result<Option<agent::Model>, ServiceError> {
        Ok(agent::Entity::find_by_id(id).one(self.conn).await?)
    }

    async fn insert_agent(&self, new: NewAgent) -> Result<agent::Model, ServiceError> {
        let model = agent::ActiveModel {
            name: Set(new.name),
            email: Set(new.email),
            commission_percent: Set(new.commission_percent),
            agent_type: Set(new.agent_type),
            active: Set(new.active),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;
        debug!(agent_id = model.id, "Inserted agent");
        Ok(model)
    }

    async fn save_agent(&self, model: agent::Model) -> Result<agent::Model, ServiceError> {
        let active = agent::ActiveModel {
            id: Unchanged(model.id),
            name: Set(model.name),
            email: Set(model.email),
            commission_percent: Set(model.commission_percent),
            agent_type: Set(model.agent_type),
            active: Set(model.active),
            created_at: Unchanged(model.created_at),
            updated_at: Set(Some(Utc::now())),
        };
        Ok(active.update(self.conn).await?)
    }

    async fn list_agents(&self, filter: AgentFilter) -> Result<Vec<agent::Model>, ServiceError> {
        let query = match filter {
            AgentFilter::All => agent::Entity::find(),
            AgentFilter::ByType(agent_type) => {
                agent::Entity::find().filter(agent::Column::AgentType.eq(agent_type))
            }
            AgentFilter::ByActive(active) => {
                agent::Entity::find().filter(agent::Column::Active.eq(active))
            }
            AgentFilter::ByTypeAndActive(agent_type, active) => agent::Entity::find()
                .filter(agent::Column::AgentType.eq(agent_type))
                .filter(agent::Column::Active.eq(active)),
        };
        Ok(query
            .order_by_asc(agent::Column::Id)
            .all(self.conn)
            .await?)
    }

    async fn find_agents(&self, ids: Vec<i32>) -> Result<Vec<agent::Model>, ServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(agent::Entity::find()
            .filter(agent::Column::Id.is_in(ids))
            .all(self.conn)
            .await?)
    }

    async fn find_container(&self, id: i32) -> Result<Option<container::Model>, ServiceError> {
        Ok(container::Entity::find_by_id(id).one(self.conn).await?)
    }

    async fn container_exists_by_code(&self, code: &str) -> Result<bool, ServiceError> {
        let count = container::Entity::find()
            .filter(container::Column::ContainerCode.eq(code))
            .count(self.conn)
            .await?;
        Ok(count > 0)
    }

    async fn insert_container(
        &self,
        new: NewContainer,
    ) -> Result<container::Model, ServiceError> {
        let model = container::ActiveModel {
            container_code: Set(new.container_code),
            size: Set(new.size),
            container_type: Set(new.container_type),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;
        debug!(container_id = model.id, "Inserted container");
        Ok(model)
    }

    async fn list_containers(&self) -> Result<Vec<container::Model>, ServiceError> {
        Ok(container::Entity::find()
            .order_by_asc(container::Column::Id)
            .all(self.conn)
            .await?)
    }

    async fn find_containers(
        &self,
        ids: Vec<i32>,
    ) -> Result<Vec<container::Model>, ServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(container::Entity::find()
            .filter(container::Column::Id.is_in(ids))
            .all(self.conn)
            .await?)
    }

    async fn find_voyage(&self, id: i32) -> Result<Option<voyage::Model>, ServiceError> {
        Ok(voyage::Entity::find_by_id(id).one(self.conn).await?)
    }

    async fn voyage_exists_by_number(&self, voyage_number: &str) -> Result<bool, ServiceError> {
        let count = voyage::Entity::find()
            .filter(voyage::Column::VoyageNumber.eq(voyage_number))
            .count(self.conn)
            .await?;
        Ok(count > 0)
    }

    async fn insert_voyage(&self, new: NewVoyage) -> Result<voyage::Model, ServiceError> {
        let model = voyage::ActiveModel {
            voyage_number: Set(new.voyage_number),
            vessel_id: Set(new.vessel_id),
            departure_port_id: Set(new.departure_port_id),
            arrival_port_id: Set(new.arrival_port_id),
            departure_time: Set(new.departure_time),
            arrival_time: Set(new.arrival_time),
            status: Set(new.status),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;
        debug!(voyage_id = model.id, "Inserted voyage");
        Ok(model)
    }

    async fn save_voyage(&self, model: voyage::Model) -> Result<voyage::Model, ServiceError> {
        let active = voyage::ActiveModel {
            id: Unchanged(model.id),
            voyage_number: Set(model.voyage_number),
            vessel_id: Set(model.vessel_id),
            departure_port_id: Set(model.departure_port_id),
            arrival_port_id: Set(model.arrival_port_id),
            departure_time: Set(model.departure_time),
            arrival_time: Set(model.arrival_time),
            status: Set(model.status),
            created_at: Unchanged(model.created_at),
            updated_at: Set(Some(Utc::now())),
        };
        Ok(active.update(self.conn).await?)
    }

    async fn list_voyages(
        &self,
        status: Option<VoyageStatus>,
    ) -> Result<Vec<voyage::Model>, ServiceError> {
        let mut query = voyage::Entity::find();
        if let Some(status) = status {
            query = query.filter(voyage::Column::Status.eq(status));
        }
        Ok(query
            .order_by_asc(voyage::Column::DepartureTime)
            .order_by_asc(voyage::Column::Id)
            .all(self.conn)
            .await?)
    }

    async fn find_voyages(&self, ids: Vec<i32>) -> Result<Vec<voyage::Model>, ServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(voyage::Entity::find()
            .filter(voyage::Column::Id.is_in(ids))
            .all(self.conn)
            .await?)
    }

    async fn delete_voyage(&self, id: i32) -> Result<(), ServiceError> {
        let result = voyage::Entity::delete_by_id(id).exec(self.conn).await?;
        debug!(voyage_id = id, rows = result.rows_affected, "Deleted voyage");
        Ok(())
    }

    async fn find_price(
        &self,
        voyage_id: i32,
        container_size: ContainerSize,
    ) -> Result<Option<voyage_price::Model>, ServiceError> {
        Ok(voyage_price::Entity::find()
            .filter(voyage_price::Column::VoyageId.eq(voyage_id))
            .filter(voyage_price::Column::ContainerSize.eq(container_size))
            .one(self.conn)
            .await?)
    }

    async fn insert_price(
        &self,
        new: NewVoyagePrice,
    ) -> Result<voyage_price::Model, ServiceError> {
        let model = voyage_price::ActiveModel {
            voyage_id: Set(new.voyage_id),
            container_size: Set(new.container_size),
            base_price_usd: Set(new.base_price_usd),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;
        debug!(price_id = model.id, voyage_id = model.voyage_id, "Inserted voyage price");
        Ok(model)
    }

    async fn list_prices(
        &self,
        voyage_id: i32,
        page: PageRequest,
    ) -> Result<Page<voyage_price::Model>, ServiceError> {
        let paginator = voyage_price::Entity::find()
            .filter(voyage_price::Column::VoyageId.eq(voyage_id))
            .order_by_asc(voyage_price::Column::Id)
            .paginate(self.conn, page.size);

        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.page).await?;
        Ok(Page::new(items, page, total))
    }

    async fn delete_prices_for_voyage(&self, voyage_id: i32) -> Result<u64, ServiceError> {
        let result = voyage_price::Entity::delete_many()
            .filter(voyage_price::Column::VoyageId.eq(voyage_id))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected)
    }

    async fn find_order(&self, id: i32) -> Result<Option<freight_order::Model>, ServiceError> {
        Ok(freight_order::Entity::find_by_id(id).one(self.conn).await?)
    }

    async fn insert_order(
        &self,
        new: NewFreightOrder,
    ) -> Result<freight_order::Model, ServiceError> {
        let model = freight_order::ActiveModel {
            voyage_id: Set(new.voyage_id),
            container_id: Set(new.container_id),
            agent_id: Set(new.agent_id),
            ordered_by: Set(new.ordered_by),
            notes: Set(new.notes),
            status: Set(new.status),
            base_price_usd: Set(new.base_price_usd),
            discount_percent: Set(new.discount_percent),
            final_price: Set(new.final_price),
            discount_reason: Set(new.discount_reason),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;
        debug!(order_id = model.id, voyage_id = model.voyage_id, "Inserted freight order");
        Ok(model)
    }

    async fn save_order(
        &self,
        model: freight_order::Model,
    ) -> Result<freight_order::Model, ServiceError> {
        let active = freight_order::ActiveModel {
            id: Unchanged(model.id),
            voyage_id: Set(model.voyage_id),
            container_id: Set(model.container_id),
            agent_id: Set(model.agent_id),
            ordered_by: Set(model.ordered_by),
            notes: Set(model.notes),
            status: Set(model.status),
            base_price_usd: Set(model.base_price_usd),
            discount_percent: Set(model.discount_percent),
            final_price: Set(model.final_price),
            discount_reason: Set(model.discount_reason),
            created_at: Unchanged(model.created_at),
            updated_at: Set(Some(Utc::now())),
        };
        Ok(active.update(self.conn).await?)
    }

    async fn list_orders(
        &self,
        voyage_id: Option<i32>,
        page: PageRequest,
    ) -> Result<Page<freight_order::Model>, ServiceError> {
        let mut query = freight_order::Entity::find();
        if let Some(voyage_id) = voyage_id {
            query = query.filter(freight_order::Column::VoyageId.eq(voyage_id));
        }
        let paginator = query
            .order_by_asc(freight_order::Column::Id)
            .paginate(self.conn, page.size);

        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.page).await?;
        Ok(Page::new(items, page, total))
    }

    async fn count_orders_for_voyage(&self, voyage_id: i32) -> Result<u64, ServiceError> {
        Ok(freight_order::Entity::find()
            .filter(freight_order::Column::VoyageId.eq(voyage_id))
            .count(self.conn)
            .await?)
    }

    async fn list_voyage_bookings(
        &self,
        voyage_id: i32,
    ) -> Result<Vec<VoyageBooking>, ServiceError> {
        let rows = freight_order::Entity::find()
            .filter(freight_order::Column::VoyageId.eq(voyage_id))
            .order_by_asc(freight_order::Column::Id)
            .find_also_related(container::Entity)
            .all(self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(order, container)| {
                container.map(|container| VoyageBooking { order, container })
            })
            .collect())
    }
}
