//! Lookup and persistence interface used by the services.
//!
//! Services are written against [`FreightRepository`] so the same workflow runs
//! over a pooled connection, inside a transaction, or against a mock in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::common::{Page, PageRequest};
use crate::entities::{
    agent, container, customer, freight_order, port, vessel, voyage, voyage_price, AgentType,
    ContainerSize, ContainerType, OrderStatus, VoyageStatus,
};
use crate::errors::ServiceError;

pub mod sea_orm_repository;

pub use sea_orm_repository::SeaOrmRepository;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPort {
    pub unlocode: String,
    pub name: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVessel {
    pub name: String,
    pub imo_number: String,
    pub capacity_teu: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAgent {
    pub name: String,
    pub email: String,
    pub commission_percent: Decimal,
    pub agent_type: AgentType,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContainer {
    pub container_code: String,
    pub size: ContainerSize,
    pub container_type: ContainerType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVoyage {
    pub voyage_number: String,
    pub vessel_id: i32,
    pub departure_port_id: i32,
    pub arrival_port_id: i32,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub status: VoyageStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVoyagePrice {
    pub voyage_id: i32,
    pub container_size: ContainerSize,
    pub base_price_usd: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFreightOrder {
    pub voyage_id: i32,
    pub container_id: i32,
    pub agent_id: i32,
    pub ordered_by: Option<String>,
    pub notes: Option<String>,
    pub status: OrderStatus,
    pub base_price_usd: Decimal,
    pub discount_percent: Decimal,
    pub final_price: Decimal,
    pub discount_reason: Option<String>,
}

/// Agent lookup strategy, chosen from the filters present on a list request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentFilter {
    All,
    ByType(AgentType),
    ByActive(bool),
    ByTypeAndActive(AgentType, bool),
}

impl AgentFilter {
    pub fn from_params(agent_type: Option<AgentType>, active: Option<bool>) -> Self {
        match (agent_type, active) {
            (None, None) => AgentFilter::All,
            (Some(agent_type), None) => AgentFilter::ByType(agent_type),
            (None, Some(active)) => AgentFilter::ByActive(active),
            (Some(agent_type), Some(active)) => AgentFilter::ByTypeAndActive(agent_type, active),
        }
    }
}

/// A booked container together with the order that booked it
#[derive(Debug, Clone, PartialEq)]
pub struct VoyageBooking {
    pub order: freight_order::Model,
    pub container: container::Model,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FreightRepository: Send + Sync {
    // Ports
    async fn find_port(&self, id: i32) -> Result<Option<port::Model>, ServiceError>;
    async fn port_exists_by_unlocode(&self, unlocode: &str) -> Result<bool, ServiceError>;
    async fn insert_port(&self, port: NewPort) -> Result<port::Model, ServiceError>;
    async fn list_ports(&self) -> Result<Vec<port::Model>, ServiceError>;
    async fn find_ports(&self, ids: Vec<i32>) -> Result<Vec<port::Model>, ServiceError>;

    // Vessels
    async fn find_vessel(&self, id: i32) -> Result<Option<vessel::Model>, ServiceError>;
    async fn vessel_exists_by_imo(&self, imo_number: &str) -> Result<bool, ServiceError>;
    async fn insert_vessel(&self, vessel: NewVessel) -> Result<vessel::Model, ServiceError>;
    async fn list_vessels(&self) -> Result<Vec<vessel::Model>, ServiceError>;
    async fn find_vessels(&self, ids: Vec<i32>) -> Result<Vec<vessel::Model>, ServiceError>;

    // Customers
    async fn find_customer(&self, id: i32) -> Result<Option<customer::Model>, ServiceError>;
    async fn insert_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<customer::Model, ServiceError>;
    async fn list_customers(&self) -> Result<Vec<customer::Model>, ServiceError>;

    // Agents
    async fn find_agent(&self, id: i32) -> Result<Option<agent::Model>, ServiceError>;
    async fn insert_agent(&self, agent: NewAgent) -> Result<agent::Model, ServiceError>;
    async fn save_agent(&self, agent: agent::Model) -> Result<agent::Model, ServiceError>;
    async fn list_agents(&self, filter: AgentFilter) -> Result<Vec<agent::Model>, ServiceError>;
    async fn find_agents(&self, ids: Vec<i32>) -> Result<Vec<agent::Model>, ServiceError>;

    // Containers
    async fn find_container(&self, id: i32) -> Result<Option<container::Model>, ServiceError>;
    async fn container_exists_by_code(&self, code: &str) -> Result<bool, ServiceError>;
    async fn insert_container(
        &self,
        container: NewContainer,
    ) -> Result<container::Model, ServiceError>;
    async fn list_containers(&self) -> Result<Vec<container::Model>, ServiceError>;
    async fn find_containers(&self, ids: Vec<i32>)
        -> Result<Vec<container::Model>, ServiceError>;

    // Voyages
    async fn find_voyage(&self, id: i32) -> Result<Option<voyage::Model>, ServiceError>;
    async fn voyage_exists_by_number(&self, voyage_number: &str) -> Result<bool, ServiceError>;
    async fn insert_voyage(&self, voyage: NewVoyage) -> Result<voyage::Model, ServiceError>;
    async fn save_voyage(&self, voyage: voyage::Model) -> Result<voyage::Model, ServiceError>;
    async fn list_voyages(
        &self,
        status: Option<VoyageStatus>,
    ) -> Result<Vec<voyage::Model>, ServiceError>;
    async fn find_voyages(&self, ids: Vec<i32>) -> Result<Vec<voyage::Model>, ServiceError>;
    async fn delete_voyage(&self, id: i32) -> Result<(), ServiceError>;

    // Voyage prices
    async fn find_price(
        &self,
        voyage_id: i32,
        container_size: ContainerSize,
    ) -> Result<Option<voyage_price::Model>, ServiceError>;
    async fn insert_price(
        &self,
        price: NewVoyagePrice,
    ) -> Result<voyage_price::Model, ServiceError>;
    async fn list_prices(
        &self,
        voyage_id: i32,
        page: PageRequest,
    ) -> Result<Page<voyage_price::Model>, ServiceError>;
    async fn delete_prices_for_voyage(&self, voyage_id: i32) -> Result<u64, ServiceError>;

    // Freight orders
    async fn find_order(&self, id: i32) -> Result<Option<freight_order::Model>, ServiceError>;
    async fn insert_order(
        &self,
        order: NewFreightOrder,
    ) -> Result<freight_order::Model, ServiceError>;
    async fn save_order(
        &self,
        order: freight_order::Model,
    ) -> Result<freight_order::Model, ServiceError>;
    async fn list_orders(
        &self,
        voyage_id: Option<i32>,
        page: PageRequest,
    ) -> Result<Page<freight_order::Model>, ServiceError>;
    async fn count_orders_for_voyage(&self, voyage_id: i32) -> Result<u64, ServiceError>;
    async fn list_voyage_bookings(
        &self,
        voyage_id: i32,
    ) -> Result<Vec<VoyageBooking>, ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, AgentFilter::All)]
    #[case(Some(AgentType::Internal), None, AgentFilter::ByType(AgentType::Internal))]
    #[case(None, Some(false), AgentFilter::ByActive(false))]
    #[case(
        Some(AgentType::External),
        Some(true),
        AgentFilter::ByTypeAndActive(AgentType::External, true)
    )]
    fn agent_filter_picks_one_strategy(
        #[case] agent_type: Option<AgentType>,
        #[case] active: Option<bool>,
        #[case] expected: AgentFilter,
    ) {
        assert_eq!(AgentFilter::from_params(agent_type, active), expected);
    }
}
