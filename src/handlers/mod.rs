pub mod agents;
pub mod common;
pub mod containers;
pub mod customers;
pub mod freight_orders;
pub mod ports;
pub mod vessels;
pub mod voyages;

use std::sync::Arc;

use crate::db::DbPool;
use crate::services::{
    agents::AgentService, containers::ContainerService, customers::CustomerService,
    freight_orders::FreightOrderService, ports::PortService, vessels::VesselService,
    voyages::VoyageService,
};

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub ports: Arc<PortService>,
    pub vessels: Arc<VesselService>,
    pub customers: Arc<CustomerService>,
    pub agents: Arc<AgentService>,
    pub containers: Arc<ContainerService>,
    pub voyages: Arc<VoyageService>,
    pub freight_orders: Arc<FreightOrderService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            ports: Arc::new(PortService::new(db_pool.clone())),
            vessels: Arc::new(VesselService::new(db_pool.clone())),
            customers: Arc::new(CustomerService::new(db_pool.clone())),
            agents: Arc::new(AgentService::new(db_pool.clone())),
            containers: Arc::new(ContainerService::new(db_pool.clone())),
            voyages: Arc::new(VoyageService::new(db_pool.clone())),
            freight_orders: Arc::new(FreightOrderService::new(db_pool)),
        }
    }
}
