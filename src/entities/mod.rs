//! SeaORM entities for the freight domain.

pub mod agent;
pub mod container;
pub mod customer;
pub mod freight_order;
pub mod port;
pub mod vessel;
pub mod voyage;
pub mod voyage_price;

pub use agent::AgentType;
pub use container::{ContainerSize, ContainerType};
pub use freight_order::OrderStatus;
pub use voyage::VoyageStatus;
