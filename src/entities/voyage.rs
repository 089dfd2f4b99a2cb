use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum VoyageStatus {
    #[sea_orm(string_value = "PLANNED")]
    Planned,
    #[sea_orm(string_value = "IN_TRANSIT")]
    InTransit,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

impl VoyageStatus {
    /// Whether freight can still be booked on a voyage in this status
    pub fn accepts_bookings(self) -> bool {
        match self {
            VoyageStatus::Planned | VoyageStatus::InTransit | VoyageStatus::Completed => true,
            VoyageStatus::Cancelled => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "voyages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub voyage_number: String,
    pub vessel_id: i32,
    pub departure_port_id: i32,
    pub arrival_port_id: i32,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub status: VoyageStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vessel::Entity",
        from = "Column::VesselId",
        to = "super::vessel::Column::Id"
    )]
    Vessel,
    #[sea_orm(
        belongs_to = "super::port::Entity",
        from = "Column::DeparturePortId",
        to = "super::port::Column::Id"
    )]
    DeparturePort,
    #[sea_orm(
        belongs_to = "super::port::Entity",
        from = "Column::ArrivalPortId",
        to = "super::port::Column::Id"
    )]
    ArrivalPort,
    #[sea_orm(has_many = "super::voyage_price::Entity")]
    Prices,
    #[sea_orm(has_many = "super::freight_order::Entity")]
    FreightOrders,
}

impl Related<super::vessel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vessel.def()
    }
}

impl Related<super::voyage_price::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Prices.def()
    }
}

impl Related<super::freight_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FreightOrders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
