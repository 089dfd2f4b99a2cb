use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::container::ContainerSize;

/// Base price for one container of a given size on a voyage.
/// At most one row exists per (voyage_id, container_size).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "voyage_prices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub voyage_id: i32,
    pub container_size: ContainerSize,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub base_price_usd: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::voyage::Entity",
        from = "Column::VoyageId",
        to = "super::voyage::Column::Id"
    )]
    Voyage,
}

impl Related<super::voyage::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Voyage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
