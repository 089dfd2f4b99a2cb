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
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ContainerSize {
    #[sea_orm(string_value = "TWENTY_FOOT")]
    TwentyFoot,
    #[sea_orm(string_value = "FORTY_FOOT")]
    FortyFoot,
}

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
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ContainerType {
    #[sea_orm(string_value = "DRY")]
    Dry,
    #[sea_orm(string_value = "REEFER")]
    Reefer,
    #[sea_orm(string_value = "OPEN_TOP")]
    OpenTop,
    #[sea_orm(string_value = "FLAT_RACK")]
    FlatRack,
    #[sea_orm(string_value = "TANK")]
    Tank,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "containers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub container_code: String,
    pub size: ContainerSize,
    pub container_type: ContainerType,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::freight_order::Entity")]
    FreightOrders,
}

impl Related<super::freight_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FreightOrders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
