use sea_orm::DatabaseBackend;
use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_ports_table::Migration),
            Box::new(m20250101_000002_create_vessels_table::Migration),
            Box::new(m20250101_000003_create_customers_table::Migration),
            Box::new(m20250101_000004_create_agents_table::Migration),
            Box::new(m20250101_000005_create_containers_table::Migration),
            Box::new(m20250101_000006_create_voyages_table::Migration),
            Box::new(m20250101_000007_create_voyage_prices_table::Migration),
            Box::new(m20250101_000008_create_freight_orders_table::Migration),
        ]
    }
}

fn id_column<T: IntoIden>(name: T) -> ColumnDef {
    let mut def = ColumnDef::new(name);
    def.integer().not_null().auto_increment().primary_key();
    def
}

fn timestamp_column<T: IntoIden>(name: T, nullable: bool) -> ColumnDef {
    let mut def = ColumnDef::new(name);
    def.timestamp_with_time_zone();
    if nullable {
        def.null();
    } else {
        def.not_null();
    }
    def
}

/// Fixed-point money/percentage column. SQLite has no fixed-point storage, so
/// REAL affinity is used there and values are rescaled on the way out.
fn decimal_column<T: IntoIden>(backend: DatabaseBackend, name: T, precision: u32) -> ColumnDef {
    let mut def = ColumnDef::new(name);
    match backend {
        DatabaseBackend::Sqlite => def.double(),
        DatabaseBackend::Postgres | DatabaseBackend::MySql => def.decimal_len(precision, 2),
    };
    def.not_null();
    def
}

mod m20250101_000001_create_ports_table {
    use super::{id_column, timestamp_column};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000001_create_ports_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Ports::Table)
                        .if_not_exists()
                        .col(id_column(Ports::Id))
                        .col(
                            ColumnDef::new(Ports::Unlocode)
                                .string_len(5)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Ports::Name).string().not_null())
                        .col(ColumnDef::new(Ports::Country).string().not_null())
                        .col(timestamp_column(Ports::CreatedAt, false))
                        .col(timestamp_column(Ports::UpdatedAt, true))
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Ports::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum Ports {
        Table,
        Id,
        Unlocode,
        Name,
        Country,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250101_000002_create_vessels_table {
    use super::{id_column, timestamp_column};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000002_create_vessels_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Vessels::Table)
                        .if_not_exists()
                        .col(id_column(Vessels::Id))
                        .col(ColumnDef::new(Vessels::Name).string().not_null())
                        .col(
                            ColumnDef::new(Vessels::ImoNumber)
                                .string_len(16)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Vessels::CapacityTeu).integer().not_null())
                        .col(timestamp_column(Vessels::CreatedAt, false))
                        .col(timestamp_column(Vessels::UpdatedAt, true))
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Vessels::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum Vessels {
        Table,
        Id,
        Name,
        ImoNumber,
        CapacityTeu,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250101_000003_create_customers_table {
    use super::{id_column, timestamp_column};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000003_create_customers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(id_column(Customers::Id))
                        .col(ColumnDef::new(Customers::CompanyName).string().not_null())
                        .col(ColumnDef::new(Customers::ContactName).string().not_null())
                        .col(ColumnDef::new(Customers::Email).string().not_null())
                        .col(ColumnDef::new(Customers::Phone).string_len(20).null())
                        .col(ColumnDef::new(Customers::Address).string().null())
                        .col(timestamp_column(Customers::CreatedAt, false))
                        .col(timestamp_column(Customers::UpdatedAt, true))
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Customers::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum Customers {
        Table,
        Id,
        CompanyName,
        ContactName,
        Email,
        Phone,
        Address,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250101_000004_create_agents_table {
    use super::{decimal_column, id_column, timestamp_column};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000004_create_agents_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            let backend = manager.get_database_backend();
            manager
                .create_table(
                    Table::create()
                        .table(Agents::Table)
                        .if_not_exists()
                        .col(id_column(Agents::Id))
                        .col(ColumnDef::new(Agents::Name).string().not_null())
                        .col(ColumnDef::new(Agents::Email).string().not_null())
                        .col(decimal_column(backend, Agents::CommissionPercent, 5))
                        .col(ColumnDef::new(Agents::AgentType).string_len(16).not_null())
                        .col(
                            ColumnDef::new(Agents::Active)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(timestamp_column(Agents::CreatedAt, false))
                        .col(timestamp_column(Agents::UpdatedAt, true))
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_agents_type_active")
                        .table(Agents::Table)
                        .col(Agents::AgentType)
                        .col(Agents::Active)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Agents::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum Agents {
        Table,
        Id,
        Name,
        Email,
        CommissionPercent,
        AgentType,
        Active,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250101_000005_create_containers_table {
    use super::{id_column, timestamp_column};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000005_create_containers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Containers::Table)
                        .if_not_exists()
                        .col(id_column(Containers::Id))
                        .col(
                            ColumnDef::new(Containers::ContainerCode)
                                .string_len(11)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Containers::Size).string_len(16).not_null())
                        .col(
                            ColumnDef::new(Containers::ContainerType)
                                .string_len(16)
                                .not_null(),
                        )
                        .col(timestamp_column(Containers::CreatedAt, false))
                        .col(timestamp_column(Containers::UpdatedAt, true))
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Containers::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum Containers {
        Table,
        Id,
        ContainerCode,
        Size,
        ContainerType,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250101_000006_create_voyages_table {
    use super::m20250101_000001_create_ports_table::Ports;
    use super::m20250101_000002_create_vessels_table::Vessels;
    use super::{id_column, timestamp_column};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000006_create_voyages_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Voyages::Table)
                        .if_not_exists()
                        .col(id_column(Voyages::Id))
                        .col(
                            ColumnDef::new(Voyages::VoyageNumber)
                                .string_len(32)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Voyages::VesselId).integer().not_null())
                        .col(ColumnDef::new(Voyages::DeparturePortId).integer().not_null())
                        .col(ColumnDef::new(Voyages::ArrivalPortId).integer().not_null())
                        .col(timestamp_column(Voyages::DepartureTime, false))
                        .col(timestamp_column(Voyages::ArrivalTime, false))
                        .col(ColumnDef::new(Voyages::Status).string_len(32).not_null())
                        .col(timestamp_column(Voyages::CreatedAt, false))
                        .col(timestamp_column(Voyages::UpdatedAt, true))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_voyages_vessel")
                                .from(Voyages::Table, Voyages::VesselId)
                                .to(Vessels::Table, Vessels::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_voyages_departure_port")
                                .from(Voyages::Table, Voyages::DeparturePortId)
                                .to(Ports::Table, Ports::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_voyages_arrival_port")
                                .from(Voyages::Table, Voyages::ArrivalPortId)
                                .to(Ports::Table, Ports::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_voyages_status")
                        .table(Voyages::Table)
                        .col(Voyages::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Voyages::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum Voyages {
        Table,
        Id,
        VoyageNumber,
        VesselId,
        DeparturePortId,
        ArrivalPortId,
        DepartureTime,
        ArrivalTime,
        Status,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250101_000007_create_voyage_prices_table {
    use super::m20250101_000006_create_voyages_table::Voyages;
    use super::{decimal_column, id_column, timestamp_column};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000007_create_voyage_prices_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            let backend = manager.get_database_backend();
            manager
                .create_table(
                    Table::create()
                        .table(VoyagePrices::Table)
                        .if_not_exists()
                        .col(id_column(VoyagePrices::Id))
                        .col(ColumnDef::new(VoyagePrices::VoyageId).integer().not_null())
                        .col(
                            ColumnDef::new(VoyagePrices::ContainerSize)
                                .string_len(16)
                                .not_null(),
                        )
                        .col(decimal_column(backend, VoyagePrices::BasePriceUsd, 12))
                        .col(timestamp_column(VoyagePrices::CreatedAt, false))
                        .col(timestamp_column(VoyagePrices::UpdatedAt, true))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_voyage_prices_voyage")
                                .from(VoyagePrices::Table, VoyagePrices::VoyageId)
                                .to(Voyages::Table, Voyages::Id),
                        )
                        .to_owned(),
                )
                .await?;

            // One price per container size on a voyage; concurrent duplicates fail here.
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("uq_voyage_prices_voyage_size")
                        .table(VoyagePrices::Table)
                        .col(VoyagePrices::VoyageId)
                        .col(VoyagePrices::ContainerSize)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(VoyagePrices::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum VoyagePrices {
        Table,
        Id,
        VoyageId,
        ContainerSize,
        BasePriceUsd,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250101_000008_create_freight_orders_table {
    use super::m20250101_000004_create_agents_table::Agents;
    use super::m20250101_000005_create_containers_table::Containers;
    use super::m20250101_000006_create_voyages_table::Voyages;
    use super::{decimal_column, id_column, timestamp_column};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000008_create_freight_orders_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            let backend = manager.get_database_backend();
            manager
                .create_table(
                    Table::create()
                        .table(FreightOrders::Table)
                        .if_not_exists()
                        .col(id_column(FreightOrders::Id))
                        .col(ColumnDef::new(FreightOrders::VoyageId).integer().not_null())
                        .col(
                            ColumnDef::new(FreightOrders::ContainerId)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(FreightOrders::AgentId).integer().not_null())
                        .col(ColumnDef::new(FreightOrders::OrderedBy).string().null())
                        .col(ColumnDef::new(FreightOrders::Notes).string_len(500).null())
                        .col(
                            ColumnDef::new(FreightOrders::Status)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(decimal_column(backend, FreightOrders::BasePriceUsd, 12))
                        .col(decimal_column(backend, FreightOrders::DiscountPercent, 5))
                        .col(decimal_column(backend, FreightOrders::FinalPrice, 12))
                        .col(
                            ColumnDef::new(FreightOrders::DiscountReason)
                                .string()
                                .null(),
                        )
                        .col(timestamp_column(FreightOrders::CreatedAt, false))
                        .col(timestamp_column(FreightOrders::UpdatedAt, true))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_freight_orders_voyage")
                                .from(FreightOrders::Table, FreightOrders::VoyageId)
                                .to(Voyages::Table, Voyages::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_freight_orders_container")
                                .from(FreightOrders::Table, FreightOrders::ContainerId)
                                .to(Containers::Table, Containers::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_freight_orders_agent")
                                .from(FreightOrders::Table, FreightOrders::AgentId)
                                .to(Agents::Table, Agents::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_freight_orders_voyage_id")
                        .table(FreightOrders::Table)
                        .col(FreightOrders::VoyageId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(FreightOrders::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum FreightOrders {
        Table,
        Id,
        VoyageId,
        ContainerId,
        AgentId,
        OrderedBy,
        Notes,
        Status,
        BasePriceUsd,
        DiscountPercent,
        FinalPrice,
        DiscountReason,
        CreatedAt,
        UpdatedAt,
    }
}
