#![allow(elided_lifetimes_in_paths)]

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_facilities_table::Migration),
            Box::new(m20240101_000002_create_production_orders_table::Migration),
            Box::new(m20240101_000003_create_quality_tables::Migration),
            Box::new(m20240101_000004_create_equipment_table::Migration),
            Box::new(m20240101_000005_create_production_metrics_table::Migration),
        ]
    }
}

mod m20240101_000001_create_facilities_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_facilities_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Facilities::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Facilities::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Facilities::Name).string_len(100).not_null())
                        .col(ColumnDef::new(Facilities::Code).string_len(10).not_null())
                        .col(ColumnDef::new(Facilities::Address).string_len(200).null())
                        .col(ColumnDef::new(Facilities::City).string_len(100).null())
                        .col(ColumnDef::new(Facilities::State).string_len(50).null())
                        .col(ColumnDef::new(Facilities::Country).string_len(50).null())
                        .col(ColumnDef::new(Facilities::FacilityType).integer().not_null())
                        .col(
                            ColumnDef::new(Facilities::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Facilities::CreatedDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_facilities_code")
                        .table(Facilities::Table)
                        .col(Facilities::Code)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Facilities::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Facilities {
        Table,
        Id,
        Name,
        Code,
        Address,
        City,
        State,
        Country,
        FacilityType,
        IsActive,
        CreatedDate,
    }
}

mod m20240101_000002_create_production_orders_table {
    use super::m20240101_000001_create_facilities_table::Facilities;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_production_orders_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ProductionOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductionOrders::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ProductionOrders::OrderNumber)
                                .string_len(50)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionOrders::PartNumber)
                                .string_len(100)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionOrders::PartDescription)
                                .string_len(200)
                                .null(),
                        )
                        .col(ColumnDef::new(ProductionOrders::Quantity).integer().not_null())
                        .col(
                            ColumnDef::new(ProductionOrders::QuantityCompleted)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ProductionOrders::Status)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .col(
                            ColumnDef::new(ProductionOrders::Priority)
                                .integer()
                                .not_null()
                                .default(2),
                        )
                        .col(
                            ColumnDef::new(ProductionOrders::ScheduledStartDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionOrders::ScheduledEndDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionOrders::ActualStartDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionOrders::ActualEndDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(ColumnDef::new(ProductionOrders::FacilityId).integer().not_null())
                        .col(
                            ColumnDef::new(ProductionOrders::CustomerName)
                                .string_len(100)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionOrders::CustomerOrderNumber)
                                .string_len(50)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionOrders::MaterialType)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionOrders::EstimatedCost)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ProductionOrders::ActualCost)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ProductionOrders::CreatedDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ProductionOrders::Notes).string_len(1000).null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_production_orders_facility_id")
                                .from(ProductionOrders::Table, ProductionOrders::FacilityId)
                                .to(Facilities::Table, Facilities::Id)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_production_orders_order_number")
                        .table(ProductionOrders::Table)
                        .col(ProductionOrders::OrderNumber)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_production_orders_facility_id")
                        .table(ProductionOrders::Table)
                        .col(ProductionOrders::FacilityId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_production_orders_status")
                        .table(ProductionOrders::Table)
                        .col(ProductionOrders::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_production_orders_scheduled_end_date")
                        .table(ProductionOrders::Table)
                        .col(ProductionOrders::ScheduledEndDate)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProductionOrders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum ProductionOrders {
        Table,
        Id,
        OrderNumber,
        PartNumber,
        PartDescription,
        Quantity,
        QuantityCompleted,
        Status,
        Priority,
        ScheduledStartDate,
        ScheduledEndDate,
        ActualStartDate,
        ActualEndDate,
        FacilityId,
        CustomerName,
        CustomerOrderNumber,
        MaterialType,
        EstimatedCost,
        ActualCost,
        CreatedDate,
        Notes,
    }
}

mod m20240101_000003_create_quality_tables {
    use super::m20240101_000001_create_facilities_table::Facilities;
    use super::m20240101_000002_create_production_orders_table::ProductionOrders;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_quality_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(QualityInspections::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(QualityInspections::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(QualityInspections::InspectionNumber)
                                .string_len(50)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QualityInspections::ProductionOrderId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QualityInspections::FacilityId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QualityInspections::InspectionType)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QualityInspections::Status)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .col(
                            ColumnDef::new(QualityInspections::ScheduledDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QualityInspections::ActualDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(QualityInspections::InspectorName)
                                .string_len(100)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QualityInspections::InspectorBadge)
                                .string_len(50)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(QualityInspections::Passed)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(QualityInspections::Results).string_len(2000).null())
                        .col(
                            ColumnDef::new(QualityInspections::NonConformanceNotes)
                                .string_len(1000)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(QualityInspections::CorrectiveActions)
                                .string_len(1000)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(QualityInspections::DimensionTolerance)
                                .decimal()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(QualityInspections::MeasuredDimension)
                                .decimal()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(QualityInspections::MeasurementUnit)
                                .string_len(20)
                                .null(),
                        )
                        .col(ColumnDef::new(QualityInspections::DefectCount).integer().null())
                        .col(
                            ColumnDef::new(QualityInspections::CertificationRequired)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(QualityInspections::CertificationCompleted)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(QualityInspections::CreatedDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QualityInspections::CompletedDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_quality_inspections_production_order_id")
                                .from(
                                    QualityInspections::Table,
                                    QualityInspections::ProductionOrderId,
                                )
                                .to(ProductionOrders::Table, ProductionOrders::Id)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_quality_inspections_facility_id")
                                .from(QualityInspections::Table, QualityInspections::FacilityId)
                                .to(Facilities::Table, Facilities::Id)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_quality_inspections_inspection_number")
                        .table(QualityInspections::Table)
                        .col(QualityInspections::InspectionNumber)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(QualityDocuments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(QualityDocuments::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(QualityDocuments::QualityInspectionId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QualityDocuments::DocumentName)
                                .string_len(200)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QualityDocuments::DocumentType)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(QualityDocuments::FilePath).string_len(500).null())
                        .col(
                            ColumnDef::new(QualityDocuments::FileExtension)
                                .string_len(10)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(QualityDocuments::FileSize)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(QualityDocuments::Description)
                                .string_len(500)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(QualityDocuments::CreatedBy)
                                .string_len(100)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QualityDocuments::CreatedDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QualityDocuments::ApprovedBy)
                                .string_len(100)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(QualityDocuments::ApprovedDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(QualityDocuments::IsApproved)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(QualityDocuments::Version)
                                .string_len(20)
                                .not_null()
                                .default("1.0"),
                        )
                        .col(
                            ColumnDef::new(QualityDocuments::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_quality_documents_quality_inspection_id")
                                .from(
                                    QualityDocuments::Table,
                                    QualityDocuments::QualityInspectionId,
                                )
                                .to(QualityInspections::Table, QualityInspections::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(QualityDocuments::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(QualityInspections::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum QualityInspections {
        Table,
        Id,
        InspectionNumber,
        ProductionOrderId,
        FacilityId,
        InspectionType,
        Status,
        ScheduledDate,
        ActualDate,
        InspectorName,
        InspectorBadge,
        Passed,
        Results,
        NonConformanceNotes,
        CorrectiveActions,
        DimensionTolerance,
        MeasuredDimension,
        MeasurementUnit,
        DefectCount,
        CertificationRequired,
        CertificationCompleted,
        CreatedDate,
        CompletedDate,
    }

    #[derive(DeriveIden)]
    enum QualityDocuments {
        Table,
        Id,
        QualityInspectionId,
        DocumentName,
        DocumentType,
        FilePath,
        FileExtension,
        FileSize,
        Description,
        CreatedBy,
        CreatedDate,
        ApprovedBy,
        ApprovedDate,
        IsApproved,
        Version,
        IsActive,
    }
}

mod m20240101_000004_create_equipment_table {
    use super::m20240101_000001_create_facilities_table::Facilities;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_equipment_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Equipment::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Equipment::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Equipment::EquipmentNumber)
                                .string_len(50)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Equipment::Name).string_len(100).not_null())
                        .col(ColumnDef::new(Equipment::Description).string_len(500).null())
                        .col(ColumnDef::new(Equipment::EquipmentType).integer().not_null())
                        .col(ColumnDef::new(Equipment::Manufacturer).string_len(100).null())
                        .col(ColumnDef::new(Equipment::ModelName).string_len(100).null())
                        .col(ColumnDef::new(Equipment::SerialNumber).string_len(100).null())
                        .col(
                            ColumnDef::new(Equipment::InstallationDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Equipment::LastMaintenanceDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Equipment::NextMaintenanceDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Equipment::Status)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .col(ColumnDef::new(Equipment::FacilityId).integer().not_null())
                        .col(
                            ColumnDef::new(Equipment::PurchaseCost)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Equipment::OperatingHours)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Equipment::MaintenanceHours)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Equipment::EfficiencyRating)
                                .decimal()
                                .not_null()
                                .default(100),
                        )
                        .col(
                            ColumnDef::new(Equipment::MaintenanceNotes)
                                .string_len(1000)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Equipment::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Equipment::CreatedDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_equipment_facility_id")
                                .from(Equipment::Table, Equipment::FacilityId)
                                .to(Facilities::Table, Facilities::Id)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_equipment_equipment_number")
                        .table(Equipment::Table)
                        .col(Equipment::EquipmentNumber)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Equipment::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Equipment {
        Table,
        Id,
        EquipmentNumber,
        Name,
        Description,
        EquipmentType,
        Manufacturer,
        ModelName,
        SerialNumber,
        InstallationDate,
        LastMaintenanceDate,
        NextMaintenanceDate,
        Status,
        FacilityId,
        PurchaseCost,
        OperatingHours,
        MaintenanceHours,
        EfficiencyRating,
        MaintenanceNotes,
        IsActive,
        CreatedDate,
    }
}

mod m20240101_000005_create_production_metrics_table {
    use super::m20240101_000002_create_production_orders_table::ProductionOrders;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_production_metrics_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ProductionMetrics::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductionMetrics::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ProductionMetrics::ProductionOrderId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionMetrics::MetricType)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionMetrics::MetricName)
                                .string_len(100)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionMetrics::Value)
                                .decimal()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ProductionMetrics::Unit).string_len(20).null())
                        .col(
                            ColumnDef::new(ProductionMetrics::TargetValue)
                                .decimal()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionMetrics::MinValue)
                                .decimal()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionMetrics::MaxValue)
                                .decimal()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionMetrics::IsWithinTolerance)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(ProductionMetrics::MeasuredDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionMetrics::MeasuredBy)
                                .string_len(100)
                                .null(),
                        )
                        .col(ColumnDef::new(ProductionMetrics::Notes).string_len(500).null())
                        .col(
                            ColumnDef::new(ProductionMetrics::CreatedDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_production_metrics_production_order_id")
                                .from(
                                    ProductionMetrics::Table,
                                    ProductionMetrics::ProductionOrderId,
                                )
                                .to(ProductionOrders::Table, ProductionOrders::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_production_metrics_production_order_id")
                        .table(ProductionMetrics::Table)
                        .col(ProductionMetrics::ProductionOrderId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProductionMetrics::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum ProductionMetrics {
        Table,
        Id,
        ProductionOrderId,
        MetricType,
        MetricName,
        Value,
        Unit,
        TargetValue,
        MinValue,
        MaxValue,
        IsWithinTolerance,
        MeasuredDate,
        MeasuredBy,
        Notes,
        CreatedDate,
    }
}
