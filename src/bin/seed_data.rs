//! Seed data script - populates the database with a demonstration plant
//!
//! Run with: cargo run --bin seed-data
//!
//! This creates:
//! - 2 facilities (investment casting, machining)
//! - 6 production orders across every common status
//! - equipment with maintenance dates, one already overdue
//! - a quality inspection with a document and a few production metrics

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use precision_oms::{
    config,
    db::{self, DbConfig},
    entities::{
        equipment, facility, production_metric, production_order, quality_document,
        quality_inspection, DocumentType, EquipmentStatus, EquipmentType, FacilityType,
        InspectionStatus, InspectionType, MaterialType, MetricType, Priority, ProductionStatus,
    },
    migrator::Migrator,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::init_tracing("info", false);

    info!("=== Precision OMS Seed Data ===");

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://precision_oms.db?mode=rwc".to_string());
    info!("Connecting to database: {}", database_url);
    let db = db::establish_connection_with_config(&DbConfig {
        url: database_url,
        max_connections: 5,
        ..DbConfig::default()
    })
    .await?;
    Migrator::up(&db, None).await?;

    info!("Creating facilities...");
    let casting = create_facility(&db, "Precision Casting Plant 1", "TST", FacilityType::InvestmentCasting).await?;
    let machining = create_facility(&db, "Precision Machining Center", "PMC", FacilityType::Machining).await?;

    info!("Creating production orders...");
    let orders = create_orders(&db, &casting, &machining).await?;
    info!("  Created {} production orders", orders.len());

    info!("Creating equipment...");
    let equipment_count = create_equipment(&db, &casting, &machining).await?;
    info!("  Created {} equipment records", equipment_count);

    info!("Creating quality records...");
    if let Some(first) = orders.first() {
        create_quality_records(&db, first, &casting).await?;
    }

    info!("=== Seed Data Complete ===");
    info!("Try these API calls:");
    info!("  curl http://localhost:8080/api/productionorders");
    info!("  curl http://localhost:8080/api/productionorders/delayed");
    info!("  curl http://localhost:8080/api/equipment/maintenance-due");
    info!("Or explore interactively at: http://localhost:8080/swagger-ui");

    Ok(())
}

async fn create_facility(
    db: &DatabaseConnection,
    name: &str,
    code: &str,
    facility_type: FacilityType,
) -> anyhow::Result<facility::Model> {
    let model = facility::ActiveModel {
        name: Set(name.to_string()),
        code: Set(code.to_string()),
        address: Set(Some("1200 Foundry Road".to_string())),
        city: Set(Some("Portland".to_string())),
        state: Set(Some("OR".to_string())),
        country: Set(Some("USA".to_string())),
        facility_type: Set(facility_type),
        is_active: Set(true),
        created_date: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(model)
}

struct OrderSeed {
    suffix: &'static str,
    part_number: &'static str,
    part_description: &'static str,
    status: ProductionStatus,
    priority: Priority,
    material: MaterialType,
    start_offset_days: i64,
    planned_days: i64,
    actual_days: Option<i64>,
    quantity: i32,
    completed: i32,
    estimated_cost: Decimal,
    actual_cost: Decimal,
}

async fn create_orders(
    db: &DatabaseConnection,
    casting: &facility::Model,
    machining: &facility::Model,
) -> anyhow::Result<Vec<production_order::Model>> {
    let seeds = [
        OrderSeed {
            suffix: "001",
            part_number: "TB-7781",
            part_description: "HPT turbine blade, stage 1",
            status: ProductionStatus::Completed,
            priority: Priority::Medium,
            material: MaterialType::InconelAlloy,
            start_offset_days: -20,
            planned_days: 5,
            actual_days: Some(4),
            quantity: 10,
            completed: 10,
            estimated_cost: dec!(50000),
            actual_cost: dec!(48000),
        },
        OrderSeed {
            suffix: "002",
            part_number: "NGV-2210",
            part_description: "Nozzle guide vane segment",
            status: ProductionStatus::InProgress,
            priority: Priority::High,
            material: MaterialType::NickelAlloy,
            start_offset_days: -3,
            planned_days: 10,
            actual_days: None,
            quantity: 24,
            completed: 9,
            estimated_cost: dec!(72000),
            actual_cost: dec!(30500),
        },
        OrderSeed {
            suffix: "003",
            part_number: "SH-0412",
            part_description: "Combustor shroud",
            status: ProductionStatus::InProgress,
            priority: Priority::Critical,
            material: MaterialType::SuperAlloy,
            start_offset_days: -12,
            planned_days: 10,
            actual_days: None,
            quantity: 6,
            completed: 4,
            estimated_cost: dec!(38000),
            actual_cost: dec!(35200),
        },
        OrderSeed {
            suffix: "004",
            part_number: "BR-1190",
            part_description: "Compressor bracket",
            status: ProductionStatus::Planned,
            priority: Priority::Low,
            material: MaterialType::TitaniumAlloy,
            start_offset_days: 14,
            planned_days: 3,
            actual_days: None,
            quantity: 50,
            completed: 0,
            estimated_cost: dec!(12500),
            actual_cost: Decimal::ZERO,
        },
        OrderSeed {
            suffix: "005",
            part_number: "TB-7781",
            part_description: "HPT turbine blade, stage 1",
            status: ProductionStatus::Planned,
            priority: Priority::Critical,
            material: MaterialType::InconelAlloy,
            start_offset_days: 21,
            planned_days: 5,
            actual_days: None,
            quantity: 10,
            completed: 0,
            estimated_cost: dec!(51000),
            actual_cost: Decimal::ZERO,
        },
    ];

    let now = Utc::now();
    let mut created = Vec::new();
    for seed in seeds {
        created.push(insert_order(db, casting, &seed, now).await?);
    }

    let machined = OrderSeed {
        suffix: "001",
        part_number: "HSG-3300",
        part_description: "Gearbox housing, finish machined",
        status: ProductionStatus::OnHold,
        priority: Priority::Medium,
        material: MaterialType::AluminumAlloy,
        start_offset_days: -1,
        planned_days: 4,
        actual_days: None,
        quantity: 12,
        completed: 2,
        estimated_cost: dec!(18400),
        actual_cost: dec!(4100),
    };
    created.push(insert_order(db, machining, &machined, now).await?);

    Ok(created)
}

async fn insert_order(
    db: &DatabaseConnection,
    facility: &facility::Model,
    seed: &OrderSeed,
    now: DateTime<Utc>,
) -> anyhow::Result<production_order::Model> {
    let start = now + Duration::days(seed.start_offset_days);
    let actual_start = matches!(
        seed.status,
        ProductionStatus::InProgress | ProductionStatus::OnHold | ProductionStatus::Completed
    )
    .then_some(start);

    let model = production_order::ActiveModel {
        order_number: Set(format!(
            "{}-{}-{}",
            facility.code,
            now.format("%Y%m%d"),
            seed.suffix
        )),
        part_number: Set(seed.part_number.to_string()),
        part_description: Set(Some(seed.part_description.to_string())),
        quantity: Set(seed.quantity),
        quantity_completed: Set(seed.completed),
        status: Set(seed.status),
        priority: Set(seed.priority),
        scheduled_start_date: Set(start),
        scheduled_end_date: Set(start + Duration::days(seed.planned_days)),
        actual_start_date: Set(actual_start),
        actual_end_date: Set(seed.actual_days.map(|d| start + Duration::days(d))),
        facility_id: Set(facility.id),
        customer_name: Set("Aero Propulsion Systems".to_string()),
        customer_order_number: Set(Some(format!("APS-PO-{}", seed.part_number))),
        material_type: Set(seed.material),
        estimated_cost: Set(seed.estimated_cost),
        actual_cost: Set(seed.actual_cost),
        created_date: Set(now),
        notes: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(model)
}

async fn create_equipment(
    db: &DatabaseConnection,
    casting: &facility::Model,
    machining: &facility::Model,
) -> anyhow::Result<usize> {
    let now = Utc::now();
    let rows = [
        ("EQ-VF-01", "Vacuum furnace 1", EquipmentType::VacuumFurnace, casting.id, -2),
        ("EQ-WI-01", "Wax injection press", EquipmentType::WaxInjectionMachine, casting.id, 30),
        ("EQ-XR-01", "Digital X-ray cell", EquipmentType::XRayMachine, casting.id, 5),
        ("EQ-CNC-01", "5-axis machining center", EquipmentType::CncMachine, machining.id, 60),
    ];

    for (number, name, equipment_type, facility_id, due_in_days) in rows {
        equipment::ActiveModel {
            equipment_number: Set(number.to_string()),
            name: Set(name.to_string()),
            description: Set(None),
            equipment_type: Set(equipment_type),
            manufacturer: Set(None),
            model_name: Set(None),
            serial_number: Set(None),
            installation_date: Set(now - Duration::days(720)),
            last_maintenance_date: Set(Some(now - Duration::days(90))),
            next_maintenance_date: Set(Some(now + Duration::days(due_in_days))),
            status: Set(EquipmentStatus::Available),
            facility_id: Set(facility_id),
            purchase_cost: Set(dec!(250000)),
            operating_hours: Set(dec!(8120.5)),
            maintenance_hours: Set(dec!(312)),
            efficiency_rating: Set(dec!(94.5)),
            maintenance_notes: Set(None),
            is_active: Set(true),
            created_date: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }
    Ok(rows.len())
}

async fn create_quality_records(
    db: &DatabaseConnection,
    order: &production_order::Model,
    facility: &facility::Model,
) -> anyhow::Result<()> {
    let now = Utc::now();
    let inspection = quality_inspection::ActiveModel {
        inspection_number: Set(format!("QI-{}", order.order_number)),
        production_order_id: Set(order.id),
        facility_id: Set(facility.id),
        inspection_type: Set(InspectionType::Final),
        status: Set(InspectionStatus::Approved),
        scheduled_date: Set(order.scheduled_end_date),
        actual_date: Set(order.actual_end_date),
        inspector_name: Set("J. Alvarez".to_string()),
        inspector_badge: Set(Some("QA-117".to_string())),
        passed: Set(true),
        results: Set(Some("All dimensions within drawing tolerance".to_string())),
        non_conformance_notes: Set(None),
        corrective_actions: Set(None),
        dimension_tolerance: Set(Some(dec!(0.0050))),
        measured_dimension: Set(Some(dec!(0.0031))),
        measurement_unit: Set(Some("in".to_string())),
        defect_count: Set(Some(0)),
        certification_required: Set(true),
        certification_completed: Set(true),
        created_date: Set(now),
        completed_date: Set(order.actual_end_date),
        ..Default::default()
    }
    .insert(db)
    .await?;

    quality_document::ActiveModel {
        quality_inspection_id: Set(inspection.id),
        document_name: Set("First article inspection report".to_string()),
        document_type: Set(DocumentType::InspectionReport),
        file_path: Set(Some("/documents/fai/TB-7781.pdf".to_string())),
        file_extension: Set(Some("pdf".to_string())),
        file_size: Set(482_113),
        description: Set(None),
        created_by: Set("J. Alvarez".to_string()),
        created_date: Set(now),
        approved_by: Set(None),
        approved_date: Set(None),
        is_approved: Set(false),
        version: Set("1.0".to_string()),
        is_active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let metrics = [
        (MetricType::CycleTime, "Shell build cycle", dec!(46.5), "h", Some(dec!(40)), Some(dec!(50))),
        (MetricType::ScrapRate, "Casting scrap", dec!(2.1), "%", None, Some(dec!(3))),
        (MetricType::FirstPassYield, "First pass yield", dec!(91.0), "%", Some(dec!(95)), None),
    ];
    for (metric_type, name, value, unit, min, max) in metrics {
        production_metric::ActiveModel {
            production_order_id: Set(order.id),
            metric_type: Set(metric_type),
            metric_name: Set(name.to_string()),
            value: Set(value),
            unit: Set(Some(unit.to_string())),
            target_value: Set(None),
            min_value: Set(min),
            max_value: Set(max),
            is_within_tolerance: Set(production_metric::within_bounds(value, min, max)),
            measured_date: Set(now),
            measured_by: Set(Some("MES".to_string())),
            notes: Set(None),
            created_date: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }
    Ok(())
}
