use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
    strum::EnumString,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EquipmentType {
    #[sea_orm(num_value = 1)]
    CastingFurnace,
    #[sea_orm(num_value = 2)]
    WaxInjectionMachine,
    #[sea_orm(num_value = 3)]
    DippingRobot,
    #[sea_orm(num_value = 4)]
    AutoClave,
    #[sea_orm(num_value = 5)]
    VacuumFurnace,
    #[sea_orm(num_value = 6)]
    CncMachine,
    #[sea_orm(num_value = 7)]
    Grinder,
    #[sea_orm(num_value = 8)]
    MillingMachine,
    #[sea_orm(num_value = 9)]
    Lathe,
    #[sea_orm(num_value = 10)]
    PressureTester,
    #[sea_orm(num_value = 11)]
    FlowTester,
    #[sea_orm(num_value = 12)]
    XRayMachine,
    #[sea_orm(num_value = 13)]
    CoordinateMeasuringMachine,
    #[sea_orm(num_value = 14)]
    SurfaceGrinder,
    #[sea_orm(num_value = 15)]
    HeatTreatmentFurnace,
    #[sea_orm(num_value = 16)]
    QualityScanner,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
    strum::EnumString,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EquipmentStatus {
    #[default]
    #[sea_orm(num_value = 1)]
    Available,
    #[sea_orm(num_value = 2)]
    InUse,
    #[sea_orm(num_value = 3)]
    Maintenance,
    #[sea_orm(num_value = 4)]
    Breakdown,
    #[sea_orm(num_value = 5)]
    Scheduled,
    #[sea_orm(num_value = 6)]
    Retired,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "equipment")]
#[schema(as = Equipment)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub equipment_number: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub equipment_type: EquipmentType,
    pub manufacturer: Option<String>,
    #[serde(rename = "model")]
    pub model_name: Option<String>,
    pub serial_number: Option<String>,
    pub installation_date: DateTime<Utc>,
    pub last_maintenance_date: Option<DateTime<Utc>>,
    pub next_maintenance_date: Option<DateTime<Utc>>,
    pub status: EquipmentStatus,
    pub facility_id: i32,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    #[schema(value_type = String)]
    pub purchase_cost: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    #[schema(value_type = String)]
    pub operating_hours: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    #[schema(value_type = String)]
    pub maintenance_hours: Decimal,
    /// Percentage, 100 when new
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    #[schema(value_type = String, example = "100.00")]
    pub efficiency_rating: Decimal,
    pub maintenance_notes: Option<String>,
    pub is_active: bool,
    pub created_date: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::facility::Entity",
        from = "Column::FacilityId",
        to = "super::facility::Column::Id",
        on_delete = "Restrict"
    )]
    Facility,
}

impl Related<super::facility::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Facility.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
