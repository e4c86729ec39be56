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
pub enum InspectionType {
    #[sea_orm(num_value = 1)]
    Incoming,
    #[sea_orm(num_value = 2)]
    InProcess,
    #[sea_orm(num_value = 3)]
    Final,
    #[sea_orm(num_value = 4)]
    Dimensional,
    #[sea_orm(num_value = 5)]
    Visual,
    #[sea_orm(num_value = 6)]
    Metallurgical,
    #[sea_orm(num_value = 7)]
    NonDestructiveTest,
    #[sea_orm(num_value = 8)]
    PressureTest,
    #[sea_orm(num_value = 9)]
    FlowTest,
    #[sea_orm(num_value = 10)]
    Radiographic,
    #[sea_orm(num_value = 11)]
    DyePenetrant,
    #[sea_orm(num_value = 12)]
    MagneticParticle,
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
pub enum InspectionStatus {
    #[default]
    #[sea_orm(num_value = 1)]
    Pending,
    #[sea_orm(num_value = 2)]
    InProgress,
    #[sea_orm(num_value = 3)]
    Completed,
    #[sea_orm(num_value = 4)]
    OnHold,
    #[sea_orm(num_value = 5)]
    Failed,
    #[sea_orm(num_value = 6)]
    Rework,
    #[sea_orm(num_value = 7)]
    Approved,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "quality_inspections")]
#[schema(as = QualityInspection)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub inspection_number: String,
    pub production_order_id: i32,
    pub facility_id: i32,
    #[serde(rename = "type")]
    pub inspection_type: InspectionType,
    pub status: InspectionStatus,
    pub scheduled_date: DateTime<Utc>,
    pub actual_date: Option<DateTime<Utc>>,
    pub inspector_name: String,
    pub inspector_badge: Option<String>,
    pub passed: bool,
    pub results: Option<String>,
    pub non_conformance_notes: Option<String>,
    pub corrective_actions: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 4)))", nullable)]
    #[schema(value_type = Option<String>)]
    pub dimension_tolerance: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 4)))", nullable)]
    #[schema(value_type = Option<String>)]
    pub measured_dimension: Option<Decimal>,
    pub measurement_unit: Option<String>,
    pub defect_count: Option<i32>,
    pub certification_required: bool,
    pub certification_completed: bool,
    pub created_date: DateTime<Utc>,
    pub completed_date: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::production_order::Entity",
        from = "Column::ProductionOrderId",
        to = "super::production_order::Column::Id",
        on_delete = "Restrict"
    )]
    ProductionOrder,
    #[sea_orm(
        belongs_to = "super::facility::Entity",
        from = "Column::FacilityId",
        to = "super::facility::Column::Id",
        on_delete = "Restrict"
    )]
    Facility,
    #[sea_orm(has_many = "super::quality_document::Entity")]
    QualityDocuments,
}

impl Related<super::production_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductionOrder.def()
    }
}

impl Related<super::facility::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Facility.def()
    }
}

impl Related<super::quality_document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QualityDocuments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
