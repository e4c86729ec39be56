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
pub enum MetricType {
    #[sea_orm(num_value = 1)]
    CycleTime,
    #[sea_orm(num_value = 2)]
    ThroughputRate,
    #[sea_orm(num_value = 3)]
    QualityRate,
    #[sea_orm(num_value = 4)]
    ScrapRate,
    #[sea_orm(num_value = 5)]
    ReworkRate,
    #[sea_orm(num_value = 6)]
    EquipmentEfficiency,
    #[sea_orm(num_value = 7)]
    MaterialUtilization,
    #[sea_orm(num_value = 8)]
    LaborEfficiency,
    #[sea_orm(num_value = 9)]
    EnergyConsumption,
    #[sea_orm(num_value = 10)]
    DefectRate,
    #[sea_orm(num_value = 11)]
    OnTimeDelivery,
    #[sea_orm(num_value = 12)]
    ProductionVolume,
    #[sea_orm(num_value = 13)]
    MachineDowntime,
    #[sea_orm(num_value = 14)]
    YieldRate,
    #[sea_orm(num_value = 15)]
    FirstPassYield,
}

/// A measurement taken against a production order. Deleted with its order.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "production_metrics")]
#[schema(as = ProductionMetric)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub production_order_id: i32,
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    pub metric_name: String,
    #[sea_orm(column_type = "Decimal(Some((18, 4)))")]
    #[schema(value_type = String)]
    pub value: Decimal,
    pub unit: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((18, 4)))", nullable)]
    #[schema(value_type = Option<String>)]
    pub target_value: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((18, 4)))", nullable)]
    #[schema(value_type = Option<String>)]
    pub min_value: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((18, 4)))", nullable)]
    #[schema(value_type = Option<String>)]
    pub max_value: Option<Decimal>,
    pub is_within_tolerance: bool,
    pub measured_date: DateTime<Utc>,
    pub measured_by: Option<String>,
    pub notes: Option<String>,
    pub created_date: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::production_order::Entity",
        from = "Column::ProductionOrderId",
        to = "super::production_order::Column::Id",
        on_delete = "Cascade"
    )]
    ProductionOrder,
}

impl Related<super::production_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductionOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Whether `value` lies inside whichever of `min`/`max` are present.
pub fn within_bounds(value: Decimal, min: Option<Decimal>, max: Option<Decimal>) -> bool {
    min.map_or(true, |lo| value >= lo) && max.map_or(true, |hi| value <= hi)
}
