use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle of a production order.
///
/// Intended flow is Planned → Released → InProgress → {OnHold, Completed,
/// Cancelled} → Shipped, with OnHold able to return to InProgress. The
/// transitions are not enforced.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
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
pub enum ProductionStatus {
    #[default]
    #[sea_orm(num_value = 1)]
    Planned,
    #[sea_orm(num_value = 2)]
    Released,
    #[sea_orm(num_value = 3)]
    InProgress,
    #[sea_orm(num_value = 4)]
    OnHold,
    #[sea_orm(num_value = 5)]
    Completed,
    #[sea_orm(num_value = 6)]
    Cancelled,
    #[sea_orm(num_value = 7)]
    Shipped,
}

/// Declaration order is significance order: `Low < Critical`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
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
pub enum Priority {
    #[sea_orm(num_value = 1)]
    Low,
    #[default]
    #[sea_orm(num_value = 2)]
    Medium,
    #[sea_orm(num_value = 3)]
    High,
    #[sea_orm(num_value = 4)]
    Critical,
}

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
pub enum MaterialType {
    #[sea_orm(num_value = 1)]
    InconelAlloy,
    #[sea_orm(num_value = 2)]
    TitaniumAlloy,
    #[sea_orm(num_value = 3)]
    NickelAlloy,
    #[sea_orm(num_value = 4)]
    SteelAlloy,
    #[sea_orm(num_value = 5)]
    AluminumAlloy,
    #[sea_orm(num_value = 6)]
    SuperAlloy,
    #[sea_orm(num_value = 7)]
    CarbonSteel,
    #[sea_orm(num_value = 8)]
    StainlessSteel,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "production_orders")]
#[schema(as = ProductionOrder)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub order_number: String,
    pub part_number: String,
    pub part_description: Option<String>,
    /// Target quantity
    pub quantity: i32,
    pub quantity_completed: i32,
    pub status: ProductionStatus,
    pub priority: Priority,
    pub scheduled_start_date: DateTime<Utc>,
    pub scheduled_end_date: DateTime<Utc>,
    pub actual_start_date: Option<DateTime<Utc>>,
    pub actual_end_date: Option<DateTime<Utc>>,
    pub facility_id: i32,
    pub customer_name: String,
    pub customer_order_number: Option<String>,
    pub material_type: MaterialType,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    #[schema(value_type = String, example = "50000.00")]
    pub estimated_cost: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    #[schema(value_type = String, example = "48000.00")]
    pub actual_cost: Decimal,
    pub created_date: DateTime<Utc>,
    pub notes: Option<String>,
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
    #[sea_orm(has_many = "super::quality_inspection::Entity")]
    QualityInspections,
    #[sea_orm(has_many = "super::production_metric::Entity")]
    ProductionMetrics,
}

impl Related<super::facility::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Facility.def()
    }
}

impl Related<super::quality_inspection::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QualityInspections.def()
    }
}

impl Related<super::production_metric::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductionMetrics.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_completed(&self) -> bool {
        self.status == ProductionStatus::Completed
    }

    pub fn scheduled_duration(&self) -> Duration {
        self.scheduled_end_date - self.scheduled_start_date
    }

    /// Actual run time, when both actual dates are recorded
    pub fn actual_duration(&self) -> Option<Duration> {
        match (self.actual_start_date, self.actual_end_date) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Finished later than planned
    pub fn finished_late(&self) -> bool {
        self.actual_end_date
            .map(|end| end > self.scheduled_end_date)
            .unwrap_or(false)
    }
}
