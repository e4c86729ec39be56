use chrono::{DateTime, Utc};
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
pub enum FacilityType {
    #[sea_orm(num_value = 1)]
    InvestmentCasting,
    #[sea_orm(num_value = 2)]
    AirfoilCasting,
    #[sea_orm(num_value = 3)]
    Forging,
    #[sea_orm(num_value = 4)]
    Machining,
    #[sea_orm(num_value = 5)]
    Assembly,
    #[sea_orm(num_value = 6)]
    QualityControl,
    #[sea_orm(num_value = 7)]
    Warehouse,
}

/// A physical manufacturing site
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "facilities")]
#[schema(as = Facility)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Short unique code, used as the prefix of generated order numbers
    #[sea_orm(unique)]
    pub code: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    #[serde(rename = "type")]
    pub facility_type: FacilityType,
    pub is_active: bool,
    pub created_date: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::production_order::Entity")]
    ProductionOrders,
    #[sea_orm(has_many = "super::quality_inspection::Entity")]
    QualityInspections,
    #[sea_orm(has_many = "super::equipment::Entity")]
    Equipment,
}

impl Related<super::production_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductionOrders.def()
    }
}

impl Related<super::quality_inspection::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QualityInspections.def()
    }
}

impl Related<super::equipment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Equipment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
