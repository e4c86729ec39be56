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
pub enum DocumentType {
    #[sea_orm(num_value = 1)]
    InspectionReport,
    #[sea_orm(num_value = 2)]
    CertificationDocument,
    #[sea_orm(num_value = 3)]
    TestResults,
    #[sea_orm(num_value = 4)]
    MaterialCertificate,
    #[sea_orm(num_value = 5)]
    DrawingRevision,
    #[sea_orm(num_value = 6)]
    NonConformanceReport,
    #[sea_orm(num_value = 7)]
    CorrectiveActionReport,
    #[sea_orm(num_value = 8)]
    ProcessSheet,
    #[sea_orm(num_value = 9)]
    QualityManual,
    #[sea_orm(num_value = 10)]
    CalibrationCertificate,
    #[sea_orm(num_value = 11)]
    TechnicalSpecification,
    #[sea_orm(num_value = 12)]
    ComplianceDocument,
}

/// Metadata for a file attached to an inspection. Deleted with its inspection.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "quality_documents")]
#[schema(as = QualityDocument)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub quality_inspection_id: i32,
    pub document_name: String,
    #[serde(rename = "type")]
    pub document_type: DocumentType,
    pub file_path: Option<String>,
    pub file_extension: Option<String>,
    pub file_size: i64,
    pub description: Option<String>,
    pub created_by: String,
    pub created_date: DateTime<Utc>,
    pub approved_by: Option<String>,
    pub approved_date: Option<DateTime<Utc>>,
    pub is_approved: bool,
    pub version: String,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quality_inspection::Entity",
        from = "Column::QualityInspectionId",
        to = "super::quality_inspection::Column::Id",
        on_delete = "Cascade"
    )]
    QualityInspection,
}

impl Related<super::quality_inspection::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QualityInspection.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
