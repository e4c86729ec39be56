use crate::{
    db::DbPool,
    entities::{
        quality_document::{self, DocumentType},
        quality_inspection::{self, InspectionStatus, InspectionType},
    },
    errors::ServiceError,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct InspectionInput {
    #[validate(length(min = 1, max = 50))]
    pub inspection_number: String,
    pub production_order_id: i32,
    pub facility_id: i32,
    #[serde(rename = "type")]
    pub inspection_type: InspectionType,
    #[serde(default)]
    pub status: InspectionStatus,
    pub scheduled_date: DateTime<Utc>,
    pub actual_date: Option<DateTime<Utc>>,
    #[validate(length(min = 1, max = 100))]
    pub inspector_name: String,
    #[validate(length(max = 50))]
    pub inspector_badge: Option<String>,
    #[serde(default)]
    pub passed: bool,
    #[validate(length(max = 2000))]
    pub results: Option<String>,
    #[validate(length(max = 2000))]
    pub non_conformance_notes: Option<String>,
    #[validate(length(max = 2000))]
    pub corrective_actions: Option<String>,
    #[schema(value_type = Option<String>)]
    pub dimension_tolerance: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub measured_dimension: Option<Decimal>,
    #[validate(length(max = 20))]
    pub measurement_unit: Option<String>,
    #[validate(range(min = 0))]
    pub defect_count: Option<i32>,
    #[serde(default)]
    pub certification_required: bool,
    #[serde(default)]
    pub certification_completed: bool,
    pub completed_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct DocumentInput {
    #[validate(length(min = 1, max = 200))]
    pub document_name: String,
    #[serde(rename = "type")]
    pub document_type: DocumentType,
    #[validate(length(max = 500))]
    pub file_path: Option<String>,
    #[validate(length(max = 10))]
    pub file_extension: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub file_size: i64,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub created_by: String,
    #[serde(default = "default_version")]
    #[validate(length(min = 1, max = 20))]
    pub version: String,
}

fn default_version() -> String {
    "1.0".to_string()
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ApprovalInput {
    #[validate(length(min = 1, max = 100))]
    pub approved_by: String,
}

/// An inspection with its attached documents
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InspectionWithDocuments {
    #[serde(flatten)]
    pub inspection: quality_inspection::Model,
    pub documents: Vec<quality_document::Model>,
}

/// Service for quality inspections and their documents
#[derive(Clone)]
pub struct QualityService {
    db_pool: Arc<DbPool>,
}

impl QualityService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn get_inspections_by_order(
        &self,
        production_order_id: i32,
    ) -> Result<Vec<quality_inspection::Model>, ServiceError> {
        let db = self.db_pool.as_ref();
        quality_inspection::Entity::find()
            .filter(quality_inspection::Column::ProductionOrderId.eq(production_order_id))
            .order_by_asc(quality_inspection::Column::ScheduledDate)
            .all(db)
            .await
            .map_err(|e| {
                error!(production_order_id, "Failed to list inspections: {}", e);
                ServiceError::db_error(e)
            })
    }

    #[instrument(skip(self))]
    pub async fn get_inspection(
        &self,
        id: i32,
    ) -> Result<Option<InspectionWithDocuments>, ServiceError> {
        let db = self.db_pool.as_ref();
        let Some(inspection) = quality_inspection::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
        else {
            return Ok(None);
        };

        let documents = inspection
            .find_related(quality_document::Entity)
            .order_by_asc(quality_document::Column::CreatedDate)
            .all(db)
            .await
            .map_err(ServiceError::db_error)?;

        Ok(Some(InspectionWithDocuments {
            inspection,
            documents,
        }))
    }

    #[instrument(skip(self, input), fields(inspection_number = %input.inspection_number))]
    pub async fn create_inspection(
        &self,
        input: InspectionInput,
    ) -> Result<quality_inspection::Model, ServiceError> {
        input.validate()?;
        let db = self.db_pool.as_ref();

        let active = quality_inspection::ActiveModel {
            inspection_number: Set(input.inspection_number),
            production_order_id: Set(input.production_order_id),
            facility_id: Set(input.facility_id),
            inspection_type: Set(input.inspection_type),
            status: Set(input.status),
            scheduled_date: Set(input.scheduled_date),
            actual_date: Set(input.actual_date),
            inspector_name: Set(input.inspector_name),
            inspector_badge: Set(input.inspector_badge),
            passed: Set(input.passed),
            results: Set(input.results),
            non_conformance_notes: Set(input.non_conformance_notes),
            corrective_actions: Set(input.corrective_actions),
            dimension_tolerance: Set(input.dimension_tolerance),
            measured_dimension: Set(input.measured_dimension),
            measurement_unit: Set(input.measurement_unit),
            defect_count: Set(input.defect_count),
            certification_required: Set(input.certification_required),
            certification_completed: Set(input.certification_completed),
            created_date: Set(Utc::now()),
            completed_date: Set(input.completed_date),
            ..Default::default()
        };

        let inspection = active.insert(db).await.map_err(|e| {
            error!("Failed to create quality inspection: {}", e);
            ServiceError::db_error(e)
        })?;

        info!(
            inspection_id = inspection.id,
            production_order_id = inspection.production_order_id,
            "Quality inspection created"
        );
        Ok(inspection)
    }

    #[instrument(skip(self, input))]
    pub async fn update_inspection(
        &self,
        id: i32,
        input: InspectionInput,
    ) -> Result<Option<quality_inspection::Model>, ServiceError> {
        input.validate()?;
        let db = self.db_pool.as_ref();
        let Some(existing) = quality_inspection::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
        else {
            return Ok(None);
        };

        let mut active: quality_inspection::ActiveModel = existing.into();
        active.inspection_number = Set(input.inspection_number);
        active.production_order_id = Set(input.production_order_id);
        active.facility_id = Set(input.facility_id);
        active.inspection_type = Set(input.inspection_type);
        active.status = Set(input.status);
        active.scheduled_date = Set(input.scheduled_date);
        active.actual_date = Set(input.actual_date);
        active.inspector_name = Set(input.inspector_name);
        active.inspector_badge = Set(input.inspector_badge);
        active.passed = Set(input.passed);
        active.results = Set(input.results);
        active.non_conformance_notes = Set(input.non_conformance_notes);
        active.corrective_actions = Set(input.corrective_actions);
        active.dimension_tolerance = Set(input.dimension_tolerance);
        active.measured_dimension = Set(input.measured_dimension);
        active.measurement_unit = Set(input.measurement_unit);
        active.defect_count = Set(input.defect_count);
        active.certification_required = Set(input.certification_required);
        active.certification_completed = Set(input.certification_completed);
        active.completed_date = Set(input.completed_date);

        let updated = active.update(db).await.map_err(|e| {
            error!(inspection_id = id, "Failed to update quality inspection: {}", e);
            ServiceError::db_error(e)
        })?;
        info!(inspection_id = id, status = %updated.status, "Quality inspection updated");
        Ok(Some(updated))
    }

    /// Removes the inspection and, through the foreign key, its documents
    #[instrument(skip(self))]
    pub async fn delete_inspection(&self, id: i32) -> Result<bool, ServiceError> {
        let db = self.db_pool.as_ref();
        let result = quality_inspection::Entity::delete_by_id(id)
            .exec(db)
            .await
            .map_err(|e| {
                error!(inspection_id = id, "Failed to delete quality inspection: {}", e);
                ServiceError::db_error(e)
            })?;
        Ok(result.rows_affected > 0)
    }

    #[instrument(skip(self))]
    pub async fn get_documents(
        &self,
        inspection_id: i32,
    ) -> Result<Vec<quality_document::Model>, ServiceError> {
        let db = self.db_pool.as_ref();
        quality_document::Entity::find()
            .filter(quality_document::Column::QualityInspectionId.eq(inspection_id))
            .order_by_asc(quality_document::Column::CreatedDate)
            .all(db)
            .await
            .map_err(ServiceError::db_error)
    }

    /// Attaches a document; `None` when the inspection does not exist
    #[instrument(skip(self, input))]
    pub async fn add_document(
        &self,
        inspection_id: i32,
        input: DocumentInput,
    ) -> Result<Option<quality_document::Model>, ServiceError> {
        input.validate()?;
        let db = self.db_pool.as_ref();
        let exists = quality_inspection::Entity::find_by_id(inspection_id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
            .is_some();
        if !exists {
            return Ok(None);
        }

        let active = quality_document::ActiveModel {
            quality_inspection_id: Set(inspection_id),
            document_name: Set(input.document_name),
            document_type: Set(input.document_type),
            file_path: Set(input.file_path),
            file_extension: Set(input.file_extension),
            file_size: Set(input.file_size),
            description: Set(input.description),
            created_by: Set(input.created_by),
            created_date: Set(Utc::now()),
            approved_by: Set(None),
            approved_date: Set(None),
            is_approved: Set(false),
            version: Set(input.version),
            is_active: Set(true),
            ..Default::default()
        };

        let document = active.insert(db).await.map_err(|e| {
            error!(inspection_id, "Failed to attach quality document: {}", e);
            ServiceError::db_error(e)
        })?;
        info!(document_id = document.id, inspection_id, "Quality document attached");
        Ok(Some(document))
    }

    /// Marks a document approved by `approver` now; `None` when absent
    #[instrument(skip(self))]
    pub async fn approve_document(
        &self,
        id: i32,
        approver: &str,
    ) -> Result<Option<quality_document::Model>, ServiceError> {
        let db = self.db_pool.as_ref();
        let Some(existing) = quality_document::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
        else {
            return Ok(None);
        };

        let mut active: quality_document::ActiveModel = existing.into();
        active.is_approved = Set(true);
        active.approved_by = Set(Some(approver.to_string()));
        active.approved_date = Set(Some(Utc::now()));

        let approved = active.update(db).await.map_err(|e| {
            error!(document_id = id, "Failed to approve quality document: {}", e);
            ServiceError::db_error(e)
        })?;
        info!(document_id = id, approver, "Quality document approved");
        Ok(Some(approved))
    }

    #[instrument(skip(self))]
    pub async fn delete_document(&self, id: i32) -> Result<bool, ServiceError> {
        let db = self.db_pool.as_ref();
        let result = quality_document::Entity::delete_by_id(id)
            .exec(db)
            .await
            .map_err(|e| {
                error!(document_id = id, "Failed to delete quality document: {}", e);
                ServiceError::db_error(e)
            })?;
        Ok(result.rows_affected > 0)
    }
}
