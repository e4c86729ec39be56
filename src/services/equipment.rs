use crate::{
    db::DbPool,
    entities::equipment::{self, EquipmentStatus, EquipmentType},
    errors::ServiceError,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, instrument};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_equipment_input", skip_on_field_errors = false))]
pub struct EquipmentInput {
    #[validate(length(min = 1, max = 50))]
    pub equipment_number: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub equipment_type: EquipmentType,
    #[validate(length(max = 100))]
    pub manufacturer: Option<String>,
    #[serde(rename = "model")]
    #[validate(length(max = 100))]
    pub model_name: Option<String>,
    #[validate(length(max = 50))]
    pub serial_number: Option<String>,
    pub installation_date: DateTime<Utc>,
    pub last_maintenance_date: Option<DateTime<Utc>>,
    pub next_maintenance_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: EquipmentStatus,
    pub facility_id: i32,
    #[serde(default)]
    #[schema(value_type = String)]
    pub purchase_cost: Decimal,
    #[serde(default)]
    #[schema(value_type = String)]
    pub operating_hours: Decimal,
    #[serde(default)]
    #[schema(value_type = String)]
    pub maintenance_hours: Decimal,
    #[serde(default = "default_efficiency")]
    #[schema(value_type = String, example = "100.00")]
    pub efficiency_rating: Decimal,
    #[validate(length(max = 1000))]
    pub maintenance_notes: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_efficiency() -> Decimal {
    dec!(100)
}

fn default_active() -> bool {
    true
}

fn validate_equipment_input(input: &EquipmentInput) -> Result<(), ValidationError> {
    let negative = [
        input.purchase_cost,
        input.operating_hours,
        input.maintenance_hours,
        input.efficiency_rating,
    ]
    .iter()
    .any(Decimal::is_sign_negative);
    if negative {
        let mut err = ValidationError::new("negative_amount");
        err.message = Some("costs, hours and efficiency must not be negative".into());
        return Err(err);
    }
    Ok(())
}

/// Service for managing shop-floor equipment
#[derive(Clone)]
pub struct EquipmentService {
    db_pool: Arc<DbPool>,
}

impl EquipmentService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn list_equipment(
        &self,
        facility_id: Option<i32>,
    ) -> Result<Vec<equipment::Model>, ServiceError> {
        let db = self.db_pool.as_ref();
        let mut query = equipment::Entity::find();
        if let Some(facility_id) = facility_id {
            query = query.filter(equipment::Column::FacilityId.eq(facility_id));
        }
        query
            .order_by_asc(equipment::Column::EquipmentNumber)
            .all(db)
            .await
            .map_err(|e| {
                error!("Failed to list equipment: {}", e);
                ServiceError::db_error(e)
            })
    }

    #[instrument(skip(self))]
    pub async fn get_equipment(&self, id: i32) -> Result<Option<equipment::Model>, ServiceError> {
        let db = self.db_pool.as_ref();
        equipment::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)
    }

    #[instrument(skip(self, input), fields(equipment_number = %input.equipment_number))]
    pub async fn create_equipment(
        &self,
        input: EquipmentInput,
    ) -> Result<equipment::Model, ServiceError> {
        input.validate()?;
        let db = self.db_pool.as_ref();

        let active = equipment::ActiveModel {
            equipment_number: Set(input.equipment_number),
            name: Set(input.name),
            description: Set(input.description),
            equipment_type: Set(input.equipment_type),
            manufacturer: Set(input.manufacturer),
            model_name: Set(input.model_name),
            serial_number: Set(input.serial_number),
            installation_date: Set(input.installation_date),
            last_maintenance_date: Set(input.last_maintenance_date),
            next_maintenance_date: Set(input.next_maintenance_date),
            status: Set(input.status),
            facility_id: Set(input.facility_id),
            purchase_cost: Set(input.purchase_cost),
            operating_hours: Set(input.operating_hours),
            maintenance_hours: Set(input.maintenance_hours),
            efficiency_rating: Set(input.efficiency_rating),
            maintenance_notes: Set(input.maintenance_notes),
            is_active: Set(input.is_active),
            created_date: Set(Utc::now()),
            ..Default::default()
        };

        let equipment = active.insert(db).await.map_err(|e| {
            error!("Failed to create equipment: {}", e);
            ServiceError::db_error(e)
        })?;

        info!(equipment_id = equipment.id, "Equipment created");
        Ok(equipment)
    }

    #[instrument(skip(self, input))]
    pub async fn update_equipment(
        &self,
        id: i32,
        input: EquipmentInput,
    ) -> Result<Option<equipment::Model>, ServiceError> {
        input.validate()?;
        let db = self.db_pool.as_ref();
        let Some(existing) = equipment::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
        else {
            return Ok(None);
        };

        let mut active: equipment::ActiveModel = existing.into();
        active.equipment_number = Set(input.equipment_number);
        active.name = Set(input.name);
        active.description = Set(input.description);
        active.equipment_type = Set(input.equipment_type);
        active.manufacturer = Set(input.manufacturer);
        active.model_name = Set(input.model_name);
        active.serial_number = Set(input.serial_number);
        active.installation_date = Set(input.installation_date);
        active.last_maintenance_date = Set(input.last_maintenance_date);
        active.next_maintenance_date = Set(input.next_maintenance_date);
        active.status = Set(input.status);
        active.facility_id = Set(input.facility_id);
        active.purchase_cost = Set(input.purchase_cost);
        active.operating_hours = Set(input.operating_hours);
        active.maintenance_hours = Set(input.maintenance_hours);
        active.efficiency_rating = Set(input.efficiency_rating);
        active.maintenance_notes = Set(input.maintenance_notes);
        active.is_active = Set(input.is_active);

        let updated = active.update(db).await.map_err(|e| {
            error!(equipment_id = id, "Failed to update equipment: {}", e);
            ServiceError::db_error(e)
        })?;
        info!(equipment_id = id, "Equipment updated");
        Ok(Some(updated))
    }

    #[instrument(skip(self))]
    pub async fn delete_equipment(&self, id: i32) -> Result<bool, ServiceError> {
        let db = self.db_pool.as_ref();
        let result = equipment::Entity::delete_by_id(id)
            .exec(db)
            .await
            .map_err(|e| {
                error!(equipment_id = id, "Failed to delete equipment: {}", e);
                ServiceError::db_error(e)
            })?;
        Ok(result.rows_affected > 0)
    }

    /// Active equipment due for maintenance on or before `as_of`, soonest first
    #[instrument(skip(self))]
    pub async fn get_maintenance_due(
        &self,
        as_of: DateTime<Utc>,
    ) -> Result<Vec<equipment::Model>, ServiceError> {
        let db = self.db_pool.as_ref();
        equipment::Entity::find()
            .filter(equipment::Column::IsActive.eq(true))
            .filter(equipment::Column::NextMaintenanceDate.is_not_null())
            .filter(equipment::Column::NextMaintenanceDate.lte(as_of))
            .order_by_asc(equipment::Column::NextMaintenanceDate)
            .all(db)
            .await
            .map_err(|e| {
                error!("Failed to query maintenance schedule: {}", e);
                ServiceError::db_error(e)
            })
    }
}
