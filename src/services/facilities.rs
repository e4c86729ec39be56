use crate::{
    db::DbPool,
    entities::facility::{self, FacilityType},
    errors::ServiceError,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, instrument};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct FacilityInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 10))]
    pub code: String,
    #[validate(length(max = 200))]
    pub address: Option<String>,
    #[validate(length(max = 50))]
    pub city: Option<String>,
    #[validate(length(max = 50))]
    pub state: Option<String>,
    #[validate(length(max = 50))]
    pub country: Option<String>,
    #[serde(rename = "type")]
    pub facility_type: FacilityType,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Service for managing manufacturing facilities
#[derive(Clone)]
pub struct FacilityService {
    db_pool: Arc<DbPool>,
}

impl FacilityService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Active and inactive facilities, by name
    #[instrument(skip(self))]
    pub async fn list_facilities(&self) -> Result<Vec<facility::Model>, ServiceError> {
        let db = self.db_pool.as_ref();
        facility::Entity::find()
            .order_by_asc(facility::Column::Name)
            .all(db)
            .await
            .map_err(|e| {
                error!("Failed to list facilities: {}", e);
                ServiceError::db_error(e)
            })
    }

    #[instrument(skip(self))]
    pub async fn get_facility(&self, id: i32) -> Result<Option<facility::Model>, ServiceError> {
        let db = self.db_pool.as_ref();
        facility::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)
    }

    #[instrument(skip(self))]
    pub async fn get_facility_by_code(
        &self,
        code: &str,
    ) -> Result<Option<facility::Model>, ServiceError> {
        let db = self.db_pool.as_ref();
        facility::Entity::find()
            .filter(facility::Column::Code.eq(code))
            .one(db)
            .await
            .map_err(ServiceError::db_error)
    }

    /// Creates a facility; a duplicate code is a `Conflict`
    #[instrument(skip(self, input), fields(code = %input.code))]
    pub async fn create_facility(
        &self,
        input: FacilityInput,
    ) -> Result<facility::Model, ServiceError> {
        input.validate()?;
        let db = self.db_pool.as_ref();

        let active = facility::ActiveModel {
            name: Set(input.name),
            code: Set(input.code),
            address: Set(input.address),
            city: Set(input.city),
            state: Set(input.state),
            country: Set(input.country),
            facility_type: Set(input.facility_type),
            is_active: Set(input.is_active),
            created_date: Set(Utc::now()),
            ..Default::default()
        };

        let facility = active.insert(db).await.map_err(|e| {
            error!("Failed to create facility: {}", e);
            ServiceError::db_error(e)
        })?;

        info!(facility_id = facility.id, "Facility created");
        Ok(facility)
    }

    #[instrument(skip(self, input))]
    pub async fn update_facility(
        &self,
        id: i32,
        input: FacilityInput,
    ) -> Result<Option<facility::Model>, ServiceError> {
        input.validate()?;
        let db = self.db_pool.as_ref();
        let Some(existing) = facility::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
        else {
            return Ok(None);
        };

        let mut active: facility::ActiveModel = existing.into();
        active.name = Set(input.name);
        active.code = Set(input.code);
        active.address = Set(input.address);
        active.city = Set(input.city);
        active.state = Set(input.state);
        active.country = Set(input.country);
        active.facility_type = Set(input.facility_type);
        active.is_active = Set(input.is_active);

        let updated = active.update(db).await.map_err(|e| {
            error!(facility_id = id, "Failed to update facility: {}", e);
            ServiceError::db_error(e)
        })?;
        info!(facility_id = id, "Facility updated");
        Ok(Some(updated))
    }

    /// Fails with `Conflict` while orders, inspections or equipment reference it
    #[instrument(skip(self))]
    pub async fn delete_facility(&self, id: i32) -> Result<bool, ServiceError> {
        let db = self.db_pool.as_ref();
        let result = facility::Entity::delete_by_id(id)
            .exec(db)
            .await
            .map_err(|e| {
                error!(facility_id = id, "Failed to delete facility: {}", e);
                ServiceError::db_error(e)
            })?;

        if result.rows_affected > 0 {
            info!(facility_id = id, "Facility deleted");
        }
        Ok(result.rows_affected > 0)
    }
}
