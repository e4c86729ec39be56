use crate::{
    db::DbPool,
    entities::{
        production_metric::{self, within_bounds, MetricType},
        production_order,
    },
    errors::ServiceError,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_metric_bounds", skip_on_field_errors = false))]
pub struct MetricInput {
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    #[validate(length(min = 1, max = 100))]
    pub metric_name: String,
    #[schema(value_type = String, example = "12.5")]
    pub value: Decimal,
    #[validate(length(max = 20))]
    pub unit: Option<String>,
    #[schema(value_type = Option<String>)]
    pub target_value: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub min_value: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub max_value: Option<Decimal>,
    /// Derived from the bounds when omitted
    pub is_within_tolerance: Option<bool>,
    /// Defaults to the time of recording
    pub measured_date: Option<DateTime<Utc>>,
    #[validate(length(max = 100))]
    pub measured_by: Option<String>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

fn validate_metric_bounds(input: &MetricInput) -> Result<(), ValidationError> {
    if let (Some(min), Some(max)) = (input.min_value, input.max_value) {
        if min > max {
            let mut err = ValidationError::new("inverted_bounds");
            err.message = Some("min_value must not exceed max_value".into());
            return Err(err);
        }
    }
    Ok(())
}

impl MetricInput {
    /// Explicit flag if given, otherwise whether `value` sits inside the bounds
    pub fn tolerance(&self) -> bool {
        self.is_within_tolerance
            .unwrap_or_else(|| within_bounds(self.value, self.min_value, self.max_value))
    }
}

/// Service for measurements recorded against production orders
#[derive(Clone)]
pub struct ProductionMetricService {
    db_pool: Arc<DbPool>,
}

impl ProductionMetricService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn get_metrics_for_order(
        &self,
        production_order_id: i32,
    ) -> Result<Vec<production_metric::Model>, ServiceError> {
        let db = self.db_pool.as_ref();
        production_metric::Entity::find()
            .filter(production_metric::Column::ProductionOrderId.eq(production_order_id))
            .order_by_asc(production_metric::Column::MeasuredDate)
            .all(db)
            .await
            .map_err(|e| {
                error!(production_order_id, "Failed to list production metrics: {}", e);
                ServiceError::db_error(e)
            })
    }

    /// Records a measurement; `None` when the order does not exist
    #[instrument(skip(self, input), fields(metric = %input.metric_name))]
    pub async fn record_metric(
        &self,
        production_order_id: i32,
        input: MetricInput,
    ) -> Result<Option<production_metric::Model>, ServiceError> {
        input.validate()?;
        let db = self.db_pool.as_ref();
        let order_exists = production_order::Entity::find_by_id(production_order_id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
            .is_some();
        if !order_exists {
            return Ok(None);
        }

        let now = Utc::now();
        let is_within_tolerance = input.tolerance();
        let active = production_metric::ActiveModel {
            production_order_id: Set(production_order_id),
            metric_type: Set(input.metric_type),
            metric_name: Set(input.metric_name),
            value: Set(input.value),
            unit: Set(input.unit),
            target_value: Set(input.target_value),
            min_value: Set(input.min_value),
            max_value: Set(input.max_value),
            is_within_tolerance: Set(is_within_tolerance),
            measured_date: Set(input.measured_date.unwrap_or(now)),
            measured_by: Set(input.measured_by),
            notes: Set(input.notes),
            created_date: Set(now),
            ..Default::default()
        };

        let metric = active.insert(db).await.map_err(|e| {
            error!(production_order_id, "Failed to record production metric: {}", e);
            ServiceError::db_error(e)
        })?;

        if !metric.is_within_tolerance {
            warn!(
                metric_id = metric.id,
                production_order_id,
                value = %metric.value,
                "Production metric out of tolerance"
            );
        }
        info!(metric_id = metric.id, production_order_id, "Production metric recorded");
        Ok(Some(metric))
    }

    #[instrument(skip(self))]
    pub async fn delete_metric(&self, id: i32) -> Result<bool, ServiceError> {
        let db = self.db_pool.as_ref();
        let result = production_metric::Entity::delete_by_id(id)
            .exec(db)
            .await
            .map_err(|e| {
                error!(metric_id = id, "Failed to delete production metric: {}", e);
                ServiceError::db_error(e)
            })?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(value: Decimal, min: Option<Decimal>, max: Option<Decimal>) -> MetricInput {
        MetricInput {
            metric_type: MetricType::CycleTime,
            metric_name: "Shell cycle time".into(),
            value,
            unit: Some("min".into()),
            target_value: None,
            min_value: min,
            max_value: max,
            is_within_tolerance: None,
            measured_date: None,
            measured_by: None,
            notes: None,
        }
    }

    #[test]
    fn tolerance_is_derived_from_bounds() {
        assert!(input(dec!(1450), Some(dec!(1400)), Some(dec!(1500))).tolerance());
        assert!(!input(dec!(1550), Some(dec!(1400)), Some(dec!(1500))).tolerance());
        assert!(!input(dec!(1350), Some(dec!(1400)), None).tolerance());
        assert!(input(dec!(1350), None, None).tolerance());
    }

    #[test]
    fn explicit_tolerance_wins() {
        let mut metric = input(dec!(9999), Some(dec!(0)), Some(dec!(1)));
        metric.is_within_tolerance = Some(true);
        assert!(metric.tolerance());
    }

    #[test]
    fn inverted_bounds_fail_validation() {
        let metric = input(dec!(5), Some(dec!(10)), Some(dec!(1)));
        assert!(metric.validate().is_err());
    }
}
