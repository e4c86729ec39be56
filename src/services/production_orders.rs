use crate::{
    db::DbPool,
    entities::{
        facility, production_metric,
        production_order::{self, Priority, ProductionStatus},
        quality_inspection,
    },
    errors::ServiceError,
};
use chrono::{DateTime, Duration, NaiveTime, Utc};
use metrics::counter;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, collections::BTreeMap, sync::Arc};
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Code used in generated order numbers when the facility row is missing
pub const FALLBACK_FACILITY_CODE: &str = "FAC";

/// Payload for creating or fully replacing a production order
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_order_input", skip_on_field_errors = false))]
pub struct ProductionOrderInput {
    /// Must match the path id on update when present
    #[serde(default)]
    pub id: Option<i32>,
    /// Generated as `{facilityCode}-{yyyyMMdd}-{seq}` when blank
    #[validate(length(max = 50))]
    pub order_number: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub part_number: String,
    #[validate(length(max = 200))]
    pub part_description: Option<String>,
    #[validate(range(min = 1))]
    pub quantity: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub quantity_completed: i32,
    #[serde(default)]
    pub status: ProductionStatus,
    #[serde(default)]
    pub priority: Priority,
    pub scheduled_start_date: DateTime<Utc>,
    pub scheduled_end_date: DateTime<Utc>,
    pub actual_start_date: Option<DateTime<Utc>>,
    pub actual_end_date: Option<DateTime<Utc>>,
    pub facility_id: i32,
    #[validate(length(min = 1, max = 100))]
    pub customer_name: String,
    #[validate(length(max = 50))]
    pub customer_order_number: Option<String>,
    pub material_type: production_order::MaterialType,
    #[serde(default)]
    #[schema(value_type = String, example = "50000.00")]
    pub estimated_cost: Decimal,
    #[serde(default)]
    #[schema(value_type = String, example = "0")]
    pub actual_cost: Decimal,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

fn validate_order_input(input: &ProductionOrderInput) -> Result<(), ValidationError> {
    if input.scheduled_end_date < input.scheduled_start_date {
        let mut err = ValidationError::new("schedule_window");
        err.message = Some("scheduled_end_date must not precede scheduled_start_date".into());
        return Err(err);
    }
    if input.estimated_cost.is_sign_negative() || input.actual_cost.is_sign_negative() {
        let mut err = ValidationError::new("negative_cost");
        err.message = Some("costs must not be negative".into());
        return Err(err);
    }
    Ok(())
}

/// A production order together with its facility
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductionOrderSummary {
    #[serde(flatten)]
    pub order: production_order::Model,
    pub facility: Option<facility::Model>,
}

impl From<(production_order::Model, Option<facility::Model>)> for ProductionOrderSummary {
    fn from((order, facility): (production_order::Model, Option<facility::Model>)) -> Self {
        Self { order, facility }
    }
}

/// A production order with its facility, inspections and metrics
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductionOrderDetails {
    #[serde(flatten)]
    pub order: production_order::Model,
    pub facility: Option<facility::Model>,
    pub quality_inspections: Vec<quality_inspection::Model>,
    pub production_metrics: Vec<production_metric::Model>,
}

/// Aggregates for one facility over a creation-date window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductionAnalytics {
    pub facility_id: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_orders: u64,
    pub completed_orders: u64,
    /// Orders whose actual end is after their scheduled end
    pub delayed_orders: u64,
    /// `(completed - delayed) / total * 100`; can be negative
    #[schema(value_type = String)]
    pub on_time_delivery_rate: Decimal,
    #[schema(value_type = String)]
    pub total_production_cost: Decimal,
    /// Mean efficiency over orders with both actual dates recorded
    #[schema(value_type = String)]
    pub average_efficiency: Decimal,
    /// Sum of actual cost minus sum of estimated cost
    #[schema(value_type = String)]
    pub cost_variance: Decimal,
    #[schema(value_type = BTreeMap<String, u64>)]
    pub orders_by_status: BTreeMap<ProductionStatus, u64>,
    #[schema(value_type = BTreeMap<String, String>)]
    pub efficiency_by_part_type: BTreeMap<String, Decimal>,
}

/// New slot assigned to an order by the rescheduler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScheduleSlot {
    pub order_id: i32,
    pub order_number: String,
    pub priority: Priority,
    pub scheduled_start_date: DateTime<Utc>,
    pub scheduled_end_date: DateTime<Utc>,
}

/// Builds `{code}-{yyyyMMdd}-{seq:03}`
pub fn format_order_number(facility_code: Option<&str>, date: DateTime<Utc>, sequence: u64) -> String {
    format!(
        "{}-{}-{:03}",
        facility_code.unwrap_or(FALLBACK_FACILITY_CODE),
        date.format("%Y%m%d"),
        sequence
    )
}

/// Applies the side effects of moving `order` into `status`.
///
/// Entering `InProgress` stamps the actual start once; entering `Completed`
/// stamps the actual end and marks the full quantity as produced.
pub fn apply_status_change(
    order: &mut production_order::Model,
    status: ProductionStatus,
    now: DateTime<Utc>,
) {
    order.status = status;
    match status {
        ProductionStatus::InProgress if order.actual_start_date.is_none() => {
            order.actual_start_date = Some(now);
        }
        ProductionStatus::Completed => {
            order.actual_end_date = Some(now);
            order.quantity_completed = order.quantity;
        }
        _ => {}
    }
}

/// Mean of time, quantity and cost performance, in percent.
///
/// Orders without both actual dates rate 0. Ratios are not clamped, so an
/// early, cheap order can exceed 100. The result is rounded to 2 dp for
/// presentation only; analytics averages are taken over these rounded values.
pub fn efficiency_rating(order: &production_order::Model) -> Result<Decimal, ServiceError> {
    let Some(actual) = order.actual_duration() else {
        return Ok(Decimal::ZERO);
    };

    let hundred = Decimal::ONE_HUNDRED;
    let actual_ms = actual.num_milliseconds();
    if actual_ms <= 0 {
        return Err(ServiceError::InvalidOperation(format!(
            "Production order {} has no measurable actual duration",
            order.id
        )));
    }
    if order.quantity <= 0 {
        return Err(ServiceError::InvalidOperation(format!(
            "Production order {} has no target quantity",
            order.id
        )));
    }

    let scheduled_ms = Decimal::from(order.scheduled_duration().num_milliseconds());
    let time = scheduled_ms / Decimal::from(actual_ms) * hundred;
    let quantity =
        Decimal::from(order.quantity_completed) / Decimal::from(order.quantity) * hundred;
    let cost = order.estimated_cost / order.actual_cost.max(Decimal::ONE) * hundred;

    Ok(((time + quantity + cost) / Decimal::from(3)).round_dp(2))
}

/// Aggregates already-filtered orders into [`ProductionAnalytics`].
pub fn summarize(
    facility_id: i32,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    orders: &[production_order::Model],
) -> ProductionAnalytics {
    let total_orders = orders.len() as u64;
    let completed_orders = orders.iter().filter(|o| o.is_completed()).count() as u64;
    let delayed_orders = orders.iter().filter(|o| o.finished_late()).count() as u64;

    let on_time_delivery_rate = if total_orders > 0 {
        (Decimal::from(completed_orders) - Decimal::from(delayed_orders))
            / Decimal::from(total_orders)
            * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    let total_production_cost: Decimal = orders.iter().map(|o| o.actual_cost).sum();
    let total_estimated_cost: Decimal = orders.iter().map(|o| o.estimated_cost).sum();

    let mut orders_by_status = BTreeMap::new();
    for order in orders {
        *orders_by_status.entry(order.status).or_insert(0u64) += 1;
    }

    let mut ratings: Vec<Decimal> = Vec::new();
    let mut by_part: BTreeMap<String, Vec<Decimal>> = BTreeMap::new();
    for order in orders.iter().filter(|o| o.actual_duration().is_some()) {
        match efficiency_rating(order) {
            Ok(rating) => {
                ratings.push(rating);
                by_part
                    .entry(order.part_number.clone())
                    .or_default()
                    .push(rating);
            }
            Err(e) => warn!(order_id = order.id, error = %e, "Skipping unrated order"),
        }
    }

    ProductionAnalytics {
        facility_id,
        start_date,
        end_date,
        total_orders,
        completed_orders,
        delayed_orders,
        on_time_delivery_rate: on_time_delivery_rate.round_dp(2),
        total_production_cost,
        average_efficiency: mean(&ratings),
        cost_variance: total_production_cost - total_estimated_cost,
        orders_by_status,
        efficiency_by_part_type: by_part
            .into_iter()
            .map(|(part, values)| (part, mean(&values)))
            .collect(),
    }
}

fn mean(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    let total: Decimal = values.iter().copied().sum();
    (total / Decimal::from(values.len())).round_dp(2)
}

/// Scheduling precedence: ascending priority code (Low first, Critical last),
/// then earlier planned start.
pub fn scheduling_order(a: &production_order::Model, b: &production_order::Model) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then(a.scheduled_start_date.cmp(&b.scheduled_start_date))
        .then(a.id.cmp(&b.id))
}

/// Packs `orders` back-to-back from `start`, in the given order.
///
/// Each order keeps its planned duration; consecutive orders are separated
/// by `gap`. Single resource, single pass.
pub fn pack_schedule(
    orders: &[production_order::Model],
    start: DateTime<Utc>,
    gap: Duration,
) -> Vec<ScheduleSlot> {
    let mut cursor = start;
    orders
        .iter()
        .map(|order| {
            let begin = cursor;
            let end = begin + order.scheduled_duration();
            cursor = end + gap;
            ScheduleSlot {
                order_id: order.id,
                order_number: order.order_number.clone(),
                priority: order.priority,
                scheduled_start_date: begin,
                scheduled_end_date: end,
            }
        })
        .collect()
}

/// Service for managing production orders
#[derive(Clone)]
pub struct ProductionOrderService {
    db_pool: Arc<DbPool>,
    critical_window: Duration,
    schedule_gap: Duration,
}

impl ProductionOrderService {
    pub fn new(db_pool: Arc<DbPool>, critical_window: Duration, schedule_gap: Duration) -> Self {
        Self {
            db_pool,
            critical_window,
            schedule_gap,
        }
    }

    /// All orders, newest first
    #[instrument(skip(self))]
    pub async fn get_all_orders(&self) -> Result<Vec<ProductionOrderSummary>, ServiceError> {
        let db = self.db_pool.as_ref();
        let orders = production_order::Entity::find()
            .find_also_related(facility::Entity)
            .order_by_desc(production_order::Column::CreatedDate)
            .order_by_desc(production_order::Column::Id)
            .all(db)
            .await
            .map_err(|e| {
                error!("Failed to list production orders: {}", e);
                ServiceError::db_error(e)
            })?;

        Ok(orders.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_order_by_id(
        &self,
        id: i32,
    ) -> Result<Option<ProductionOrderDetails>, ServiceError> {
        let db = self.db_pool.as_ref();
        let order = production_order::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(|e| {
                error!(order_id = id, "Failed to load production order: {}", e);
                ServiceError::db_error(e)
            })?;

        match order {
            Some(order) => Ok(Some(self.load_details(order).await?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_order_by_number(
        &self,
        order_number: &str,
    ) -> Result<Option<ProductionOrderDetails>, ServiceError> {
        let db = self.db_pool.as_ref();
        let order = production_order::Entity::find()
            .filter(production_order::Column::OrderNumber.eq(order_number))
            .one(db)
            .await
            .map_err(|e| {
                error!(order_number, "Failed to load production order: {}", e);
                ServiceError::db_error(e)
            })?;

        match order {
            Some(order) => Ok(Some(self.load_details(order).await?)),
            None => Ok(None),
        }
    }

    async fn load_details(
        &self,
        order: production_order::Model,
    ) -> Result<ProductionOrderDetails, ServiceError> {
        let db = self.db_pool.as_ref();
        let facility = order
            .find_related(facility::Entity)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?;
        let quality_inspections = order
            .find_related(quality_inspection::Entity)
            .order_by_asc(quality_inspection::Column::ScheduledDate)
            .all(db)
            .await
            .map_err(ServiceError::db_error)?;
        let production_metrics = order
            .find_related(production_metric::Entity)
            .order_by_asc(production_metric::Column::MeasuredDate)
            .all(db)
            .await
            .map_err(ServiceError::db_error)?;

        Ok(ProductionOrderDetails {
            order,
            facility,
            quality_inspections,
            production_metrics,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_orders_by_facility(
        &self,
        facility_id: i32,
    ) -> Result<Vec<ProductionOrderSummary>, ServiceError> {
        self.find_summaries(
            Condition::all().add(production_order::Column::FacilityId.eq(facility_id)),
            production_order::Column::ScheduledStartDate,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_orders_by_status(
        &self,
        status: ProductionStatus,
    ) -> Result<Vec<ProductionOrderSummary>, ServiceError> {
        self.find_summaries(
            Condition::all().add(production_order::Column::Status.eq(status)),
            production_order::Column::ScheduledStartDate,
        )
        .await
    }

    /// Orders whose whole scheduled window lies inside `[start, end]`
    #[instrument(skip(self))]
    pub async fn get_orders_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ProductionOrderSummary>, ServiceError> {
        ensure_ordered_range(start, end)?;
        self.find_summaries(
            Condition::all()
                .add(production_order::Column::ScheduledStartDate.gte(start))
                .add(production_order::Column::ScheduledEndDate.lte(end)),
            production_order::Column::ScheduledStartDate,
        )
        .await
    }

    /// Critical priority, or not completed and due within the critical window
    #[instrument(skip(self))]
    pub async fn get_critical_orders(&self) -> Result<Vec<ProductionOrderSummary>, ServiceError> {
        let horizon = Utc::now() + self.critical_window;
        self.find_summaries(
            Condition::any()
                .add(production_order::Column::Priority.eq(Priority::Critical))
                .add(
                    Condition::all()
                        .add(production_order::Column::Status.ne(ProductionStatus::Completed))
                        .add(production_order::Column::ScheduledEndDate.lte(horizon)),
                ),
            production_order::Column::ScheduledEndDate,
        )
        .await
    }

    /// Not completed and past the scheduled end
    #[instrument(skip(self))]
    pub async fn get_delayed_orders(&self) -> Result<Vec<ProductionOrderSummary>, ServiceError> {
        let now = Utc::now();
        self.find_summaries(
            Condition::all()
                .add(production_order::Column::Status.ne(ProductionStatus::Completed))
                .add(production_order::Column::ScheduledEndDate.lt(now)),
            production_order::Column::ScheduledEndDate,
        )
        .await
    }

    async fn find_summaries(
        &self,
        condition: Condition,
        order_by: production_order::Column,
    ) -> Result<Vec<ProductionOrderSummary>, ServiceError> {
        let db = self.db_pool.as_ref();
        let orders = production_order::Entity::find()
            .find_also_related(facility::Entity)
            .filter(condition)
            .order_by_asc(order_by)
            .order_by_asc(production_order::Column::Id)
            .all(db)
            .await
            .map_err(|e| {
                error!("Failed to query production orders: {}", e);
                ServiceError::db_error(e)
            })?;

        Ok(orders.into_iter().map(Into::into).collect())
    }

    /// Creates an order, generating its number when none is supplied
    #[instrument(skip(self, input), fields(facility_id = input.facility_id))]
    pub async fn create_order(
        &self,
        input: ProductionOrderInput,
    ) -> Result<production_order::Model, ServiceError> {
        input.validate()?;
        let db = self.db_pool.as_ref();
        let now = Utc::now();

        let order_number = match input.order_number.as_deref().map(str::trim) {
            Some(number) if !number.is_empty() => number.to_string(),
            _ => self.generate_order_number(input.facility_id, now).await?,
        };

        let active = production_order::ActiveModel {
            order_number: Set(order_number),
            part_number: Set(input.part_number),
            part_description: Set(input.part_description),
            quantity: Set(input.quantity),
            quantity_completed: Set(input.quantity_completed),
            status: Set(input.status),
            priority: Set(input.priority),
            scheduled_start_date: Set(input.scheduled_start_date),
            scheduled_end_date: Set(input.scheduled_end_date),
            actual_start_date: Set(input.actual_start_date),
            actual_end_date: Set(input.actual_end_date),
            facility_id: Set(input.facility_id),
            customer_name: Set(input.customer_name),
            customer_order_number: Set(input.customer_order_number),
            material_type: Set(input.material_type),
            estimated_cost: Set(input.estimated_cost),
            actual_cost: Set(input.actual_cost),
            created_date: Set(now),
            notes: Set(input.notes),
            ..Default::default()
        };

        let order = active.insert(db).await.map_err(|e| {
            error!("Failed to create production order: {}", e);
            ServiceError::db_error(e)
        })?;

        counter!("production_orders.created", 1);
        info!(
            order_id = order.id,
            order_number = %order.order_number,
            "Production order created"
        );
        Ok(order)
    }

    /// `{code}-{yyyyMMdd}-{count+1}`, probing forward if that number is taken
    async fn generate_order_number(
        &self,
        facility_id: i32,
        now: DateTime<Utc>,
    ) -> Result<String, ServiceError> {
        let db = self.db_pool.as_ref();
        let facility_code = facility::Entity::find_by_id(facility_id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
            .map(|f| f.code);

        let day_start = now.date_naive().and_time(NaiveTime::MIN).and_utc();
        let day_end = day_start + Duration::days(1);
        let todays_orders = production_order::Entity::find()
            .filter(production_order::Column::FacilityId.eq(facility_id))
            .filter(production_order::Column::CreatedDate.gte(day_start))
            .filter(production_order::Column::CreatedDate.lt(day_end))
            .count(db)
            .await
            .map_err(ServiceError::db_error)?;

        let mut sequence = todays_orders + 1;
        loop {
            let candidate = format_order_number(facility_code.as_deref(), now, sequence);
            let taken = production_order::Entity::find()
                .filter(production_order::Column::OrderNumber.eq(candidate.as_str()))
                .count(db)
                .await
                .map_err(ServiceError::db_error)?;
            if taken == 0 {
                return Ok(candidate);
            }
            sequence += 1;
        }
    }

    /// Replaces the mutable fields of an order. `None` when it does not exist.
    #[instrument(skip(self, input))]
    pub async fn update_order(
        &self,
        id: i32,
        input: ProductionOrderInput,
    ) -> Result<Option<production_order::Model>, ServiceError> {
        input.validate()?;
        let db = self.db_pool.as_ref();
        let Some(existing) = production_order::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
        else {
            return Ok(None);
        };

        let mut active: production_order::ActiveModel = existing.into();
        if let Some(number) = input
            .order_number
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
        {
            active.order_number = Set(number.to_string());
        }
        active.part_number = Set(input.part_number);
        active.part_description = Set(input.part_description);
        active.quantity = Set(input.quantity);
        active.quantity_completed = Set(input.quantity_completed);
        active.status = Set(input.status);
        active.priority = Set(input.priority);
        active.scheduled_start_date = Set(input.scheduled_start_date);
        active.scheduled_end_date = Set(input.scheduled_end_date);
        active.actual_start_date = Set(input.actual_start_date);
        active.actual_end_date = Set(input.actual_end_date);
        active.facility_id = Set(input.facility_id);
        active.customer_name = Set(input.customer_name);
        active.customer_order_number = Set(input.customer_order_number);
        active.material_type = Set(input.material_type);
        active.estimated_cost = Set(input.estimated_cost);
        active.actual_cost = Set(input.actual_cost);
        active.notes = Set(input.notes);

        let updated = active.update(db).await.map_err(|e| {
            error!(order_id = id, "Failed to update production order: {}", e);
            ServiceError::db_error(e)
        })?;

        info!(order_id = id, "Production order updated");
        Ok(Some(updated))
    }

    /// Hard delete; metrics cascade, inspections block. `false` when absent.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: i32) -> Result<bool, ServiceError> {
        let db = self.db_pool.as_ref();
        let result = production_order::Entity::delete_by_id(id)
            .exec(db)
            .await
            .map_err(|e| {
                error!(order_id = id, "Failed to delete production order: {}", e);
                ServiceError::db_error(e)
            })?;

        if result.rows_affected > 0 {
            info!(order_id = id, "Production order deleted");
        }
        Ok(result.rows_affected > 0)
    }

    /// Sets the status and its date side effects. `false` when absent.
    #[instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        id: i32,
        status: ProductionStatus,
    ) -> Result<bool, ServiceError> {
        let db = self.db_pool.as_ref();
        let Some(existing) = production_order::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
        else {
            return Ok(false);
        };

        let previous = existing.status;
        let mut changed = existing.clone();
        apply_status_change(&mut changed, status, Utc::now());

        let mut active: production_order::ActiveModel = existing.into();
        active.status = Set(changed.status);
        active.actual_start_date = Set(changed.actual_start_date);
        active.actual_end_date = Set(changed.actual_end_date);
        active.quantity_completed = Set(changed.quantity_completed);
        active.update(db).await.map_err(|e| {
            error!(order_id = id, "Failed to update production order status: {}", e);
            ServiceError::db_error(e)
        })?;

        counter!("production_orders.status_changed", 1);
        info!(order_id = id, from = %previous, to = %status, "Production order status changed");
        Ok(true)
    }

    /// Efficiency rating in percent; 0 for unknown or unfinished orders
    #[instrument(skip(self))]
    pub async fn calculate_efficiency_rating(&self, order_id: i32) -> Result<Decimal, ServiceError> {
        let db = self.db_pool.as_ref();
        let order = production_order::Entity::find_by_id(order_id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?;

        match order {
            Some(order) => efficiency_rating(&order),
            None => Ok(Decimal::ZERO),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_production_analytics(
        &self,
        facility_id: i32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<ProductionAnalytics, ServiceError> {
        ensure_ordered_range(start, end)?;
        let db = self.db_pool.as_ref();
        let orders = production_order::Entity::find()
            .filter(production_order::Column::FacilityId.eq(facility_id))
            .filter(production_order::Column::CreatedDate.gte(start))
            .filter(production_order::Column::CreatedDate.lte(end))
            .all(db)
            .await
            .map_err(|e| {
                error!(facility_id, "Failed to load orders for analytics: {}", e);
                ServiceError::db_error(e)
            })?;

        Ok(summarize(facility_id, start, end, &orders))
    }

    /// Repacks the facility's planned orders from now, highest priority first.
    ///
    /// All writes share one transaction. Concurrent runs for the same facility
    /// are not coordinated.
    #[instrument(skip(self))]
    pub async fn optimize_production_schedule(
        &self,
        facility_id: i32,
    ) -> Result<Vec<ScheduleSlot>, ServiceError> {
        let txn = self.db_pool.begin().await.map_err(ServiceError::db_error)?;

        let mut planned = production_order::Entity::find()
            .filter(production_order::Column::FacilityId.eq(facility_id))
            .filter(production_order::Column::Status.eq(ProductionStatus::Planned))
            .order_by_asc(production_order::Column::Priority)
            .order_by_asc(production_order::Column::ScheduledStartDate)
            .all(&txn)
            .await
            .map_err(ServiceError::db_error)?;
        planned.sort_by(scheduling_order);

        let slots = pack_schedule(&planned, Utc::now(), self.schedule_gap);
        for (order, slot) in planned.into_iter().zip(&slots) {
            let mut active: production_order::ActiveModel = order.into();
            active.scheduled_start_date = Set(slot.scheduled_start_date);
            active.scheduled_end_date = Set(slot.scheduled_end_date);
            active.update(&txn).await.map_err(|e| {
                error!(order_id = slot.order_id, "Failed to reschedule order: {}", e);
                ServiceError::db_error(e)
            })?;
        }

        txn.commit().await.map_err(ServiceError::db_error)?;

        counter!("production_orders.rescheduled", slots.len() as u64);
        info!(facility_id, rescheduled = slots.len(), "Production schedule optimized");
        Ok(slots)
    }
}

fn ensure_ordered_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), ServiceError> {
    if start > end {
        return Err(ServiceError::BadRequest(
            "Start date cannot be later than end date".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::production_order::MaterialType;
    use assert_matches::assert_matches;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn order(id: i32) -> production_order::Model {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        production_order::Model {
            id,
            order_number: format!("TST-{id:03}"),
            part_number: "TB-001".into(),
            part_description: None,
            quantity: 10,
            quantity_completed: 0,
            status: ProductionStatus::Planned,
            priority: Priority::Medium,
            scheduled_start_date: start,
            scheduled_end_date: start + Duration::days(5),
            actual_start_date: None,
            actual_end_date: None,
            facility_id: 1,
            customer_name: "Aero Corp".into(),
            customer_order_number: None,
            material_type: MaterialType::InconelAlloy,
            estimated_cost: dec!(50000),
            actual_cost: dec!(0),
            created_date: start,
            notes: None,
        }
    }

    fn finished(id: i32) -> production_order::Model {
        let mut o = order(id);
        o.status = ProductionStatus::Completed;
        o.quantity_completed = 10;
        o.actual_start_date = Some(o.scheduled_start_date);
        o.actual_end_date = Some(o.scheduled_start_date + Duration::days(4));
        o.actual_cost = dec!(48000);
        o
    }

    #[test]
    fn order_number_uses_code_date_and_padded_sequence() {
        let day = Utc.with_ymd_and_hms(2024, 1, 15, 13, 0, 0).unwrap();
        assert_eq!(format_order_number(Some("TST"), day, 1), "TST-20240115-001");
        assert_eq!(format_order_number(None, day, 42), "FAC-20240115-042");
        assert_eq!(format_order_number(Some("CST"), day, 1234), "CST-20240115-1234");
    }

    #[test]
    fn completing_stamps_end_and_fills_quantity() {
        let mut o = order(1);
        o.quantity_completed = 3;
        let now = Utc::now();

        apply_status_change(&mut o, ProductionStatus::Completed, now);

        assert_eq!(o.status, ProductionStatus::Completed);
        assert_eq!(o.actual_end_date, Some(now));
        assert_eq!(o.quantity_completed, o.quantity);
    }

    #[test]
    fn starting_keeps_an_existing_actual_start() {
        let earlier = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let mut o = order(1);
        o.actual_start_date = Some(earlier);

        apply_status_change(&mut o, ProductionStatus::InProgress, Utc::now());
        assert_eq!(o.actual_start_date, Some(earlier));

        let mut fresh = order(2);
        let now = Utc::now();
        apply_status_change(&mut fresh, ProductionStatus::InProgress, now);
        assert_eq!(fresh.actual_start_date, Some(now));
    }

    #[test]
    fn other_statuses_have_no_side_effects() {
        let mut o = order(1);
        apply_status_change(&mut o, ProductionStatus::OnHold, Utc::now());
        assert_eq!(o.status, ProductionStatus::OnHold);
        assert!(o.actual_start_date.is_none());
        assert!(o.actual_end_date.is_none());
        assert_eq!(o.quantity_completed, 0);
    }

    #[test]
    fn efficiency_matches_worked_example() {
        // time 125, quantity 100, cost 104.1666.. => 109.72
        let rating = efficiency_rating(&finished(1)).unwrap();
        assert_eq!(rating, dec!(109.72));
    }

    #[test]
    fn efficiency_is_zero_without_actual_dates() {
        let mut o = finished(1);
        o.actual_end_date = None;
        assert_eq!(efficiency_rating(&o).unwrap(), Decimal::ZERO);

        let mut o = finished(2);
        o.actual_start_date = None;
        assert_eq!(efficiency_rating(&o).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn efficiency_treats_small_actual_cost_as_one() {
        let mut o = finished(1);
        o.actual_cost = Decimal::ZERO;
        o.estimated_cost = dec!(1);
        // time 125, quantity 100, cost 100
        assert_eq!(efficiency_rating(&o).unwrap(), dec!(108.33));
    }

    #[test]
    fn efficiency_rejects_zero_actual_duration() {
        let mut o = finished(1);
        o.actual_end_date = o.actual_start_date;
        assert_matches!(efficiency_rating(&o), Err(ServiceError::InvalidOperation(_)));

        let mut empty = finished(2);
        empty.quantity = 0;
        assert_matches!(efficiency_rating(&empty), Err(ServiceError::InvalidOperation(_)));
    }

    #[test]
    fn analytics_counts_and_rates() {
        let mut late = finished(2);
        late.actual_end_date = Some(late.scheduled_end_date + Duration::days(1));
        let mut running = order(3);
        running.status = ProductionStatus::InProgress;
        running.actual_cost = dec!(1000);

        let orders = vec![finished(1), late, running];
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();
        let analytics = summarize(1, start, end, &orders);

        assert_eq!(analytics.total_orders, 3);
        assert_eq!(analytics.completed_orders, 2);
        assert_eq!(analytics.delayed_orders, 1);
        assert_eq!(analytics.on_time_delivery_rate, dec!(33.33));
        assert_eq!(analytics.total_production_cost, dec!(97000));
        assert_eq!(analytics.cost_variance, dec!(97000) - dec!(150000));
        assert_eq!(analytics.orders_by_status[&ProductionStatus::Completed], 2);
        assert_eq!(analytics.orders_by_status[&ProductionStatus::InProgress], 1);
        assert_eq!(analytics.efficiency_by_part_type.len(), 1);
        assert!(analytics.average_efficiency > Decimal::ZERO);
    }

    #[test]
    fn analytics_preserves_negative_on_time_rate() {
        let mut late = order(1);
        late.actual_end_date = Some(late.scheduled_end_date + Duration::hours(1));
        let analytics = summarize(1, Utc::now(), Utc::now(), &[late]);

        assert_eq!(analytics.completed_orders, 0);
        assert_eq!(analytics.delayed_orders, 1);
        assert_eq!(analytics.on_time_delivery_rate, dec!(-100));
    }

    #[test]
    fn analytics_of_nothing_is_zero() {
        let analytics = summarize(9, Utc::now(), Utc::now(), &[]);
        assert_eq!(analytics.total_orders, 0);
        assert_eq!(analytics.on_time_delivery_rate, Decimal::ZERO);
        assert_eq!(analytics.average_efficiency, Decimal::ZERO);
        assert!(analytics.orders_by_status.is_empty());
    }

    #[test]
    fn scheduling_runs_by_ascending_priority_code_then_earliest_start() {
        let mut low = order(1);
        low.priority = Priority::Low;
        low.scheduled_start_date += Duration::days(5);
        let mut critical_late = order(2);
        critical_late.priority = Priority::Critical;
        critical_late.scheduled_start_date += Duration::days(3);
        let mut critical_early = order(3);
        critical_early.priority = Priority::Critical;

        let mut orders = vec![critical_late, critical_early, low];
        orders.sort_by(scheduling_order);

        let ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }

    #[test]
    fn low_priority_is_packed_before_critical() {
        let critical = {
            let mut o = order(1);
            o.priority = Priority::Critical;
            o
        };
        let low = {
            let mut o = order(2);
            o.priority = Priority::Low;
            o.scheduled_start_date += Duration::days(5);
            o.scheduled_end_date += Duration::days(5);
            o
        };

        let mut orders = vec![critical, low];
        orders.sort_by(scheduling_order);

        let ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn packing_preserves_durations_and_inserts_gap() {
        let mut short = order(1);
        short.scheduled_end_date = short.scheduled_start_date + Duration::hours(6);
        let long = order(2);
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let slots = pack_schedule(&[short, long], now, Duration::hours(12));

        assert_eq!(slots[0].scheduled_start_date, now);
        assert_eq!(slots[0].scheduled_end_date, now + Duration::hours(6));
        assert_eq!(slots[1].scheduled_start_date, now + Duration::hours(18));
        assert_eq!(
            slots[1].scheduled_end_date,
            now + Duration::hours(18) + Duration::days(5)
        );
    }

    #[test]
    fn input_rejects_inverted_schedule() {
        let json = serde_json::json!({
            "part_number": "TB-001",
            "quantity": 5,
            "scheduled_start_date": "2024-03-10T00:00:00Z",
            "scheduled_end_date": "2024-03-01T00:00:00Z",
            "facility_id": 1,
            "customer_name": "Aero Corp",
            "material_type": "inconel_alloy"
        });
        let input: ProductionOrderInput = serde_json::from_value(json).unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn input_defaults_status_and_priority() {
        let json = serde_json::json!({
            "part_number": "TB-001",
            "quantity": 5,
            "scheduled_start_date": "2024-03-01T00:00:00Z",
            "scheduled_end_date": "2024-03-10T00:00:00Z",
            "facility_id": 1,
            "customer_name": "Aero Corp",
            "material_type": "titanium_alloy",
            "estimated_cost": "1200.50"
        });
        let input: ProductionOrderInput = serde_json::from_value(json).unwrap();
        assert!(input.validate().is_ok());
        assert_eq!(input.status, ProductionStatus::Planned);
        assert_eq!(input.priority, Priority::Medium);
        assert_eq!(input.estimated_cost, dec!(1200.50));
    }
}
