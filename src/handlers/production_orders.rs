use super::common::{
    created_response, found, no_content_or_not_found, success_response,
};
use crate::{
    entities::{production_metric, production_order::ProductionStatus},
    errors::ServiceError,
    services::{
        production_metrics::MetricInput,
        production_orders::{
            ProductionAnalytics, ProductionOrderDetails, ProductionOrderInput,
            ProductionOrderSummary, ScheduleSlot,
        },
    },
    AppState,
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

/// Inclusive `[startDate, endDate]` window
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DateRangeParams {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AnalyticsParams {
    pub facility_id: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Body of `PATCH /{id}/status`: `{"status": "completed"}`, `"completed"` or `5`
#[derive(Debug, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum StatusUpdate {
    Wrapped { status: StatusValue },
    Bare(StatusValue),
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum StatusValue {
    Named(ProductionStatus),
    Code(i32),
}

impl StatusValue {
    fn resolve(self) -> Result<ProductionStatus, ServiceError> {
        match self {
            StatusValue::Named(status) => Ok(status),
            StatusValue::Code(code) => status_from_code(code),
        }
    }
}

impl StatusUpdate {
    fn into_status(self) -> Result<ProductionStatus, ServiceError> {
        match self {
            StatusUpdate::Wrapped { status } | StatusUpdate::Bare(status) => status.resolve(),
        }
    }
}

fn status_from_code(code: i32) -> Result<ProductionStatus, ServiceError> {
    ProductionStatus::try_from_value(&code)
        .map_err(|_| ServiceError::BadRequest(format!("Unknown production status {code}")))
}

/// Accepts the snake_case name (`in_progress`) or the numeric code (`3`)
pub fn parse_status(raw: &str) -> Result<ProductionStatus, ServiceError> {
    if let Ok(status) = ProductionStatus::from_str(raw) {
        return Ok(status);
    }
    match raw.parse::<i32>() {
        Ok(code) => status_from_code(code),
        Err(_) => Err(ServiceError::BadRequest(format!(
            "Unknown production status '{raw}'"
        ))),
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EfficiencyResponse {
    pub order_id: i32,
    #[schema(value_type = String, example = "109.72")]
    pub efficiency_rating: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OptimizeScheduleResponse {
    pub message: String,
    pub facility_id: i32,
    pub schedule: Vec<ScheduleSlot>,
}

#[utoipa::path(
    get,
    path = "/api/productionorders",
    responses(
        (status = 200, description = "All production orders, newest first", body = [ProductionOrderSummary])
    ),
    tag = "production-orders"
)]
pub async fn list_orders(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let orders = state.services.production_orders.get_all_orders().await?;
    Ok(success_response(orders))
}

#[utoipa::path(
    get,
    path = "/api/productionorders/{id}",
    params(("id" = i32, Path, description = "Production order id")),
    responses(
        (status = 200, description = "Order with facility, inspections and metrics", body = ProductionOrderDetails),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "production-orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state.services.production_orders.get_order_by_id(id).await?;
    Ok(success_response(found(order, "Production order", id)?))
}

#[utoipa::path(
    get,
    path = "/api/productionorders/by-number/{orderNumber}",
    params(("orderNumber" = String, Path, description = "Order number, e.g. TST-20240115-001")),
    responses(
        (status = 200, description = "Order with facility, inspections and metrics", body = ProductionOrderDetails),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "production-orders"
)]
pub async fn get_order_by_number(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state
        .services
        .production_orders
        .get_order_by_number(&order_number)
        .await?;
    Ok(success_response(found(order, "Production order", &order_number)?))
}

#[utoipa::path(
    get,
    path = "/api/productionorders/facility/{facilityId}",
    params(("facilityId" = i32, Path, description = "Facility id")),
    responses(
        (status = 200, description = "Orders of the facility by scheduled start", body = [ProductionOrderSummary])
    ),
    tag = "production-orders"
)]
pub async fn list_orders_by_facility(
    State(state): State<AppState>,
    Path(facility_id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let orders = state
        .services
        .production_orders
        .get_orders_by_facility(facility_id)
        .await?;
    Ok(success_response(orders))
}

#[utoipa::path(
    get,
    path = "/api/productionorders/status/{status}",
    params(("status" = String, Path, description = "Status name (in_progress) or numeric code (3)")),
    responses(
        (status = 200, description = "Orders in the status by scheduled start", body = [ProductionOrderSummary]),
        (status = 400, description = "Unknown status", body = crate::errors::ErrorResponse)
    ),
    tag = "production-orders"
)]
pub async fn list_orders_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let status = parse_status(&status)?;
    let orders = state
        .services
        .production_orders
        .get_orders_by_status(status)
        .await?;
    Ok(success_response(orders))
}

#[utoipa::path(
    get,
    path = "/api/productionorders/date-range",
    params(DateRangeParams),
    responses(
        (status = 200, description = "Orders scheduled entirely inside the window", body = [ProductionOrderSummary]),
        (status = 400, description = "Missing dates or start after end", body = crate::errors::ErrorResponse)
    ),
    tag = "production-orders"
)]
pub async fn list_orders_by_date_range(
    State(state): State<AppState>,
    params: Result<Query<DateRangeParams>, QueryRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Query(params) = params?;
    let orders = state
        .services
        .production_orders
        .get_orders_by_date_range(params.start_date, params.end_date)
        .await?;
    Ok(success_response(orders))
}

#[utoipa::path(
    post,
    path = "/api/productionorders",
    request_body = ProductionOrderInput,
    responses(
        (status = 201, description = "Order created", body = crate::entities::production_order::Model),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 409, description = "Duplicate order number or unknown facility", body = crate::errors::ErrorResponse)
    ),
    tag = "production-orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<ProductionOrderInput>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Json(payload) = payload?;
    let order = state.services.production_orders.create_order(payload).await?;
    Ok(created_response(order))
}

#[utoipa::path(
    put,
    path = "/api/productionorders/{id}",
    params(("id" = i32, Path, description = "Production order id")),
    request_body = ProductionOrderInput,
    responses(
        (status = 200, description = "Order updated", body = crate::entities::production_order::Model),
        (status = 400, description = "Invalid request or id mismatch", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "production-orders"
)]
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<ProductionOrderInput>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Json(payload) = payload?;
    if let Some(body_id) = payload.id {
        if body_id != id {
            return Err(ServiceError::BadRequest(format!(
                "Body id {body_id} does not match path id {id}"
            )));
        }
    }
    let order = state
        .services
        .production_orders
        .update_order(id, payload)
        .await?;
    Ok(success_response(found(order, "Production order", id)?))
}

#[utoipa::path(
    delete,
    path = "/api/productionorders/{id}",
    params(("id" = i32, Path, description = "Production order id")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Order still has inspections", body = crate::errors::ErrorResponse)
    ),
    tag = "production-orders"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let deleted = state.services.production_orders.delete_order(id).await?;
    no_content_or_not_found(deleted, "Production order", id)
}

#[utoipa::path(
    patch,
    path = "/api/productionorders/{id}/status",
    params(("id" = i32, Path, description = "Production order id")),
    request_body = StatusUpdate,
    responses(
        (status = 204, description = "Status changed"),
        (status = 400, description = "Unknown status", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "production-orders"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<StatusUpdate>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Json(payload) = payload?;
    let status = payload.into_status()?;
    let updated = state
        .services
        .production_orders
        .update_order_status(id, status)
        .await?;
    no_content_or_not_found(updated, "Production order", id)
}

#[utoipa::path(
    get,
    path = "/api/productionorders/{id}/efficiency",
    params(("id" = i32, Path, description = "Production order id")),
    responses(
        (status = 200, description = "Efficiency rating in percent, 0 when unknown", body = EfficiencyResponse),
        (status = 400, description = "Order cannot be rated", body = crate::errors::ErrorResponse)
    ),
    tag = "production-orders"
)]
pub async fn get_efficiency(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let efficiency_rating = state
        .services
        .production_orders
        .calculate_efficiency_rating(id)
        .await?;
    Ok(success_response(EfficiencyResponse {
        order_id: id,
        efficiency_rating,
    }))
}

#[utoipa::path(
    get,
    path = "/api/productionorders/analytics",
    params(AnalyticsParams),
    responses(
        (status = 200, description = "Facility analytics over the creation window", body = ProductionAnalytics),
        (status = 400, description = "Missing parameters or start after end", body = crate::errors::ErrorResponse)
    ),
    tag = "production-orders"
)]
pub async fn get_analytics(
    State(state): State<AppState>,
    params: Result<Query<AnalyticsParams>, QueryRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Query(params) = params?;
    let analytics = state
        .services
        .production_orders
        .get_production_analytics(params.facility_id, params.start_date, params.end_date)
        .await?;
    Ok(success_response(analytics))
}

#[utoipa::path(
    get,
    path = "/api/productionorders/critical",
    responses(
        (status = 200, description = "Critical or soon-due orders by scheduled end", body = [ProductionOrderSummary])
    ),
    tag = "production-orders"
)]
pub async fn list_critical_orders(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let orders = state.services.production_orders.get_critical_orders().await?;
    Ok(success_response(orders))
}

#[utoipa::path(
    get,
    path = "/api/productionorders/delayed",
    responses(
        (status = 200, description = "Unfinished orders past their scheduled end", body = [ProductionOrderSummary])
    ),
    tag = "production-orders"
)]
pub async fn list_delayed_orders(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let orders = state.services.production_orders.get_delayed_orders().await?;
    Ok(success_response(orders))
}

#[utoipa::path(
    post,
    path = "/api/productionorders/facility/{facilityId}/optimize-schedule",
    params(("facilityId" = i32, Path, description = "Facility id")),
    responses(
        (status = 200, description = "Planned orders repacked", body = OptimizeScheduleResponse)
    ),
    tag = "production-orders"
)]
pub async fn optimize_schedule(
    State(state): State<AppState>,
    Path(facility_id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let schedule = state
        .services
        .production_orders
        .optimize_production_schedule(facility_id)
        .await?;
    info!(facility_id, orders = schedule.len(), "Schedule optimization requested");
    Ok(success_response(OptimizeScheduleResponse {
        message: "Production schedule optimized successfully".to_string(),
        facility_id,
        schedule,
    }))
}

#[utoipa::path(
    get,
    path = "/api/productionorders/{id}/metrics",
    params(("id" = i32, Path, description = "Production order id")),
    responses(
        (status = 200, description = "Metrics recorded for the order", body = [production_metric::Model])
    ),
    tag = "production-metrics"
)]
pub async fn list_order_metrics(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let metrics = state
        .services
        .production_metrics
        .get_metrics_for_order(id)
        .await?;
    Ok(success_response(metrics))
}

#[utoipa::path(
    post,
    path = "/api/productionorders/{id}/metrics",
    params(("id" = i32, Path, description = "Production order id")),
    request_body = MetricInput,
    responses(
        (status = 201, description = "Metric recorded", body = production_metric::Model),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "production-metrics"
)]
pub async fn record_order_metric(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<MetricInput>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Json(payload) = payload?;
    let metric = state
        .services
        .production_metrics
        .record_metric(id, payload)
        .await?;
    Ok(created_response(found(metric, "Production order", id)?))
}

/// Static segments are registered before `/:id` so they never parse as ids
pub fn production_order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/critical", get(list_critical_orders))
        .route("/delayed", get(list_delayed_orders))
        .route("/analytics", get(get_analytics))
        .route("/date-range", get(list_orders_by_date_range))
        .route("/by-number/:order_number", get(get_order_by_number))
        .route("/status/:status", get(list_orders_by_status))
        .route("/facility/:facility_id", get(list_orders_by_facility))
        .route(
            "/facility/:facility_id/optimize-schedule",
            post(optimize_schedule),
        )
        .route("/:id", get(get_order).put(update_order).delete(delete_order))
        .route("/:id/status", patch(update_order_status))
        .route("/:id/efficiency", get(get_efficiency))
        .route("/:id/metrics", get(list_order_metrics).post(record_order_metric))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use rstest::rstest;

    #[rstest]
    #[case("in_progress", ProductionStatus::InProgress)]
    #[case("planned", ProductionStatus::Planned)]
    #[case("5", ProductionStatus::Completed)]
    #[case("7", ProductionStatus::Shipped)]
    fn status_parses_from_name_or_code(#[case] raw: &str, #[case] expected: ProductionStatus) {
        assert_eq!(parse_status(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("bogus")]
    #[case("99")]
    #[case("")]
    fn unknown_status_is_a_bad_request(#[case] raw: &str) {
        assert_eq!(
            parse_status(raw).unwrap_err().status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn status_body_accepts_object_string_or_number() {
        let wrapped: StatusUpdate = serde_json::from_str(r#"{"status":"completed"}"#).unwrap();
        assert_eq!(wrapped.into_status().unwrap(), ProductionStatus::Completed);

        let bare: StatusUpdate = serde_json::from_str(r#""on_hold""#).unwrap();
        assert_eq!(bare.into_status().unwrap(), ProductionStatus::OnHold);

        let code: StatusUpdate = serde_json::from_str("3").unwrap();
        assert_eq!(code.into_status().unwrap(), ProductionStatus::InProgress);

        let wrapped_code: StatusUpdate = serde_json::from_str(r#"{"status":7}"#).unwrap();
        assert_eq!(wrapped_code.into_status().unwrap(), ProductionStatus::Shipped);
    }
}
