use super::common::{created_response, found, no_content_or_not_found, success_response};
use crate::{
    entities::equipment, errors::ServiceError, services::equipment::EquipmentInput, AppState,
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EquipmentFilter {
    /// Restrict to one facility
    pub facility_id: Option<i32>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MaintenanceDueParams {
    /// Cut-off date; defaults to now
    pub as_of: Option<DateTime<Utc>>,
}

#[utoipa::path(
    get,
    path = "/api/equipment",
    params(EquipmentFilter),
    responses((status = 200, description = "Equipment by number", body = [equipment::Model])),
    tag = "equipment"
)]
pub async fn list_equipment(
    State(state): State<AppState>,
    filter: Result<Query<EquipmentFilter>, QueryRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Query(filter) = filter?;
    let equipment = state
        .services
        .equipment
        .list_equipment(filter.facility_id)
        .await?;
    Ok(success_response(equipment))
}

#[utoipa::path(
    get,
    path = "/api/equipment/maintenance-due",
    params(MaintenanceDueParams),
    responses((status = 200, description = "Active equipment due for maintenance, soonest first", body = [equipment::Model])),
    tag = "equipment"
)]
pub async fn list_maintenance_due(
    State(state): State<AppState>,
    params: Result<Query<MaintenanceDueParams>, QueryRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Query(params) = params?;
    let as_of = params.as_of.unwrap_or_else(Utc::now);
    let equipment = state.services.equipment.get_maintenance_due(as_of).await?;
    Ok(success_response(equipment))
}

#[utoipa::path(
    get,
    path = "/api/equipment/{id}",
    params(("id" = i32, Path, description = "Equipment id")),
    responses(
        (status = 200, description = "Equipment", body = equipment::Model),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "equipment"
)]
pub async fn get_equipment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let equipment = state.services.equipment.get_equipment(id).await?;
    Ok(success_response(found(equipment, "Equipment", id)?))
}

#[utoipa::path(
    post,
    path = "/api/equipment",
    request_body = EquipmentInput,
    responses(
        (status = 201, description = "Equipment created", body = equipment::Model),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 409, description = "Duplicate number or unknown facility", body = crate::errors::ErrorResponse)
    ),
    tag = "equipment"
)]
pub async fn create_equipment(
    State(state): State<AppState>,
    payload: Result<Json<EquipmentInput>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Json(payload) = payload?;
    let equipment = state.services.equipment.create_equipment(payload).await?;
    Ok(created_response(equipment))
}

#[utoipa::path(
    put,
    path = "/api/equipment/{id}",
    params(("id" = i32, Path, description = "Equipment id")),
    request_body = EquipmentInput,
    responses(
        (status = 200, description = "Equipment updated", body = equipment::Model),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "equipment"
)]
pub async fn update_equipment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<EquipmentInput>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Json(payload) = payload?;
    let equipment = state.services.equipment.update_equipment(id, payload).await?;
    Ok(success_response(found(equipment, "Equipment", id)?))
}

#[utoipa::path(
    delete,
    path = "/api/equipment/{id}",
    params(("id" = i32, Path, description = "Equipment id")),
    responses(
        (status = 204, description = "Equipment deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "equipment"
)]
pub async fn delete_equipment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let deleted = state.services.equipment.delete_equipment(id).await?;
    no_content_or_not_found(deleted, "Equipment", id)
}

pub fn equipment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_equipment).post(create_equipment))
        .route("/maintenance-due", get(list_maintenance_due))
        .route(
            "/:id",
            get(get_equipment).put(update_equipment).delete(delete_equipment),
        )
}
