use super::common::{created_response, found, no_content_or_not_found, success_response};
use crate::{entities::facility, errors::ServiceError, services::facilities::FacilityInput, AppState};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

#[utoipa::path(
    get,
    path = "/api/facilities",
    responses((status = 200, description = "All facilities by name", body = [facility::Model])),
    tag = "facilities"
)]
pub async fn list_facilities(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let facilities = state.services.facilities.list_facilities().await?;
    Ok(success_response(facilities))
}

#[utoipa::path(
    get,
    path = "/api/facilities/{id}",
    params(("id" = i32, Path, description = "Facility id")),
    responses(
        (status = 200, description = "Facility", body = facility::Model),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "facilities"
)]
pub async fn get_facility(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let facility = state.services.facilities.get_facility(id).await?;
    Ok(success_response(found(facility, "Facility", id)?))
}

#[utoipa::path(
    get,
    path = "/api/facilities/by-code/{code}",
    params(("code" = String, Path, description = "Facility code")),
    responses(
        (status = 200, description = "Facility", body = facility::Model),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "facilities"
)]
pub async fn get_facility_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let facility = state.services.facilities.get_facility_by_code(&code).await?;
    Ok(success_response(found(facility, "Facility", &code)?))
}

#[utoipa::path(
    post,
    path = "/api/facilities",
    request_body = FacilityInput,
    responses(
        (status = 201, description = "Facility created", body = facility::Model),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 409, description = "Code already in use", body = crate::errors::ErrorResponse)
    ),
    tag = "facilities"
)]
pub async fn create_facility(
    State(state): State<AppState>,
    payload: Result<Json<FacilityInput>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Json(payload) = payload?;
    let facility = state.services.facilities.create_facility(payload).await?;
    Ok(created_response(facility))
}

#[utoipa::path(
    put,
    path = "/api/facilities/{id}",
    params(("id" = i32, Path, description = "Facility id")),
    request_body = FacilityInput,
    responses(
        (status = 200, description = "Facility updated", body = facility::Model),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Code already in use", body = crate::errors::ErrorResponse)
    ),
    tag = "facilities"
)]
pub async fn update_facility(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<FacilityInput>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Json(payload) = payload?;
    let facility = state.services.facilities.update_facility(id, payload).await?;
    Ok(success_response(found(facility, "Facility", id)?))
}

#[utoipa::path(
    delete,
    path = "/api/facilities/{id}",
    params(("id" = i32, Path, description = "Facility id")),
    responses(
        (status = 204, description = "Facility deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Facility still referenced", body = crate::errors::ErrorResponse)
    ),
    tag = "facilities"
)]
pub async fn delete_facility(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let deleted = state.services.facilities.delete_facility(id).await?;
    no_content_or_not_found(deleted, "Facility", id)
}

pub fn facility_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_facilities).post(create_facility))
        .route("/by-code/:code", get(get_facility_by_code))
        .route(
            "/:id",
            get(get_facility).put(update_facility).delete(delete_facility),
        )
}
