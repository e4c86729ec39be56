use super::common::{created_response, found, no_content_or_not_found, success_response};
use crate::{
    entities::{quality_document, quality_inspection},
    errors::ServiceError,
    services::quality::{ApprovalInput, DocumentInput, InspectionInput, InspectionWithDocuments},
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use validator::Validate;

#[utoipa::path(
    get,
    path = "/api/qualityinspections/order/{orderId}",
    params(("orderId" = i32, Path, description = "Production order id")),
    responses((status = 200, description = "Inspections of the order by scheduled date", body = [quality_inspection::Model])),
    tag = "quality"
)]
pub async fn list_inspections_for_order(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let inspections = state
        .services
        .quality
        .get_inspections_by_order(order_id)
        .await?;
    Ok(success_response(inspections))
}

#[utoipa::path(
    get,
    path = "/api/qualityinspections/{id}",
    params(("id" = i32, Path, description = "Inspection id")),
    responses(
        (status = 200, description = "Inspection with documents", body = InspectionWithDocuments),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "quality"
)]
pub async fn get_inspection(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let inspection = state.services.quality.get_inspection(id).await?;
    Ok(success_response(found(inspection, "Quality inspection", id)?))
}

#[utoipa::path(
    post,
    path = "/api/qualityinspections",
    request_body = InspectionInput,
    responses(
        (status = 201, description = "Inspection created", body = quality_inspection::Model),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 409, description = "Duplicate number or unknown order/facility", body = crate::errors::ErrorResponse)
    ),
    tag = "quality"
)]
pub async fn create_inspection(
    State(state): State<AppState>,
    payload: Result<Json<InspectionInput>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Json(payload) = payload?;
    let inspection = state.services.quality.create_inspection(payload).await?;
    Ok(created_response(inspection))
}

#[utoipa::path(
    put,
    path = "/api/qualityinspections/{id}",
    params(("id" = i32, Path, description = "Inspection id")),
    request_body = InspectionInput,
    responses(
        (status = 200, description = "Inspection updated", body = quality_inspection::Model),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "quality"
)]
pub async fn update_inspection(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<InspectionInput>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Json(payload) = payload?;
    let inspection = state.services.quality.update_inspection(id, payload).await?;
    Ok(success_response(found(inspection, "Quality inspection", id)?))
}

#[utoipa::path(
    delete,
    path = "/api/qualityinspections/{id}",
    params(("id" = i32, Path, description = "Inspection id")),
    responses(
        (status = 204, description = "Inspection and its documents deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "quality"
)]
pub async fn delete_inspection(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let deleted = state.services.quality.delete_inspection(id).await?;
    no_content_or_not_found(deleted, "Quality inspection", id)
}

#[utoipa::path(
    get,
    path = "/api/qualityinspections/{id}/documents",
    params(("id" = i32, Path, description = "Inspection id")),
    responses((status = 200, description = "Documents of the inspection", body = [quality_document::Model])),
    tag = "quality"
)]
pub async fn list_documents(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let documents = state.services.quality.get_documents(id).await?;
    Ok(success_response(documents))
}

#[utoipa::path(
    post,
    path = "/api/qualityinspections/{id}/documents",
    params(("id" = i32, Path, description = "Inspection id")),
    request_body = DocumentInput,
    responses(
        (status = 201, description = "Document attached", body = quality_document::Model),
        (status = 404, description = "Inspection not found", body = crate::errors::ErrorResponse)
    ),
    tag = "quality"
)]
pub async fn add_document(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<DocumentInput>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Json(payload) = payload?;
    let document = state.services.quality.add_document(id, payload).await?;
    Ok(created_response(found(document, "Quality inspection", id)?))
}

#[utoipa::path(
    post,
    path = "/api/qualitydocuments/{id}/approve",
    params(("id" = i32, Path, description = "Document id")),
    request_body = ApprovalInput,
    responses(
        (status = 200, description = "Document approved", body = quality_document::Model),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "quality"
)]
pub async fn approve_document(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<ApprovalInput>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Json(payload) = payload?;
    payload.validate()?;
    let document = state
        .services
        .quality
        .approve_document(id, &payload.approved_by)
        .await?;
    Ok(success_response(found(document, "Quality document", id)?))
}

#[utoipa::path(
    delete,
    path = "/api/qualitydocuments/{id}",
    params(("id" = i32, Path, description = "Document id")),
    responses(
        (status = 204, description = "Document deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "quality"
)]
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let deleted = state.services.quality.delete_document(id).await?;
    no_content_or_not_found(deleted, "Quality document", id)
}

pub fn inspection_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_inspection))
        .route("/order/:order_id", get(list_inspections_for_order))
        .route(
            "/:id",
            get(get_inspection)
                .put(update_inspection)
                .delete(delete_inspection),
        )
        .route("/:id/documents", get(list_documents).post(add_document))
}

pub fn document_routes() -> Router<AppState> {
    Router::new()
        .route("/:id", delete(delete_document))
        .route("/:id/approve", post(approve_document))
}
