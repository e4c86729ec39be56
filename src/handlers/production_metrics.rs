use super::common::no_content_or_not_found;
use crate::{errors::ServiceError, AppState};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::delete,
    Router,
};

#[utoipa::path(
    delete,
    path = "/api/productionmetrics/{id}",
    params(("id" = i32, Path, description = "Metric id")),
    responses(
        (status = 204, description = "Metric deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "production-metrics"
)]
pub async fn delete_metric(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let deleted = state.services.production_metrics.delete_metric(id).await?;
    no_content_or_not_found(deleted, "Production metric", id)
}

/// Listing and recording live under `/api/productionorders/{id}/metrics`
pub fn production_metric_routes() -> Router<AppState> {
    Router::new().route("/:id", delete(delete_metric))
}
