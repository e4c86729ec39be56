use crate::errors::ServiceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Standard created response
pub fn created_response<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

/// Standard no content response
pub fn no_content_response() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// Turns an absent row into a `NotFound` naming the entity and id
pub fn found<T>(value: Option<T>, entity: &str, id: impl std::fmt::Display) -> Result<T, ServiceError> {
    value.ok_or_else(|| ServiceError::NotFound(format!("{entity} {id} not found")))
}

/// `204` when something was removed or changed, `404` otherwise
pub fn no_content_or_not_found(
    affected: bool,
    entity: &str,
    id: impl std::fmt::Display,
) -> Result<Response, ServiceError> {
    if affected {
        Ok(no_content_response())
    } else {
        Err(ServiceError::NotFound(format!("{entity} {id} not found")))
    }
}
