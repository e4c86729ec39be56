mod common;

use axum::{
    body::{self, Body},
    http::{Method, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use common::TestApp;

#[tokio::test]
async fn health_reports_database_up() {
    let app = TestApp::new().await;
    let health = app.json(Method::GET, "/health", None, StatusCode::OK).await;
    assert_eq!(health["status"], "up");
    assert_eq!(health["database"]["status"], "up");
    assert_eq!(health["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn every_response_carries_a_request_id() {
    let app = TestApp::new().await;
    let response = app.request(Method::GET, "/api/facilities", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn error_bodies_echo_the_caller_request_id() {
    let app = TestApp::new().await;
    let router = precision_oms::app(app.state.clone()).unwrap();
    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/productionorders/404")
                .header("x-request-id", "trace-me-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()["x-request-id"], "trace-me-123");
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["request_id"], "trace-me-123");
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["message"], "Not found: Production order 404 not found");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new().await;
    let doc = app
        .json(Method::GET, "/api-docs/openapi.json", None, StatusCode::OK)
        .await;
    assert_eq!(doc["info"]["title"], "Precision OMS API");
    assert!(doc["paths"]["/api/productionorders/critical"].is_object());
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = TestApp::new().await;
    let router = precision_oms::app(app.state.clone()).unwrap();
    let response = router
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/facilities")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
