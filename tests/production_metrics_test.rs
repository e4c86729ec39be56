mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{OrderSeed, TestApp};

#[tokio::test]
async fn metrics_are_recorded_with_derived_tolerance() {
    let app = TestApp::new().await;
    let facility = app.seed_facility("TST").await;
    let order = app.seed_order(OrderSeed::new("TST-001", facility.id)).await;
    let uri = format!("/api/productionorders/{}/metrics", order.id);

    let inside = app
        .json(
            Method::POST,
            &uri,
            Some(json!({
                "type": "cycle_time",
                "metric_name": "Shell build cycle",
                "value": "46.5",
                "unit": "h",
                "min_value": "40",
                "max_value": "50"
            })),
            StatusCode::CREATED,
        )
        .await;
    assert_eq!(inside["is_within_tolerance"], true);

    let outside = app
        .json(
            Method::POST,
            &uri,
            Some(json!({
                "type": "scrap_rate",
                "metric_name": "Casting scrap",
                "value": "4.2",
                "max_value": "3"
            })),
            StatusCode::CREATED,
        )
        .await;
    assert_eq!(outside["is_within_tolerance"], false);

    let overridden = app
        .json(
            Method::POST,
            &uri,
            Some(json!({
                "type": "scrap_rate",
                "metric_name": "Casting scrap (waived)",
                "value": "4.2",
                "max_value": "3",
                "is_within_tolerance": true
            })),
            StatusCode::CREATED,
        )
        .await;
    assert_eq!(overridden["is_within_tolerance"], true);

    let listed = app.json(Method::GET, &uri, None, StatusCode::OK).await;
    assert_eq!(listed.as_array().unwrap().len(), 3);

    app.json(
        Method::DELETE,
        &format!("/api/productionmetrics/{}", outside["id"]),
        None,
        StatusCode::NO_CONTENT,
    )
    .await;
    app.json(
        Method::DELETE,
        &format!("/api/productionmetrics/{}", outside["id"]),
        None,
        StatusCode::NOT_FOUND,
    )
    .await;
    let listed = app.json(Method::GET, &uri, None, StatusCode::OK).await;
    assert_eq!(listed.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn metrics_need_an_existing_order() {
    let app = TestApp::new().await;
    app.json(
        Method::POST,
        "/api/productionorders/9999/metrics",
        Some(json!({"type": "cycle_time", "metric_name": "Cycle", "value": "1"})),
        StatusCode::NOT_FOUND,
    )
    .await;
}

#[tokio::test]
async fn deleting_an_order_removes_its_metrics() {
    let app = TestApp::new().await;
    let facility = app.seed_facility("TST").await;
    let order = app.seed_order(OrderSeed::new("TST-001", facility.id)).await;
    let uri = format!("/api/productionorders/{}/metrics", order.id);
    app.json(
        Method::POST,
        &uri,
        Some(json!({"type": "yield_rate", "metric_name": "Yield", "value": "97.5"})),
        StatusCode::CREATED,
    )
    .await;

    app.json(Method::DELETE, &format!("/api/productionorders/{}", order.id), None, StatusCode::NO_CONTENT)
        .await;
    let listed = app.json(Method::GET, &uri, None, StatusCode::OK).await;
    assert_eq!(listed, json!([]));
}
