mod common;

use axum::http::{Method, StatusCode};
use rust_decimal_macros::dec;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{json, Value};

use common::{decimal, OrderSeed, TestApp};
use precision_oms::entities::quality_document;

fn inspection_payload(number: &str, order_id: i32, facility_id: i32) -> Value {
    json!({
        "inspection_number": number,
        "production_order_id": order_id,
        "facility_id": facility_id,
        "type": "dimensional",
        "scheduled_date": "2030-01-06T08:00:00Z",
        "inspector_name": "J. Alvarez",
        "dimension_tolerance": "0.0050",
        "measured_dimension": "0.0031",
        "measurement_unit": "in"
    })
}

fn document_payload() -> Value {
    json!({
        "document_name": "Dimensional report",
        "type": "inspection_report",
        "file_path": "/docs/qi-001.pdf",
        "file_extension": "pdf",
        "file_size": 48213,
        "created_by": "J. Alvarez"
    })
}

#[tokio::test]
async fn inspection_lifecycle_with_documents() {
    let app = TestApp::new().await;
    let facility = app.seed_facility("TST").await;
    let order = app.seed_order(OrderSeed::new("TST-001", facility.id)).await;

    let inspection = app
        .json(
            Method::POST,
            "/api/qualityinspections",
            Some(inspection_payload("QI-001", order.id, facility.id)),
            StatusCode::CREATED,
        )
        .await;
    let id = inspection["id"].as_i64().unwrap();
    assert_eq!(inspection["status"], "pending");
    assert_eq!(inspection["type"], "dimensional");
    assert_eq!(decimal(&inspection["measured_dimension"]).round_dp(4), dec!(0.0031));

    let for_order = app
        .json(Method::GET, &format!("/api/qualityinspections/order/{}", order.id), None, StatusCode::OK)
        .await;
    assert_eq!(for_order.as_array().unwrap().len(), 1);

    let document = app
        .json(
            Method::POST,
            &format!("/api/qualityinspections/{id}/documents"),
            Some(document_payload()),
            StatusCode::CREATED,
        )
        .await;
    assert_eq!(document["is_approved"], false);
    assert_eq!(document["version"], "1.0");

    let approved = app
        .json(
            Method::POST,
            &format!("/api/qualitydocuments/{}/approve", document["id"]),
            Some(json!({"approved_by": "M. Chen"})),
            StatusCode::OK,
        )
        .await;
    assert_eq!(approved["is_approved"], true);
    assert_eq!(approved["approved_by"], "M. Chen");
    assert!(approved["approved_date"].is_string());

    let mut update = inspection_payload("QI-001", order.id, facility.id);
    update["status"] = json!("completed");
    update["passed"] = json!(true);
    let updated = app
        .json(Method::PUT, &format!("/api/qualityinspections/{id}"), Some(update), StatusCode::OK)
        .await;
    assert_eq!(updated["status"], "completed");
    assert_eq!(updated["passed"], true);

    let with_documents = app
        .json(Method::GET, &format!("/api/qualityinspections/{id}"), None, StatusCode::OK)
        .await;
    assert_eq!(with_documents["documents"].as_array().unwrap().len(), 1);

    // The order detail view carries its inspections
    let order_view = app
        .json(Method::GET, &format!("/api/productionorders/{}", order.id), None, StatusCode::OK)
        .await;
    assert_eq!(order_view["quality_inspections"].as_array().unwrap().len(), 1);

    app.json(Method::DELETE, &format!("/api/qualityinspections/{id}"), None, StatusCode::NO_CONTENT)
        .await;
    let remaining = quality_document::Entity::find()
        .count(app.state.db.as_ref())
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn documents_need_an_existing_inspection() {
    let app = TestApp::new().await;
    app.json(
        Method::POST,
        "/api/qualityinspections/9999/documents",
        Some(document_payload()),
        StatusCode::NOT_FOUND,
    )
    .await;
    app.json(
        Method::POST,
        "/api/qualitydocuments/9999/approve",
        Some(json!({"approved_by": "M. Chen"})),
        StatusCode::NOT_FOUND,
    )
    .await;
    app.json(Method::DELETE, "/api/qualitydocuments/9999", None, StatusCode::NOT_FOUND)
        .await;
}

#[tokio::test]
async fn approval_requires_an_approver() {
    let app = TestApp::new().await;
    let facility = app.seed_facility("TST").await;
    let order = app.seed_order(OrderSeed::new("TST-001", facility.id)).await;
    let inspection = app
        .json(
            Method::POST,
            "/api/qualityinspections",
            Some(inspection_payload("QI-001", order.id, facility.id)),
            StatusCode::CREATED,
        )
        .await;
    let document = app
        .json(
            Method::POST,
            &format!("/api/qualityinspections/{}/documents", inspection["id"]),
            Some(document_payload()),
            StatusCode::CREATED,
        )
        .await;

    app.json(
        Method::POST,
        &format!("/api/qualitydocuments/{}/approve", document["id"]),
        Some(json!({"approved_by": ""})),
        StatusCode::BAD_REQUEST,
    )
    .await;

    app.json(Method::DELETE, &format!("/api/qualitydocuments/{}", document["id"]), None, StatusCode::NO_CONTENT)
        .await;
}

#[tokio::test]
async fn inspection_for_unknown_order_conflicts() {
    let app = TestApp::new().await;
    let facility = app.seed_facility("TST").await;
    app.json(
        Method::POST,
        "/api/qualityinspections",
        Some(inspection_payload("QI-001", 4242, facility.id)),
        StatusCode::CONFLICT,
    )
    .await;
}
