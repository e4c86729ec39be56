mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{OrderSeed, TestApp};

fn facility_payload(code: &str) -> serde_json::Value {
    json!({
        "name": "Precision Casting Plant 1",
        "code": code,
        "city": "Portland",
        "country": "USA",
        "type": "investment_casting"
    })
}

#[tokio::test]
async fn facility_crud_round_trip() {
    let app = TestApp::new().await;

    let created = app
        .json(Method::POST, "/api/facilities", Some(facility_payload("TST")), StatusCode::CREATED)
        .await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["type"], "investment_casting");
    assert_eq!(created["is_active"], true);

    let by_code = app
        .json(Method::GET, "/api/facilities/by-code/TST", None, StatusCode::OK)
        .await;
    assert_eq!(by_code["id"], id);

    let mut update = facility_payload("TST");
    update["name"] = json!("Plant One");
    update["is_active"] = json!(false);
    let updated = app
        .json(Method::PUT, &format!("/api/facilities/{id}"), Some(update), StatusCode::OK)
        .await;
    assert_eq!(updated["name"], "Plant One");
    assert_eq!(updated["is_active"], false);

    // Inactive facilities are still listed
    let all = app.json(Method::GET, "/api/facilities", None, StatusCode::OK).await;
    assert_eq!(all.as_array().unwrap().len(), 1);

    app.json(Method::DELETE, &format!("/api/facilities/{id}"), None, StatusCode::NO_CONTENT)
        .await;
    app.json(Method::GET, &format!("/api/facilities/{id}"), None, StatusCode::NOT_FOUND)
        .await;
    app.json(Method::GET, "/api/facilities/by-code/TST", None, StatusCode::NOT_FOUND)
        .await;
}

#[tokio::test]
async fn duplicate_code_conflicts() {
    let app = TestApp::new().await;
    app.json(Method::POST, "/api/facilities", Some(facility_payload("TST")), StatusCode::CREATED)
        .await;
    let body = app
        .json(Method::POST, "/api/facilities", Some(facility_payload("TST")), StatusCode::CONFLICT)
        .await;
    assert_eq!(body["error"], "Conflict");
}

#[tokio::test]
async fn facility_with_orders_cannot_be_deleted() {
    let app = TestApp::new().await;
    let facility = app.seed_facility("TST").await;
    app.seed_order(OrderSeed::new("TST-001", facility.id)).await;

    app.json(Method::DELETE, &format!("/api/facilities/{}", facility.id), None, StatusCode::CONFLICT)
        .await;
}

#[tokio::test]
async fn invalid_facility_is_rejected() {
    let app = TestApp::new().await;
    let mut payload = facility_payload("");
    app.json(Method::POST, "/api/facilities", Some(payload.clone()), StatusCode::BAD_REQUEST)
        .await;

    payload["code"] = json!("OK");
    payload["type"] = json!("spaceport");
    app.json(Method::POST, "/api/facilities", Some(payload), StatusCode::BAD_REQUEST)
        .await;
}
