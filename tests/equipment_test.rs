mod common;

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use common::{decimal, TestApp};

fn equipment_payload(number: &str, facility_id: i32, next_maintenance: Option<String>) -> Value {
    json!({
        "equipment_number": number,
        "name": "Vacuum furnace",
        "type": "vacuum_furnace",
        "model": "VF-2000",
        "installation_date": "2022-01-10T00:00:00Z",
        "next_maintenance_date": next_maintenance,
        "facility_id": facility_id,
        "purchase_cost": "250000.00"
    })
}

fn rfc3339(offset: Duration) -> String {
    (Utc::now() + offset).format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

#[tokio::test]
async fn equipment_crud_and_facility_filter() {
    let app = TestApp::new().await;
    let casting = app.seed_facility("TST").await;
    let machining = app.seed_facility("PMC").await;

    let created = app
        .json(Method::POST, "/api/equipment", Some(equipment_payload("EQ-1", casting.id, None)), StatusCode::CREATED)
        .await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["model"], "VF-2000");
    assert_eq!(created["status"], "available");
    assert_eq!(decimal(&created["efficiency_rating"]), dec!(100));

    app.json(Method::POST, "/api/equipment", Some(equipment_payload("EQ-2", machining.id, None)), StatusCode::CREATED)
        .await;

    let all = app.json(Method::GET, "/api/equipment", None, StatusCode::OK).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
    let casting_only = app
        .json(Method::GET, &format!("/api/equipment?facilityId={}", casting.id), None, StatusCode::OK)
        .await;
    assert_eq!(casting_only.as_array().unwrap().len(), 1);
    assert_eq!(casting_only[0]["equipment_number"], "EQ-1");

    let mut update = equipment_payload("EQ-1", casting.id, None);
    update["status"] = json!("maintenance");
    let updated = app
        .json(Method::PUT, &format!("/api/equipment/{id}"), Some(update), StatusCode::OK)
        .await;
    assert_eq!(updated["status"], "maintenance");

    app.json(Method::DELETE, &format!("/api/equipment/{id}"), None, StatusCode::NO_CONTENT)
        .await;
    app.json(Method::GET, &format!("/api/equipment/{id}"), None, StatusCode::NOT_FOUND)
        .await;
}

#[tokio::test]
async fn duplicate_equipment_number_conflicts() {
    let app = TestApp::new().await;
    let facility = app.seed_facility("TST").await;
    let payload = equipment_payload("EQ-1", facility.id, None);
    app.json(Method::POST, "/api/equipment", Some(payload.clone()), StatusCode::CREATED)
        .await;
    app.json(Method::POST, "/api/equipment", Some(payload), StatusCode::CONFLICT)
        .await;
}

#[tokio::test]
async fn maintenance_due_lists_active_overdue_equipment() {
    let app = TestApp::new().await;
    let facility = app.seed_facility("TST").await;

    let overdue = app
        .json(
            Method::POST,
            "/api/equipment",
            Some(equipment_payload("EQ-OVERDUE", facility.id, Some(rfc3339(-Duration::days(2))))),
            StatusCode::CREATED,
        )
        .await;
    let due_today = app
        .json(
            Method::POST,
            "/api/equipment",
            Some(equipment_payload("EQ-TODAY", facility.id, Some(rfc3339(-Duration::hours(1))))),
            StatusCode::CREATED,
        )
        .await;
    app.json(
        Method::POST,
        "/api/equipment",
        Some(equipment_payload("EQ-LATER", facility.id, Some(rfc3339(Duration::days(30))))),
        StatusCode::CREATED,
    )
    .await;
    app.json(Method::POST, "/api/equipment", Some(equipment_payload("EQ-NONE", facility.id, None)), StatusCode::CREATED)
        .await;
    let mut retired = equipment_payload("EQ-RETIRED", facility.id, Some(rfc3339(-Duration::days(5))));
    retired["is_active"] = json!(false);
    app.json(Method::POST, "/api/equipment", Some(retired), StatusCode::CREATED)
        .await;

    let due = app
        .json(Method::GET, "/api/equipment/maintenance-due", None, StatusCode::OK)
        .await;
    let due_ids: Vec<&Value> = due.as_array().unwrap().iter().map(|e| &e["id"]).collect();
    assert_eq!(due_ids, vec![&overdue["id"], &due_today["id"]]);

    let ahead = app
        .json(
            Method::GET,
            &format!("/api/equipment/maintenance-due?asOf={}", rfc3339(Duration::days(31))),
            None,
            StatusCode::OK,
        )
        .await;
    assert_eq!(ahead.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn negative_amounts_are_rejected() {
    let app = TestApp::new().await;
    let facility = app.seed_facility("TST").await;
    let mut payload = equipment_payload("EQ-1", facility.id, None);
    payload["operating_hours"] = json!("-1");
    app.json(Method::POST, "/api/equipment", Some(payload), StatusCode::BAD_REQUEST)
        .await;
}
