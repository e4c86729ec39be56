#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Set};
use serde_json::Value;
use tower::ServiceExt;

use precision_oms::{
    config::AppConfig,
    db,
    entities::{facility, production_order, FacilityType, MaterialType, Priority, ProductionStatus},
    AppState,
};

/// Application backed by its own in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "development".to_string(),
        );
        // A single connection keeps the in-memory database alive and shared
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = precision_oms::app(state.clone()).expect("failed to build router");

        Self { router, state }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.router
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("router response")
    }

    /// Sends a request and decodes the JSON body, asserting the status first
    pub async fn json(&self, method: Method, uri: &str, body: Option<Value>, expected: StatusCode) -> Value {
        let response = self.request(method, uri, body).await;
        let status = response.status();
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read response body");
        assert_eq!(
            status,
            expected,
            "unexpected status for {uri}: {}",
            String::from_utf8_lossy(&bytes)
        );
        if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("parse response body")
        }
    }

    pub async fn seed_facility(&self, code: &str) -> facility::Model {
        facility::ActiveModel {
            name: Set(format!("{code} Plant")),
            code: Set(code.to_string()),
            address: Set(None),
            city: Set(None),
            state: Set(None),
            country: Set(None),
            facility_type: Set(FacilityType::InvestmentCasting),
            is_active: Set(true),
            created_date: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.state.db.as_ref())
        .await
        .expect("seed facility")
    }

    pub async fn seed_order(&self, order: OrderSeed) -> production_order::Model {
        production_order::ActiveModel {
            order_number: Set(order.order_number),
            part_number: Set(order.part_number),
            part_description: Set(None),
            quantity: Set(order.quantity),
            quantity_completed: Set(order.quantity_completed),
            status: Set(order.status),
            priority: Set(order.priority),
            scheduled_start_date: Set(order.scheduled_start),
            scheduled_end_date: Set(order.scheduled_end),
            actual_start_date: Set(order.actual_start),
            actual_end_date: Set(order.actual_end),
            facility_id: Set(order.facility_id),
            customer_name: Set("Aero Corp".to_string()),
            customer_order_number: Set(None),
            material_type: Set(MaterialType::InconelAlloy),
            estimated_cost: Set(order.estimated_cost),
            actual_cost: Set(order.actual_cost),
            created_date: Set(order.created_date),
            notes: Set(None),
            ..Default::default()
        }
        .insert(self.state.db.as_ref())
        .await
        .expect("seed production order")
    }
}

/// Production order fixture with workable defaults
#[derive(Clone)]
pub struct OrderSeed {
    pub order_number: String,
    pub part_number: String,
    pub facility_id: i32,
    pub status: ProductionStatus,
    pub priority: Priority,
    pub quantity: i32,
    pub quantity_completed: i32,
    pub scheduled_start: DateTime<Utc>,
    pub scheduled_end: DateTime<Utc>,
    pub actual_start: Option<DateTime<Utc>>,
    pub actual_end: Option<DateTime<Utc>>,
    pub estimated_cost: Decimal,
    pub actual_cost: Decimal,
    pub created_date: DateTime<Utc>,
}

impl OrderSeed {
    pub fn new(order_number: &str, facility_id: i32) -> Self {
        let now = Utc::now();
        Self {
            order_number: order_number.to_string(),
            part_number: "TB-001".to_string(),
            facility_id,
            status: ProductionStatus::Planned,
            priority: Priority::Medium,
            quantity: 10,
            quantity_completed: 0,
            scheduled_start: now + Duration::days(10),
            scheduled_end: now + Duration::days(15),
            actual_start: None,
            actual_end: None,
            estimated_cost: Decimal::new(50_000, 0),
            actual_cost: Decimal::ZERO,
            created_date: now,
        }
    }
}

/// Parses a JSON decimal that may arrive as a string or a number
pub fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => s.parse().expect("decimal string"),
        Value::Number(n) => n.to_string().parse().expect("decimal number"),
        other => panic!("not a decimal: {other}"),
    }
}
