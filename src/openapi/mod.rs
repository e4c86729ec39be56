use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Precision OMS API",
        version = "0.1.0",
        description = r#"
# Precision OMS

Manufacturing operations backend for precision casting and machining plants.

## Features

- **Production Orders**: Lifecycle tracking, efficiency rating, analytics, critical and delayed views, schedule repacking
- **Facilities**: Plants and their short codes used in order numbers
- **Equipment**: Shop-floor assets and maintenance due dates
- **Quality**: Inspections against orders and their supporting documents
- **Production Metrics**: Measurements with tolerance bounds

## Error Handling

Every failing endpoint returns the same body:

```json
{
  "error": "Not Found",
  "message": "Not found: Production order 42 not found",
  "request_id": "5d7c...",
  "timestamp": "2024-01-01T00:00:00Z"
}
```

Send `x-request-id` to correlate requests; it is echoed on every response.
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "production-orders", description = "Production order endpoints"),
        (name = "production-metrics", description = "Measurements recorded against orders"),
        (name = "facilities", description = "Facility endpoints"),
        (name = "equipment", description = "Equipment and maintenance endpoints"),
        (name = "quality", description = "Quality inspection and document endpoints"),
        (name = "health", description = "Health check endpoints")
    ),
    paths(
        // Production orders
        crate::handlers::production_orders::list_orders,
        crate::handlers::production_orders::get_order,
        crate::handlers::production_orders::get_order_by_number,
        crate::handlers::production_orders::list_orders_by_facility,
        crate::handlers::production_orders::list_orders_by_status,
        crate::handlers::production_orders::list_orders_by_date_range,
        crate::handlers::production_orders::create_order,
        crate::handlers::production_orders::update_order,
        crate::handlers::production_orders::delete_order,
        crate::handlers::production_orders::update_order_status,
        crate::handlers::production_orders::get_efficiency,
        crate::handlers::production_orders::get_analytics,
        crate::handlers::production_orders::list_critical_orders,
        crate::handlers::production_orders::list_delayed_orders,
        crate::handlers::production_orders::optimize_schedule,

        // Production metrics
        crate::handlers::production_orders::list_order_metrics,
        crate::handlers::production_orders::record_order_metric,
        crate::handlers::production_metrics::delete_metric,

        // Facilities
        crate::handlers::facilities::list_facilities,
        crate::handlers::facilities::get_facility,
        crate::handlers::facilities::get_facility_by_code,
        crate::handlers::facilities::create_facility,
        crate::handlers::facilities::update_facility,
        crate::handlers::facilities::delete_facility,

        // Equipment
        crate::handlers::equipment::list_equipment,
        crate::handlers::equipment::list_maintenance_due,
        crate::handlers::equipment::get_equipment,
        crate::handlers::equipment::create_equipment,
        crate::handlers::equipment::update_equipment,
        crate::handlers::equipment::delete_equipment,

        // Quality
        crate::handlers::quality::list_inspections_for_order,
        crate::handlers::quality::get_inspection,
        crate::handlers::quality::create_inspection,
        crate::handlers::quality::update_inspection,
        crate::handlers::quality::delete_inspection,
        crate::handlers::quality::list_documents,
        crate::handlers::quality::add_document,
        crate::handlers::quality::approve_document,
        crate::handlers::quality::delete_document,

        // Health
        crate::handlers::health::health_check,
    ),
    components(
        schemas(
            // Entities
            crate::entities::facility::Model,
            crate::entities::production_order::Model,
            crate::entities::equipment::Model,
            crate::entities::quality_inspection::Model,
            crate::entities::quality_document::Model,
            crate::entities::production_metric::Model,
            crate::entities::FacilityType,
            crate::entities::ProductionStatus,
            crate::entities::Priority,
            crate::entities::MaterialType,
            crate::entities::EquipmentType,
            crate::entities::EquipmentStatus,
            crate::entities::InspectionType,
            crate::entities::InspectionStatus,
            crate::entities::DocumentType,
            crate::entities::MetricType,

            // Requests and responses
            crate::services::production_orders::ProductionOrderInput,
            crate::services::production_orders::ProductionOrderSummary,
            crate::services::production_orders::ProductionOrderDetails,
            crate::services::production_orders::ProductionAnalytics,
            crate::services::production_orders::ScheduleSlot,
            crate::handlers::production_orders::StatusUpdate,
            crate::handlers::production_orders::EfficiencyResponse,
            crate::handlers::production_orders::OptimizeScheduleResponse,
            crate::services::facilities::FacilityInput,
            crate::services::equipment::EquipmentInput,
            crate::services::quality::InspectionInput,
            crate::services::quality::DocumentInput,
            crate::services::quality::ApprovalInput,
            crate::services::quality::InspectionWithDocuments,
            crate::services::production_metrics::MetricInput,
            crate::handlers::health::HealthResponse,

            // Error types
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url(OPENAPI_JSON_PATH, ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from(OPENAPI_JSON_PATH).try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_resource() {
        let openapi = ApiDoc::openapi();
        let json = serde_json::to_string_pretty(&openapi).unwrap();
        assert!(json.contains("Precision OMS API"));
        assert!(json.contains("/api/productionorders/{id}/efficiency"));
        assert!(json.contains("/api/productionorders/facility/{facilityId}/optimize-schedule"));
        assert!(json.contains("/api/facilities/by-code/{code}"));
        assert!(json.contains("/api/equipment/maintenance-due"));
        assert!(json.contains("/api/qualitydocuments/{id}/approve"));
        assert!(json.contains("/api/productionmetrics/{id}"));
    }
}
