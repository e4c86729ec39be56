// Production planning
pub mod production_metrics;
pub mod production_orders;

// Plant and quality management
pub mod equipment;
pub mod facilities;
pub mod quality;

pub use equipment::EquipmentService;
pub use facilities::FacilityService;
pub use production_metrics::ProductionMetricService;
pub use production_orders::ProductionOrderService;
pub use quality::QualityService;
