pub mod equipment;
pub mod facility;
pub mod production_metric;
pub mod production_order;
pub mod quality_document;
pub mod quality_inspection;

pub use equipment::{EquipmentStatus, EquipmentType};
pub use facility::FacilityType;
pub use production_metric::MetricType;
pub use production_order::{MaterialType, Priority, ProductionStatus};
pub use quality_document::DocumentType;
pub use quality_inspection::{InspectionStatus, InspectionType};
