pub mod common;
pub mod equipment;
pub mod facilities;
pub mod health;
pub mod production_metrics;
pub mod production_orders;
pub mod quality;

use crate::{
    config::AppConfig,
    db::DbPool,
    services::{
        EquipmentService, FacilityService, ProductionMetricService, ProductionOrderService,
        QualityService,
    },
};
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub production_orders: Arc<ProductionOrderService>,
    pub facilities: Arc<FacilityService>,
    pub equipment: Arc<EquipmentService>,
    pub quality: Arc<QualityService>,
    pub production_metrics: Arc<ProductionMetricService>,
}

impl AppServices {
    /// Builds every service over the shared pool, taking scheduling knobs from `config`
    pub fn new(db_pool: Arc<DbPool>, config: &AppConfig) -> Self {
        Self {
            production_orders: Arc::new(ProductionOrderService::new(
                db_pool.clone(),
                config.critical_window(),
                config.schedule_gap(),
            )),
            facilities: Arc::new(FacilityService::new(db_pool.clone())),
            equipment: Arc::new(EquipmentService::new(db_pool.clone())),
            quality: Arc::new(QualityService::new(db_pool.clone())),
            production_metrics: Arc::new(ProductionMetricService::new(db_pool)),
        }
    }
}
