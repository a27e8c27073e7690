//! Application state for API handlers

use sprint_catalog::InMemoryProjectCatalog;
use sprint_service::SprintService;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The sprint platform facade
    pub service: Arc<SprintService>,

    /// Catalog handle for operator-side project publishing
    pub catalog: Arc<InMemoryProjectCatalog>,

    /// Daemon version
    pub version: String,

    /// Daemon start time
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(service: Arc<SprintService>, catalog: Arc<InMemoryProjectCatalog>) -> Self {
        Self {
            service,
            catalog,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: chrono::Utc::now(),
        }
    }
}
