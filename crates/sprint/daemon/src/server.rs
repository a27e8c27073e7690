//! Server setup and lifecycle

use crate::api::create_router;
use crate::api::state::AppState;
use crate::config::DaemonConfig;
use crate::error::DaemonResult;
use crate::seed::seed_demo_data;
use sprint_catalog::{InMemoryProjectCatalog, ProjectCatalog};
use sprint_service::SprintService;
use sprint_storage::InMemorySprintStorage;
use std::sync::Arc;
use tokio::net::TcpListener;

/// The sprint daemon server
pub struct Server {
    config: DaemonConfig,
    catalog: Arc<InMemoryProjectCatalog>,
    service: Arc<SprintService>,
}

impl Server {
    /// Wire up storage, catalog, and the service
    pub fn new(config: DaemonConfig) -> DaemonResult<Self> {
        let catalog = Arc::new(InMemoryProjectCatalog::new());
        let storage = Arc::new(InMemorySprintStorage::new());
        let service = Arc::new(SprintService::new(
            catalog.clone() as Arc<dyn ProjectCatalog>,
            storage,
        ));

        if config.seed_demo_data {
            seed_demo_data(&catalog, &service)?;
        }

        Ok(Self {
            config,
            catalog,
            service,
        })
    }

    /// Run until the process is stopped
    pub async fn run(self) -> DaemonResult<()> {
        let addr = self.config.listen_addr;
        let state = AppState::new(self.service, self.catalog);
        let app = create_router(state);

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Sprint daemon listening on {}", addr);

        axum::serve(listener, app).await?;
        Ok(())
    }
}
