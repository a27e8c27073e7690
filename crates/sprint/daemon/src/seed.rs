//! Demo seed data for local exploration

use crate::error::{DaemonError, DaemonResult};
use sprint_catalog::InMemoryProjectCatalog;
use sprint_identity::{RegistrationRequest, Role};
use sprint_service::SprintService;
use sprint_types::{AccountId, Deliverable, Project, ProjectId};

/// Publish a couple of briefs and register demo accounts
pub fn seed_demo_data(
    catalog: &InMemoryProjectCatalog,
    service: &SprintService,
) -> DaemonResult<()> {
    let projects = [
        Project {
            id: ProjectId::new("demo-fintech-dashboard"),
            title: "Fintech analytics dashboard".to_string(),
            deliverables: vec![
                Deliverable::new("wireframes", "Wireframes", "Low-fidelity screens"),
                Deliverable::new("prototype", "Prototype", "Clickable prototype"),
                Deliverable::new("report", "Impact report", "One-page summary"),
            ],
            stakeholder_feedback:
                "The CFO reviewed your draft: add CSV export and a burn-rate chart.".to_string(),
            detailed_requirements: "Build a dashboard for the finance team.".to_string(),
        },
        Project {
            id: ProjectId::new("demo-supply-audit"),
            title: "Supply chain audit".to_string(),
            deliverables: vec![
                Deliverable::new("data-map", "Data map", "Where the numbers come from"),
                Deliverable::new("findings", "Findings deck", "Top five risks"),
            ],
            stakeholder_feedback:
                "Operations flagged that two suppliers were missing from your map.".to_string(),
            detailed_requirements: "Audit the demo supplier dataset.".to_string(),
        },
    ];
    for project in projects {
        catalog
            .publish(project)
            .map_err(|e| DaemonError::Seed(e.to_string()))?;
    }

    let accounts = [
        ("demo-student", "Demo Student", Role::Student),
        ("demo-lecturer", "Demo Lecturer", Role::Lecturer),
    ];
    for (id, name, role) in accounts {
        service
            .register_account(RegistrationRequest {
                id: AccountId::new(id),
                name: name.to_string(),
                email: format!("{id}@praxis.example"),
                role,
            })
            .map_err(|e| DaemonError::Seed(e.to_string()))?;
    }

    tracing::info!("Seeded demo projects and accounts");
    Ok(())
}
