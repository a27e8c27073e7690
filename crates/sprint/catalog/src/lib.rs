//! Project Catalog - the source of sprint briefs
//!
//! The catalog owns project templates. From the submission core's point of
//! view it is strictly read-only: a brief is immutable once it exists, so
//! deliverable sets and stakeholder feedback can be cached or re-read freely
//! without locking.
//!
//! The in-memory implementation offers `publish` for seeding and tests.
//! There is deliberately no update or delete — publish-once is how template
//! immutability is enforced.

#![deny(unsafe_code)]

use async_trait::async_trait;
use sprint_types::{Project, ProjectId, SprintError};
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;

/// Catalog-related errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Project already published: {0}")]
    AlreadyPublished(ProjectId),

    #[error("Catalog lock poisoned")]
    LockPoisoned,
}

impl From<CatalogError> for SprintError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::AlreadyPublished(id) => {
                SprintError::InvalidTransition(format!("project {id} is already published"))
            }
            CatalogError::LockPoisoned => SprintError::Storage("catalog lock poisoned".into()),
        }
    }
}

/// Read-only lookup of project briefs
#[async_trait]
pub trait ProjectCatalog: Send + Sync {
    /// Get one brief by id
    async fn get_project(&self, id: &ProjectId) -> Result<Option<Project>, CatalogError>;

    /// List all published briefs
    async fn list_projects(&self) -> Result<Vec<Project>, CatalogError>;
}

/// In-memory catalog for tests, seeding, and single-node deployments
#[derive(Default)]
pub struct InMemoryProjectCatalog {
    projects: RwLock<HashMap<ProjectId, Project>>,
}

impl InMemoryProjectCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a brief. Fails if one with the same id already exists;
    /// published briefs never change.
    pub fn publish(&self, project: Project) -> Result<(), CatalogError> {
        let mut projects = self
            .projects
            .write()
            .map_err(|_| CatalogError::LockPoisoned)?;

        if projects.contains_key(&project.id) {
            return Err(CatalogError::AlreadyPublished(project.id));
        }

        tracing::info!(project_id = %project.id, title = %project.title, "Published project");
        projects.insert(project.id.clone(), project);
        Ok(())
    }
}

#[async_trait]
impl ProjectCatalog for InMemoryProjectCatalog {
    async fn get_project(&self, id: &ProjectId) -> Result<Option<Project>, CatalogError> {
        let projects = self
            .projects
            .read()
            .map_err(|_| CatalogError::LockPoisoned)?;
        Ok(projects.get(id).cloned())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, CatalogError> {
        let projects = self
            .projects
            .read()
            .map_err(|_| CatalogError::LockPoisoned)?;
        let mut all: Vec<_> = projects.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprint_types::Deliverable;

    fn brief(id: &str) -> Project {
        Project {
            id: ProjectId::new(id),
            title: format!("Brief {id}"),
            deliverables: vec![Deliverable::new("d1", "Report", "Final write-up")],
            stakeholder_feedback: "Please add a summary slide.".to_string(),
            detailed_requirements: String::new(),
        }
    }

    #[tokio::test]
    async fn test_publish_and_get() {
        let catalog = InMemoryProjectCatalog::new();
        catalog.publish(brief("p1")).unwrap();

        let found = catalog.get_project(&ProjectId::new("p1")).await.unwrap();
        assert_eq!(found.unwrap().title, "Brief p1");

        let missing = catalog.get_project(&ProjectId::new("p2")).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_publish_is_once_only() {
        let catalog = InMemoryProjectCatalog::new();
        catalog.publish(brief("p1")).unwrap();

        let err = catalog.publish(brief("p1")).unwrap_err();
        assert!(matches!(err, CatalogError::AlreadyPublished(_)));
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_id() {
        let catalog = InMemoryProjectCatalog::new();
        catalog.publish(brief("p2")).unwrap();
        catalog.publish(brief("p1")).unwrap();

        let all = catalog.list_projects().await.unwrap();
        let ids: Vec<_> = all.iter().map(|p| p.id.0.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }
}
