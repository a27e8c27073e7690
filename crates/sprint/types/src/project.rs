//! Project briefs and their deliverables
//!
//! A project is the fixed template a sprint runs against. It is owned by the
//! catalog and immutable once published; this core only ever reads it.

use crate::{DeliverableId, ProjectId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One named artifact a sprint brief asks for.
///
/// Deliverables are tracked per-student as a personal checklist; completing
/// them is deliberately not a submission gate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deliverable {
    pub id: DeliverableId,
    pub title: String,
    pub description: String,
}

impl Deliverable {
    pub fn new(
        id: impl Into<DeliverableId>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}

/// A project brief: the simulated work assignment a student sprints against.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    /// Ordered list of required deliverable descriptors
    pub deliverables: Vec<Deliverable>,
    /// Simulated stakeholder revision requests, revealed only after the
    /// read-before-proceed gate
    pub stakeholder_feedback: String,
    pub detailed_requirements: String,
}

impl Project {
    /// Whether the brief contains the given deliverable
    pub fn has_deliverable(&self, id: &DeliverableId) -> bool {
        self.deliverables.iter().any(|d| &d.id == id)
    }

    /// The brief's deliverable id set
    pub fn deliverable_ids(&self) -> BTreeSet<DeliverableId> {
        self.deliverables.iter().map(|d| d.id.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_project() -> Project {
        Project {
            id: ProjectId::new("p1"),
            title: "Analytics dashboard".to_string(),
            deliverables: vec![
                Deliverable::new("d1", "Wireframes", "Low-fi screens"),
                Deliverable::new("d2", "Prototype", "Clickable build"),
            ],
            stakeholder_feedback: "The CFO wants export to CSV.".to_string(),
            detailed_requirements: "See the brief.".to_string(),
        }
    }

    #[test]
    fn test_has_deliverable() {
        let project = sample_project();
        assert!(project.has_deliverable(&DeliverableId::new("d1")));
        assert!(!project.has_deliverable(&DeliverableId::new("d9")));
    }

    #[test]
    fn test_deliverable_ids_preserved() {
        let project = sample_project();
        let ids = project.deliverable_ids();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&DeliverableId::new("d2")));
    }
}
