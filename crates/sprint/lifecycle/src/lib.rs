//! Submission Lifecycle Engine
//!
//! Owns every mutation to a submission prior to verification. The state
//! machine is fixed and small:
//!
//! ```text
//! (none) --start--> in_progress --submit (all 4 preconditions)--> submitted
//! in_progress --toggle/reveal/update--> in_progress
//! ```
//!
//! Every mutation is a read-validate-compare-and-swap loop against the
//! store's version field. A conflicting write sends the loop back to a fresh
//! read of the authoritative record, so no gate is ever satisfied by a stale
//! snapshot and `submitted_at` is stamped exactly once.

#![deny(unsafe_code)]

use chrono::Utc;
use sprint_catalog::ProjectCatalog;
use sprint_storage::{StorageError, SubmissionStore};
use sprint_types::{
    DeliverableId, FieldUpdates, Project, ProjectId, ProjectSubmission, SprintError, SprintResult,
    StudentId, SubmissionId, SubmissionStatus,
};
use std::sync::Arc;

/// Drives submissions from start through the submit gate
pub struct LifecycleEngine {
    catalog: Arc<dyn ProjectCatalog>,
    store: Arc<dyn SubmissionStore>,
}

impl LifecycleEngine {
    pub fn new(catalog: Arc<dyn ProjectCatalog>, store: Arc<dyn SubmissionStore>) -> Self {
        Self { catalog, store }
    }

    /// Start a sprint for `(project, student)`.
    ///
    /// Idempotent: if the pair already has a submission it is returned
    /// unchanged, whatever its status. Callers inspect the status to tell a
    /// fresh record from an existing one.
    pub async fn start(
        &self,
        actor: &StudentId,
        project_id: &ProjectId,
    ) -> SprintResult<ProjectSubmission> {
        let project = self.project(project_id).await?;

        let fresh = ProjectSubmission::start(project.id.clone(), actor.clone());
        let outcome = self.store.create_submission(fresh).await?;

        if outcome.is_created() {
            tracing::info!(
                project_id = %project_id,
                student_id = %actor,
                "Started sprint"
            );
        } else {
            tracing::debug!(
                project_id = %project_id,
                student_id = %actor,
                "Start requested for existing submission"
            );
        }
        Ok(outcome.into_submission())
    }

    /// Flip a deliverable in the student's personal checklist.
    ///
    /// Purely cosmetic progress tracking: the submit gate never reads it.
    pub async fn toggle_deliverable(
        &self,
        actor: &StudentId,
        submission_id: &SubmissionId,
        deliverable_id: &DeliverableId,
    ) -> SprintResult<ProjectSubmission> {
        loop {
            let current = self.load(submission_id).await?;
            self.require_owned_in_progress(&current, actor)?;

            let project = self.project(&current.project_id).await?;
            if !project.has_deliverable(deliverable_id) {
                return Err(SprintError::DeliverableNotFound {
                    project: project.id,
                    deliverable: deliverable_id.clone(),
                });
            }

            let mut next = current.clone();
            if !next.completed_deliverables.remove(deliverable_id) {
                next.completed_deliverables.insert(deliverable_id.clone());
            }
            next.updated_at = Utc::now();

            match self.store.update_submission(current.version, next).await {
                Ok(stored) => {
                    tracing::debug!(
                        submission_id = %submission_id,
                        deliverable_id = %deliverable_id,
                        checked = stored.completed_deliverables.contains(deliverable_id),
                        "Toggled deliverable"
                    );
                    return Ok(stored);
                }
                Err(StorageError::Conflict(_)) => continue,
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Reveal the simulated stakeholder feedback. Irreversible.
    ///
    /// This is the read-before-proceed gate: the student must engage with
    /// the revision requests before the submit gate will open.
    pub async fn reveal_feedback(
        &self,
        actor: &StudentId,
        submission_id: &SubmissionId,
    ) -> SprintResult<ProjectSubmission> {
        loop {
            let current = self.load(submission_id).await?;
            self.require_owned_in_progress(&current, actor)?;

            if current.feedback_revealed {
                return Ok(current);
            }

            let mut next = current.clone();
            next.feedback_revealed = true;
            next.updated_at = Utc::now();

            match self.store.update_submission(current.version, next).await {
                Ok(stored) => {
                    tracing::info!(submission_id = %submission_id, "Revealed stakeholder feedback");
                    return Ok(stored);
                }
                Err(StorageError::Conflict(_)) => continue,
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Update the deliverable link and/or impact statement.
    ///
    /// An over-length impact statement is rejected outright; the caller must
    /// resend a shorter value. Truncation is never performed.
    pub async fn update_fields(
        &self,
        actor: &StudentId,
        submission_id: &SubmissionId,
        updates: FieldUpdates,
    ) -> SprintResult<ProjectSubmission> {
        loop {
            let current = self.load(submission_id).await?;
            self.require_owned_in_progress(&current, actor)?;

            if let Some(ref statement) = updates.impact_statement {
                ProjectSubmission::validate_impact_statement(statement)?;
            }

            let mut next = current.clone();
            if let Some(ref link) = updates.deliverable_link {
                next.deliverable_link = link.clone();
            }
            if let Some(ref statement) = updates.impact_statement {
                next.impact_statement = statement.clone();
            }
            next.updated_at = Utc::now();

            match self.store.update_submission(current.version, next).await {
                Ok(stored) => return Ok(stored),
                Err(StorageError::Conflict(_)) => continue,
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// The submit gate. All four preconditions must hold, each with its own
    /// error so the caller can surface a specific remediation:
    ///
    /// 1. status is `in_progress`
    /// 2. deliverable link present
    /// 3. impact statement present
    /// 4. stakeholder feedback revealed
    pub async fn submit(
        &self,
        actor: &StudentId,
        submission_id: &SubmissionId,
    ) -> SprintResult<ProjectSubmission> {
        loop {
            let current = self.load(submission_id).await?;
            self.require_owned(&current, actor)?;

            if current.status != SubmissionStatus::InProgress {
                return Err(SprintError::InvalidTransition(format!(
                    "submission {} is {}, only in_progress submissions can be submitted",
                    current.id, current.status
                )));
            }
            if current.deliverable_link.trim().is_empty() {
                return Err(SprintError::MissingDeliverable);
            }
            if current.impact_statement.trim().is_empty() {
                return Err(SprintError::MissingImpactStatement);
            }
            if !current.feedback_revealed {
                return Err(SprintError::FeedbackNotReviewed);
            }

            let mut next = current.clone();
            next.status = SubmissionStatus::Submitted;
            let now = Utc::now();
            next.submitted_at = Some(now);
            next.updated_at = now;

            match self.store.update_submission(current.version, next).await {
                Ok(stored) => {
                    tracing::info!(
                        submission_id = %submission_id,
                        student_id = %actor,
                        "Submitted sprint for verification"
                    );
                    return Ok(stored);
                }
                // Lost the race; re-read and re-validate. A concurrent
                // winner leaves the record submitted, which the next pass
                // reports as InvalidTransition.
                Err(StorageError::Conflict(_)) => continue,
                Err(err) => return Err(err.into()),
            }
        }
    }

    async fn load(&self, submission_id: &SubmissionId) -> SprintResult<ProjectSubmission> {
        self.store
            .get_submission(submission_id)
            .await?
            .ok_or_else(|| SprintError::SubmissionNotFound(submission_id.clone()))
    }

    async fn project(&self, project_id: &ProjectId) -> SprintResult<Project> {
        self.catalog
            .get_project(project_id)
            .await?
            .ok_or_else(|| SprintError::ProjectNotFound(project_id.clone()))
    }

    fn require_owned(
        &self,
        submission: &ProjectSubmission,
        actor: &StudentId,
    ) -> SprintResult<()> {
        if submission.student_id != *actor {
            return Err(SprintError::Unauthorized(format!(
                "submission {} belongs to another student",
                submission.id
            )));
        }
        Ok(())
    }

    fn require_owned_in_progress(
        &self,
        submission: &ProjectSubmission,
        actor: &StudentId,
    ) -> SprintResult<()> {
        self.require_owned(submission, actor)?;
        if !submission.is_mutable() {
            return Err(SprintError::InvalidTransition(format!(
                "submission {} is {} and can no longer change",
                submission.id, submission.status
            )));
        }
        Ok(())
    }
}
