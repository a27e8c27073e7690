//! Sprint Service - the unified submission and verification facade
//!
//! This is the single entry point callers go through. Every operation runs
//! the delegated identity/role check first, then hands off to the lifecycle
//! engine or the verification recorder. Reads are scoped: a student sees
//! their own submissions, a lecturer sees any.

#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};
use sprint_catalog::ProjectCatalog;
use sprint_identity::{Account, AccountDirectory, RegistrationRequest, Role};
use sprint_lifecycle::LifecycleEngine;
use sprint_storage::{SprintStorage, SubmissionStore};
use sprint_types::{
    DeliverableId, FieldUpdates, IntegrityAttestations, LecturerId, LecturerVerification,
    Project, ProjectId, ProjectSubmission, ReviewDecision, SprintError, SprintResult, StudentId,
    SubmissionId, TrackedStatus,
};
use sprint_verification::VerificationRecorder;
use std::sync::Arc;

/// Who is asking, for read operations
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    Student(StudentId),
    Lecturer(LecturerId),
}

/// The sprint platform facade
pub struct SprintService {
    directory: Arc<AccountDirectory>,
    catalog: Arc<dyn ProjectCatalog>,
    storage: Arc<dyn SprintStorage>,
    lifecycle: LifecycleEngine,
    recorder: VerificationRecorder,
}

impl SprintService {
    /// Create a service with a fresh, empty account directory
    pub fn new<S>(catalog: Arc<dyn ProjectCatalog>, storage: Arc<S>) -> Self
    where
        S: SprintStorage + 'static,
    {
        Self::with_directory(Arc::new(AccountDirectory::new()), catalog, storage)
    }

    /// Create a service around an existing directory
    pub fn with_directory<S>(
        directory: Arc<AccountDirectory>,
        catalog: Arc<dyn ProjectCatalog>,
        storage: Arc<S>,
    ) -> Self
    where
        S: SprintStorage + 'static,
    {
        let submission_store: Arc<dyn SubmissionStore> = storage.clone();
        let full_storage: Arc<dyn SprintStorage> = storage;
        Self {
            directory,
            catalog: catalog.clone(),
            storage: full_storage.clone(),
            lifecycle: LifecycleEngine::new(catalog, submission_store),
            recorder: VerificationRecorder::new(full_storage),
        }
    }

    /// The account directory backing the role checks
    pub fn directory(&self) -> &AccountDirectory {
        &self.directory
    }

    // ============ Account Operations ============

    /// Register an account
    pub fn register_account(&self, request: RegistrationRequest) -> SprintResult<Account> {
        Ok(self.directory.register(request)?)
    }

    /// Resolve the actor behind an account reference
    pub fn actor_for(&self, account_id: &sprint_types::AccountId) -> SprintResult<Actor> {
        match self.directory.role_of(account_id)? {
            Role::Student => Ok(Actor::Student(StudentId::new(account_id.0.clone()))),
            Role::Lecturer => Ok(Actor::Lecturer(LecturerId::new(account_id.0.clone()))),
        }
    }

    // ============ Catalog Queries ============

    pub async fn list_projects(&self) -> SprintResult<Vec<Project>> {
        Ok(self.catalog.list_projects().await?)
    }

    pub async fn get_project(&self, project_id: &ProjectId) -> SprintResult<Project> {
        self.catalog
            .get_project(project_id)
            .await?
            .ok_or_else(|| SprintError::ProjectNotFound(project_id.clone()))
    }

    // ============ Student Operations ============

    /// Start a sprint; idempotent per `(project, student)` pair
    pub async fn start_sprint(
        &self,
        actor: &StudentId,
        project_id: &ProjectId,
    ) -> SprintResult<ProjectSubmission> {
        self.directory.authorize_student(actor)?;
        self.lifecycle.start(actor, project_id).await
    }

    /// Flip a deliverable in the personal checklist
    pub async fn toggle_deliverable(
        &self,
        actor: &StudentId,
        submission_id: &SubmissionId,
        deliverable_id: &DeliverableId,
    ) -> SprintResult<ProjectSubmission> {
        self.directory.authorize_student(actor)?;
        self.lifecycle
            .toggle_deliverable(actor, submission_id, deliverable_id)
            .await
    }

    /// Open the read-before-proceed gate on the stakeholder feedback
    pub async fn reveal_feedback(
        &self,
        actor: &StudentId,
        submission_id: &SubmissionId,
    ) -> SprintResult<ProjectSubmission> {
        self.directory.authorize_student(actor)?;
        self.lifecycle.reveal_feedback(actor, submission_id).await
    }

    /// The project's stakeholder feedback text, readable only after the
    /// student has revealed it
    pub async fn stakeholder_feedback(
        &self,
        actor: &StudentId,
        submission_id: &SubmissionId,
    ) -> SprintResult<String> {
        self.directory.authorize_student(actor)?;
        let submission = self.owned_submission(actor, submission_id).await?;
        if !submission.feedback_revealed {
            return Err(SprintError::FeedbackNotReviewed);
        }
        let project = self.get_project(&submission.project_id).await?;
        Ok(project.stakeholder_feedback)
    }

    /// Update the deliverable link and/or impact statement
    pub async fn update_fields(
        &self,
        actor: &StudentId,
        submission_id: &SubmissionId,
        updates: FieldUpdates,
    ) -> SprintResult<ProjectSubmission> {
        self.directory.authorize_student(actor)?;
        self.lifecycle
            .update_fields(actor, submission_id, updates)
            .await
    }

    /// Run the submit gate
    pub async fn submit(
        &self,
        actor: &StudentId,
        submission_id: &SubmissionId,
    ) -> SprintResult<ProjectSubmission> {
        self.directory.authorize_student(actor)?;
        self.lifecycle.submit(actor, submission_id).await
    }

    // ============ Reviewer Operations ============

    /// Record a verification decision and flip the submission terminal
    pub async fn verify(
        &self,
        actor: &LecturerId,
        submission_id: &SubmissionId,
        attestations: IntegrityAttestations,
        decision: ReviewDecision,
    ) -> SprintResult<(LecturerVerification, ProjectSubmission)> {
        let reviewer = self.directory.reviewer_identity(actor)?;
        self.recorder
            .verify(submission_id, reviewer, attestations, decision)
            .await
    }

    // ============ Queries ============

    /// Snapshot of one submission, visible to its owner or any lecturer
    pub async fn get_submission(
        &self,
        actor: &Actor,
        submission_id: &SubmissionId,
    ) -> SprintResult<ProjectSubmission> {
        let submission = self
            .storage
            .get_submission(submission_id)
            .await?
            .ok_or_else(|| SprintError::SubmissionNotFound(submission_id.clone()))?;
        self.authorize_read(actor, &submission)?;
        Ok(submission)
    }

    /// Status of a `(project, student)` pair. Absence of a record is
    /// reported as `NotStarted`, never stored.
    pub async fn status_for(
        &self,
        actor: &Actor,
        project_id: &ProjectId,
        student_id: &StudentId,
    ) -> SprintResult<TrackedStatus> {
        match actor {
            Actor::Student(id) if id != student_id => {
                return Err(SprintError::Unauthorized(
                    "students may only query their own progress".into(),
                ));
            }
            Actor::Student(id) => {
                self.directory.authorize_student(id)?;
            }
            Actor::Lecturer(id) => {
                self.directory.reviewer_identity(id)?;
            }
        }

        let found = self.storage.find_submission(project_id, student_id).await?;
        Ok(match found {
            Some(submission) => TrackedStatus::Recorded(submission.status),
            None => TrackedStatus::NotStarted,
        })
    }

    /// All of one student's submissions, newest-first
    pub async fn submissions_for_student(
        &self,
        actor: &Actor,
        student_id: &StudentId,
    ) -> SprintResult<Vec<ProjectSubmission>> {
        match actor {
            Actor::Student(id) if id != student_id => {
                return Err(SprintError::Unauthorized(
                    "students may only list their own submissions".into(),
                ));
            }
            Actor::Student(id) => {
                self.directory.authorize_student(id)?;
            }
            Actor::Lecturer(id) => {
                self.directory.reviewer_identity(id)?;
            }
        }
        Ok(self.storage.list_submissions_for_student(student_id).await?)
    }

    /// The verification recorded for a submission, if any; lecturer-only
    pub async fn get_verification(
        &self,
        actor: &LecturerId,
        submission_id: &SubmissionId,
    ) -> SprintResult<Option<LecturerVerification>> {
        self.directory.reviewer_identity(actor)?;
        self.recorder.verification_for(submission_id).await
    }

    fn authorize_read(&self, actor: &Actor, submission: &ProjectSubmission) -> SprintResult<()> {
        match actor {
            Actor::Student(id) => {
                self.directory.authorize_student(id)?;
                if &submission.student_id != id {
                    return Err(SprintError::Unauthorized(format!(
                        "submission {} belongs to another student",
                        submission.id
                    )));
                }
            }
            Actor::Lecturer(id) => {
                self.directory.reviewer_identity(id)?;
            }
        }
        Ok(())
    }

    async fn owned_submission(
        &self,
        actor: &StudentId,
        submission_id: &SubmissionId,
    ) -> SprintResult<ProjectSubmission> {
        let submission = self
            .storage
            .get_submission(submission_id)
            .await?
            .ok_or_else(|| SprintError::SubmissionNotFound(submission_id.clone()))?;
        if &submission.student_id != actor {
            return Err(SprintError::Unauthorized(format!(
                "submission {} belongs to another student",
                submission.id
            )));
        }
        Ok(submission)
    }
}
