//! Storage contracts for the submission core

use crate::StorageResult;
use async_trait::async_trait;
use sprint_types::{
    LecturerVerification, ProjectId, ProjectSubmission, StudentId, SubmissionId,
};

/// Outcome of an idempotent create: either a fresh row was written or the
/// pair's existing row is returned unchanged.
#[derive(Clone, Debug)]
pub enum CreateOutcome {
    Created(ProjectSubmission),
    Existing(ProjectSubmission),
}

impl CreateOutcome {
    /// The submission, regardless of whether it is fresh
    pub fn into_submission(self) -> ProjectSubmission {
        match self {
            CreateOutcome::Created(s) | CreateOutcome::Existing(s) => s,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, CreateOutcome::Created(_))
    }
}

/// Storage interface for submission records.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Idempotent create keyed on `(project_id, student_id)`: writes the row
    /// if the pair has none, otherwise returns the existing row untouched.
    /// The decision happens under the store's write lock, so two concurrent
    /// starts for the same pair yield one row.
    async fn create_submission(
        &self,
        submission: ProjectSubmission,
    ) -> StorageResult<CreateOutcome>;

    /// Get one submission by id.
    async fn get_submission(
        &self,
        id: &SubmissionId,
    ) -> StorageResult<Option<ProjectSubmission>>;

    /// Find the submission for a `(project, student)` pair.
    async fn find_submission(
        &self,
        project_id: &ProjectId,
        student_id: &StudentId,
    ) -> StorageResult<Option<ProjectSubmission>>;

    /// Compare-and-swap write: succeeds only if the stored row still has
    /// `expected_version`, and bumps the version on the way in. Fails
    /// `Conflict` when another writer got there first.
    async fn update_submission(
        &self,
        expected_version: u64,
        submission: ProjectSubmission,
    ) -> StorageResult<ProjectSubmission>;

    /// All submissions belonging to one student, newest-first.
    async fn list_submissions_for_student(
        &self,
        student_id: &StudentId,
    ) -> StorageResult<Vec<ProjectSubmission>>;
}

/// Storage interface for the append-only verification records.
#[async_trait]
pub trait VerificationStore: Send + Sync {
    /// Record a verification and flip its submission to a terminal status as
    /// one atomic unit. Fails `Conflict` if a verification already exists
    /// for the submission or the submission's version CAS fails; on any
    /// failure neither row is written.
    async fn record_verification(
        &self,
        verification: LecturerVerification,
        expected_submission_version: u64,
        finalized: ProjectSubmission,
    ) -> StorageResult<(LecturerVerification, ProjectSubmission)>;

    /// Get the verification for a submission, if one was ever recorded.
    async fn get_verification(
        &self,
        submission_id: &SubmissionId,
    ) -> StorageResult<Option<LecturerVerification>>;
}

/// The combined storage surface the service wires together.
pub trait SprintStorage: SubmissionStore + VerificationStore {}

impl<T: SubmissionStore + VerificationStore> SprintStorage for T {}
