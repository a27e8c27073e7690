//! In-memory reference implementation of the sprint storage traits.
//!
//! Deterministic and test-friendly. Production deployments should put a
//! transactional backend behind the same traits for source-of-truth data.
//!
//! Lock order is submissions, then pair index, then verifications; every
//! multi-map operation acquires in that order.

use crate::traits::{CreateOutcome, SubmissionStore, VerificationStore};
use crate::{StorageError, StorageResult};
use async_trait::async_trait;
use sprint_types::{
    LecturerVerification, ProjectId, ProjectSubmission, StudentId, SubmissionId,
};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory sprint storage adapter.
#[derive(Default)]
pub struct InMemorySprintStorage {
    submissions: RwLock<HashMap<SubmissionId, ProjectSubmission>>,
    pair_index: RwLock<HashMap<(ProjectId, StudentId), SubmissionId>>,
    verifications: RwLock<HashMap<SubmissionId, LecturerVerification>>,
}

impl InMemorySprintStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(what: &str) -> StorageError {
    StorageError::Backend(format!("{what} lock poisoned"))
}

#[async_trait]
impl SubmissionStore for InMemorySprintStorage {
    async fn create_submission(
        &self,
        submission: ProjectSubmission,
    ) -> StorageResult<CreateOutcome> {
        let mut submissions = self
            .submissions
            .write()
            .map_err(|_| poisoned("submissions"))?;
        let mut pair_index = self.pair_index.write().map_err(|_| poisoned("pair index"))?;

        let pair = (
            submission.project_id.clone(),
            submission.student_id.clone(),
        );
        if let Some(existing_id) = pair_index.get(&pair) {
            let existing = submissions
                .get(existing_id)
                .cloned()
                .ok_or_else(|| poisoned_index(existing_id))?;
            return Ok(CreateOutcome::Existing(existing));
        }

        pair_index.insert(pair, submission.id.clone());
        submissions.insert(submission.id.clone(), submission.clone());
        Ok(CreateOutcome::Created(submission))
    }

    async fn get_submission(
        &self,
        id: &SubmissionId,
    ) -> StorageResult<Option<ProjectSubmission>> {
        let submissions = self
            .submissions
            .read()
            .map_err(|_| poisoned("submissions"))?;
        Ok(submissions.get(id).cloned())
    }

    async fn find_submission(
        &self,
        project_id: &ProjectId,
        student_id: &StudentId,
    ) -> StorageResult<Option<ProjectSubmission>> {
        let submissions = self
            .submissions
            .read()
            .map_err(|_| poisoned("submissions"))?;
        let pair_index = self.pair_index.read().map_err(|_| poisoned("pair index"))?;

        let pair = (project_id.clone(), student_id.clone());
        Ok(pair_index
            .get(&pair)
            .and_then(|id| submissions.get(id))
            .cloned())
    }

    async fn update_submission(
        &self,
        expected_version: u64,
        submission: ProjectSubmission,
    ) -> StorageResult<ProjectSubmission> {
        let mut submissions = self
            .submissions
            .write()
            .map_err(|_| poisoned("submissions"))?;

        let current = submissions
            .get(&submission.id)
            .ok_or_else(|| StorageError::NotFound(format!("submission {}", submission.id)))?;

        if current.version != expected_version {
            return Err(StorageError::Conflict(format!(
                "submission {} is at version {}, writer expected {}",
                submission.id, current.version, expected_version
            )));
        }

        let mut stored = submission;
        stored.version = expected_version + 1;
        submissions.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn list_submissions_for_student(
        &self,
        student_id: &StudentId,
    ) -> StorageResult<Vec<ProjectSubmission>> {
        let submissions = self
            .submissions
            .read()
            .map_err(|_| poisoned("submissions"))?;

        let mut results: Vec<_> = submissions
            .values()
            .filter(|s| &s.student_id == student_id)
            .cloned()
            .collect();
        results.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(results)
    }
}

#[async_trait]
impl VerificationStore for InMemorySprintStorage {
    async fn record_verification(
        &self,
        verification: LecturerVerification,
        expected_submission_version: u64,
        finalized: ProjectSubmission,
    ) -> StorageResult<(LecturerVerification, ProjectSubmission)> {
        let mut submissions = self
            .submissions
            .write()
            .map_err(|_| poisoned("submissions"))?;
        let mut verifications = self
            .verifications
            .write()
            .map_err(|_| poisoned("verifications"))?;

        let submission_id = verification.submission_id.clone();

        if verifications.contains_key(&submission_id) {
            return Err(StorageError::Conflict(format!(
                "verification for submission {submission_id} already recorded"
            )));
        }

        let current = submissions
            .get(&submission_id)
            .ok_or_else(|| StorageError::NotFound(format!("submission {submission_id}")))?;
        if current.version != expected_submission_version {
            return Err(StorageError::Conflict(format!(
                "submission {} is at version {}, verifier expected {}",
                submission_id, current.version, expected_submission_version
            )));
        }

        // Both writes or neither; the checks above ran under the same locks
        let mut stored = finalized;
        stored.version = expected_submission_version + 1;
        submissions.insert(stored.id.clone(), stored.clone());
        verifications.insert(submission_id, verification.clone());
        Ok((verification, stored))
    }

    async fn get_verification(
        &self,
        submission_id: &SubmissionId,
    ) -> StorageResult<Option<LecturerVerification>> {
        let verifications = self
            .verifications
            .read()
            .map_err(|_| poisoned("verifications"))?;
        Ok(verifications.get(submission_id).cloned())
    }
}

fn poisoned_index(id: &SubmissionId) -> StorageError {
    StorageError::Backend(format!("pair index points at missing submission {id}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprint_types::{SubmissionStatus, VerificationId};

    fn submission(project: &str, student: &str) -> ProjectSubmission {
        ProjectSubmission::start(ProjectId::new(project), StudentId::new(student))
    }

    fn verification_for(sub: &ProjectSubmission) -> LecturerVerification {
        LecturerVerification {
            id: VerificationId::generate(),
            submission_id: sub.id.clone(),
            project_id: sub.project_id.clone(),
            student_id: sub.student_id.clone(),
            lecturer_id: sprint_types::LecturerId::new("l1"),
            lecturer_name: "Dr. Reviewer".to_string(),
            lecturer_email: "l1@praxis.example".to_string(),
            functionality_verified: true,
            skill_level_verified: true,
            original_work_verified: true,
            approved: true,
            comments: "Looks good".to_string(),
            digital_badge_url: None,
            verified_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_is_idempotent_per_pair() {
        let store = InMemorySprintStorage::new();

        let first = store
            .create_submission(submission("p1", "s1"))
            .await
            .unwrap();
        assert!(first.is_created());
        let first = first.into_submission();

        let second = store
            .create_submission(submission("p1", "s1"))
            .await
            .unwrap();
        assert!(!second.is_created());
        assert_eq!(second.into_submission().id, first.id);

        // A different pair gets its own row
        let other = store
            .create_submission(submission("p1", "s2"))
            .await
            .unwrap();
        assert!(other.is_created());
    }

    #[tokio::test]
    async fn test_update_cas_rejects_stale_writers() {
        let store = InMemorySprintStorage::new();
        let sub = store
            .create_submission(submission("p1", "s1"))
            .await
            .unwrap()
            .into_submission();

        let mut edit_a = sub.clone();
        edit_a.deliverable_link = "https://github.com/s1/p1".to_string();
        let stored = store.update_submission(sub.version, edit_a).await.unwrap();
        assert_eq!(stored.version, 1);

        // A second writer holding the stale version loses
        let mut edit_b = sub.clone();
        edit_b.impact_statement = "late edit".to_string();
        let err = store.update_submission(sub.version, edit_b).await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_record_verification_is_single_shot() {
        let store = InMemorySprintStorage::new();
        let sub = store
            .create_submission(submission("p1", "s1"))
            .await
            .unwrap()
            .into_submission();

        let mut finalized = sub.clone();
        finalized.status = SubmissionStatus::Verified;
        store
            .record_verification(verification_for(&sub), sub.version, finalized.clone())
            .await
            .unwrap();

        let err = store
            .record_verification(verification_for(&sub), sub.version + 1, finalized)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));

        let recorded = store.get_verification(&sub.id).await.unwrap();
        assert!(recorded.is_some());
    }

    #[tokio::test]
    async fn test_record_verification_failure_writes_nothing() {
        let store = InMemorySprintStorage::new();
        let sub = store
            .create_submission(submission("p1", "s1"))
            .await
            .unwrap()
            .into_submission();

        let mut finalized = sub.clone();
        finalized.status = SubmissionStatus::Rejected;

        // Stale version: the CAS fails, and neither row changes
        let err = store
            .record_verification(verification_for(&sub), sub.version + 7, finalized)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));

        assert!(store.get_verification(&sub.id).await.unwrap().is_none());
        let unchanged = store.get_submission(&sub.id).await.unwrap().unwrap();
        assert_eq!(unchanged.status, SubmissionStatus::InProgress);
    }

    #[tokio::test]
    async fn test_list_submissions_newest_first() {
        let store = InMemorySprintStorage::new();
        let a = store
            .create_submission(submission("p1", "s1"))
            .await
            .unwrap()
            .into_submission();
        let mut b = submission("p2", "s1");
        b.started_at = a.started_at + chrono::Duration::seconds(10);
        store.create_submission(b.clone()).await.unwrap();

        let listed = store
            .list_submissions_for_student(&StudentId::new("s1"))
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, b.id);
    }
}
