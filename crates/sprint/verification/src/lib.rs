//! Verification Recorder
//!
//! The sole writer of `LecturerVerification` rows and the sole mutator of a
//! submission's terminal state. Verification is single-shot: one decision
//! per submission, ever, with no amend or overturn path. The record and the
//! terminal status flip happen as one atomic store call — either both land
//! or neither does.
//!
//! Rejection is not a shortcut: all three integrity attestations are
//! required whatever the decision, so a reviewer cannot reject work they
//! have not actually reviewed.

#![deny(unsafe_code)]

use chrono::Utc;
use sprint_storage::{SprintStorage, StorageError, SubmissionStore, VerificationStore};
use sprint_types::{
    IntegrityAttestations, LecturerVerification, ProjectSubmission, ReviewDecision,
    ReviewerIdentity, SprintError, SprintResult, SubmissionId, SubmissionStatus, VerificationId,
};
use std::sync::Arc;

/// Records reviewer decisions against submitted sprints
pub struct VerificationRecorder {
    store: Arc<dyn SprintStorage>,
}

impl VerificationRecorder {
    pub fn new(store: Arc<dyn SprintStorage>) -> Self {
        Self { store }
    }

    /// Record a reviewer's decision and flip the submission terminal.
    ///
    /// Preconditions, in order, each with its own error: the submission
    /// exists and is `submitted`; all three attestations are affirmed; no
    /// verification was ever recorded for it. Of two concurrent attempts,
    /// exactly one writes — the loser fails `AlreadyVerified`.
    pub async fn verify(
        &self,
        submission_id: &SubmissionId,
        reviewer: ReviewerIdentity,
        attestations: IntegrityAttestations,
        decision: ReviewDecision,
    ) -> SprintResult<(LecturerVerification, ProjectSubmission)> {
        loop {
            let current = self
                .store
                .get_submission(submission_id)
                .await?
                .ok_or_else(|| SprintError::SubmissionNotFound(submission_id.clone()))?;

            if current.status != SubmissionStatus::Submitted {
                // A terminal submission with a recorded decision is a
                // duplicate attempt; anything else was never submitted.
                if current.status.is_terminal()
                    && self.store.get_verification(submission_id).await?.is_some()
                {
                    return Err(SprintError::AlreadyVerified(submission_id.clone()));
                }
                return Err(SprintError::NotSubmitted(submission_id.clone()));
            }

            if !attestations.all_affirmed() {
                return Err(SprintError::IntegrityChecksIncomplete);
            }

            if self.store.get_verification(submission_id).await?.is_some() {
                return Err(SprintError::AlreadyVerified(submission_id.clone()));
            }

            let now = Utc::now();
            let verification = LecturerVerification {
                id: VerificationId::generate(),
                submission_id: submission_id.clone(),
                project_id: current.project_id.clone(),
                student_id: current.student_id.clone(),
                lecturer_id: reviewer.lecturer_id.clone(),
                lecturer_name: reviewer.name.clone(),
                lecturer_email: reviewer.email.clone(),
                functionality_verified: attestations.functionality_verified,
                skill_level_verified: attestations.skill_level_verified,
                original_work_verified: attestations.original_work_verified,
                approved: decision.approved,
                comments: decision.comments.clone(),
                digital_badge_url: decision.digital_badge_url.clone(),
                verified_at: now,
            };

            let mut finalized = current.clone();
            finalized.status = if decision.approved {
                SubmissionStatus::Verified
            } else {
                SubmissionStatus::Rejected
            };
            finalized.verified_at = Some(now);
            finalized.updated_at = now;
            finalized.lecturer_id = Some(reviewer.lecturer_id.clone());
            finalized.lecturer_name = Some(reviewer.name.clone());
            finalized.verification_notes = Some(decision.comments.clone());
            // Credential linkage only attaches to approvals
            finalized.certificate_id = if decision.approved {
                decision.certificate_id.clone()
            } else {
                None
            };

            match self
                .store
                .record_verification(verification, current.version, finalized)
                .await
            {
                Ok((recorded, updated)) => {
                    tracing::info!(
                        submission_id = %submission_id,
                        lecturer_id = %recorded.lecturer_id,
                        approved = recorded.approved,
                        status = %updated.status,
                        "Recorded verification"
                    );
                    return Ok((recorded, updated));
                }
                // Lost the race; re-read. The next pass reports
                // AlreadyVerified for the winner's terminal record.
                Err(StorageError::Conflict(_)) => continue,
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// The verification recorded for a submission, if any
    pub async fn verification_for(
        &self,
        submission_id: &SubmissionId,
    ) -> SprintResult<Option<LecturerVerification>> {
        Ok(self.store.get_verification(submission_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprint_storage::{CreateOutcome, InMemorySprintStorage, SubmissionStore};
    use sprint_types::{CertificateId, LecturerId, ProjectId, StudentId};

    fn reviewer() -> ReviewerIdentity {
        ReviewerIdentity {
            lecturer_id: LecturerId::new("l1"),
            name: "Dr. Reviewer".to_string(),
            email: "l1@praxis.example".to_string(),
        }
    }

    async fn submitted_submission(
        store: &Arc<InMemorySprintStorage>,
    ) -> ProjectSubmission {
        let sub = ProjectSubmission::start(ProjectId::new("p1"), StudentId::new("s1"));
        let created = match store.create_submission(sub).await.unwrap() {
            CreateOutcome::Created(s) => s,
            CreateOutcome::Existing(s) => s,
        };

        let mut submitted = created.clone();
        submitted.deliverable_link = "https://github.com/s1/p1".to_string();
        submitted.impact_statement = "Shipped it".to_string();
        submitted.feedback_revealed = true;
        submitted.status = SubmissionStatus::Submitted;
        submitted.submitted_at = Some(Utc::now());
        store
            .update_submission(created.version, submitted)
            .await
            .unwrap()
    }

    fn recorder(store: &Arc<InMemorySprintStorage>) -> VerificationRecorder {
        VerificationRecorder::new(store.clone() as Arc<dyn SprintStorage>)
    }

    #[tokio::test]
    async fn test_approval_attaches_certificate() {
        let store = Arc::new(InMemorySprintStorage::new());
        let sub = submitted_submission(&store).await;
        let recorder = recorder(&store);

        let decision =
            ReviewDecision::approve("Excellent").with_certificate(CertificateId::new("cert-42"));
        let (recorded, updated) = recorder
            .verify(&sub.id, reviewer(), IntegrityAttestations::all(), decision)
            .await
            .unwrap();

        assert!(recorded.approved);
        assert_eq!(updated.status, SubmissionStatus::Verified);
        assert_eq!(updated.certificate_id, Some(CertificateId::new("cert-42")));
        assert_eq!(updated.lecturer_name.as_deref(), Some("Dr. Reviewer"));
        assert!(updated.verified_at.is_some());
    }

    #[tokio::test]
    async fn test_rejection_never_attaches_certificate() {
        let store = Arc::new(InMemorySprintStorage::new());
        let sub = submitted_submission(&store).await;
        let recorder = recorder(&store);

        let decision = ReviewDecision::reject("Requirements unmet")
            .with_certificate(CertificateId::new("cert-42"));
        let (recorded, updated) = recorder
            .verify(&sub.id, reviewer(), IntegrityAttestations::all(), decision)
            .await
            .unwrap();

        assert!(!recorded.approved);
        assert_eq!(updated.status, SubmissionStatus::Rejected);
        assert!(updated.certificate_id.is_none());
        assert_eq!(
            updated.verification_notes.as_deref(),
            Some("Requirements unmet")
        );
    }

    #[tokio::test]
    async fn test_rejection_still_requires_all_attestations() {
        let store = Arc::new(InMemorySprintStorage::new());
        let sub = submitted_submission(&store).await;
        let recorder = recorder(&store);

        let partial = IntegrityAttestations {
            functionality_verified: true,
            skill_level_verified: false,
            original_work_verified: true,
        };
        let err = recorder
            .verify(&sub.id, reviewer(), partial, ReviewDecision::reject("nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, SprintError::IntegrityChecksIncomplete));

        // Submission is untouched
        let unchanged = store.get_submission(&sub.id).await.unwrap().unwrap();
        assert_eq!(unchanged.status, SubmissionStatus::Submitted);
    }

    #[tokio::test]
    async fn test_second_verification_fails_already_verified() {
        let store = Arc::new(InMemorySprintStorage::new());
        let sub = submitted_submission(&store).await;
        let recorder = recorder(&store);

        recorder
            .verify(
                &sub.id,
                reviewer(),
                IntegrityAttestations::all(),
                ReviewDecision::approve("Great"),
            )
            .await
            .unwrap();

        // A second decision fails whatever its approved flag
        let err = recorder
            .verify(
                &sub.id,
                reviewer(),
                IntegrityAttestations::all(),
                ReviewDecision::reject("Changed my mind"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SprintError::AlreadyVerified(_)));
    }

    #[tokio::test]
    async fn test_in_progress_submission_is_not_verifiable() {
        let store = Arc::new(InMemorySprintStorage::new());
        let sub = ProjectSubmission::start(ProjectId::new("p1"), StudentId::new("s1"));
        let created = store
            .create_submission(sub)
            .await
            .unwrap()
            .into_submission();
        let recorder = recorder(&store);

        let err = recorder
            .verify(
                &created.id,
                reviewer(),
                IntegrityAttestations::all(),
                ReviewDecision::approve("Too eager"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SprintError::NotSubmitted(_)));
    }

    #[tokio::test]
    async fn test_unknown_submission() {
        let store = Arc::new(InMemorySprintStorage::new());
        let recorder = recorder(&store);

        let err = recorder
            .verify(
                &SubmissionId::new("ghost"),
                reviewer(),
                IntegrityAttestations::all(),
                ReviewDecision::approve("?"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SprintError::SubmissionNotFound(_)));
    }
}
