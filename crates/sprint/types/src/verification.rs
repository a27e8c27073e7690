//! Lecturer verifications: the immutable audit trail of terminal transitions
//!
//! Exactly one verification row can ever exist per submission. It is created
//! once, never mutated or deleted. Approval and rejection both require the
//! full set of integrity attestations — rejecting without having done the
//! review is not a shortcut the protocol offers.

use crate::{
    CertificateId, LecturerId, ProjectId, StudentId, SubmissionId, VerificationId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The reviewer's boolean affirmations of each integrity criterion.
///
/// All three must be affirmed before any decision is recorded, regardless of
/// whether that decision approves or rejects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityAttestations {
    pub functionality_verified: bool,
    pub skill_level_verified: bool,
    pub original_work_verified: bool,
}

impl IntegrityAttestations {
    /// Affirm every criterion
    pub fn all() -> Self {
        Self {
            functionality_verified: true,
            skill_level_verified: true,
            original_work_verified: true,
        }
    }

    /// Whether every criterion has been affirmed
    pub fn all_affirmed(&self) -> bool {
        self.functionality_verified && self.skill_level_verified && self.original_work_verified
    }
}

/// The identity a verification is recorded under.
///
/// Resolved by the account directory; the recorder itself performs no
/// authentication.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewerIdentity {
    pub lecturer_id: LecturerId,
    pub name: String,
    pub email: String,
}

/// A reviewer's decision payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReviewDecision {
    pub approved: bool,
    pub comments: String,
    /// Credential linkage, stored only when the decision approves.
    /// Opaque to this core; existence is the credential service's contract.
    pub certificate_id: Option<CertificateId>,
    pub digital_badge_url: Option<String>,
}

impl ReviewDecision {
    pub fn approve(comments: impl Into<String>) -> Self {
        Self {
            approved: true,
            comments: comments.into(),
            certificate_id: None,
            digital_badge_url: None,
        }
    }

    pub fn reject(comments: impl Into<String>) -> Self {
        Self {
            approved: false,
            comments: comments.into(),
            certificate_id: None,
            digital_badge_url: None,
        }
    }

    pub fn with_certificate(mut self, certificate_id: CertificateId) -> Self {
        self.certificate_id = Some(certificate_id);
        self
    }

    pub fn with_badge_url(mut self, url: impl Into<String>) -> Self {
        self.digital_badge_url = Some(url.into());
        self
    }
}

/// The immutable record of one reviewer decision.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LecturerVerification {
    pub id: VerificationId,
    /// Unique — at most one verification per submission, enforced by the store
    pub submission_id: SubmissionId,
    pub project_id: ProjectId,
    pub student_id: StudentId,
    pub lecturer_id: LecturerId,
    pub lecturer_name: String,
    pub lecturer_email: String,
    pub functionality_verified: bool,
    pub skill_level_verified: bool,
    pub original_work_verified: bool,
    pub approved: bool,
    pub comments: String,
    pub digital_badge_url: Option<String>,
    pub verified_at: DateTime<Utc>,
}
