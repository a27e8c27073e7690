//! Project submissions and their lifecycle status
//!
//! A submission is one student's run at one project. It is created by
//! `start`, mutated while `in_progress`, transitions once to `submitted`,
//! and at most once more to a terminal state driven by exactly one
//! lecturer verification.

use crate::{
    CertificateId, DeliverableId, LecturerId, ProjectId, SprintError, SprintResult, StudentId,
    SubmissionId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Hard upper bound on the impact statement, measured in characters.
/// Longer values are rejected at the boundary; truncation is never performed.
pub const MAX_IMPACT_STATEMENT_CHARS: usize = 200;

/// Lifecycle status of a persisted submission.
///
/// Absence of a row means "not started" — that state is derived in queries
/// (see [`TrackedStatus`]), never stored as a sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    InProgress,
    Submitted,
    Verified,
    Rejected,
}

impl SubmissionStatus {
    /// Whether no further transition is defined from this status
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionStatus::Verified | SubmissionStatus::Rejected)
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SubmissionStatus::InProgress => "in_progress",
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::Verified => "verified",
            SubmissionStatus::Rejected => "rejected",
        };
        write!(f, "{s}")
    }
}

/// Status of a `(project, student)` pair as seen by callers.
///
/// `NotStarted` is the answer when no submission row exists for the pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedStatus {
    NotStarted,
    Recorded(SubmissionStatus),
}

/// Partial update to a submission's gating fields.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FieldUpdates {
    pub deliverable_link: Option<String>,
    pub impact_statement: Option<String>,
}

/// One student's run at one project.
///
/// The `(project_id, student_id)` pair is unique: at most one submission per
/// student per project ever exists. `version` is the optimistic-concurrency
/// guard; every store write compares and bumps it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProjectSubmission {
    pub id: SubmissionId,
    pub project_id: ProjectId,
    pub student_id: StudentId,
    pub status: SubmissionStatus,

    /// Personal checklist of finished deliverables. Informational only,
    /// never consulted by the submit gate.
    pub completed_deliverables: BTreeSet<DeliverableId>,

    /// Whether the student has revealed the stakeholder feedback.
    /// Irreversible once set.
    pub feedback_revealed: bool,
    pub deliverable_link: String,
    pub impact_statement: String,

    pub started_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub verified_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,

    pub lecturer_id: Option<LecturerId>,
    pub lecturer_name: Option<String>,
    pub verification_notes: Option<String>,
    pub certificate_id: Option<CertificateId>,

    /// Optimistic-concurrency version, bumped on every store write
    pub version: u64,
}

impl ProjectSubmission {
    /// Create a fresh `in_progress` submission with empty tracking fields
    pub fn start(project_id: ProjectId, student_id: StudentId) -> Self {
        let now = Utc::now();
        Self {
            id: SubmissionId::generate(),
            project_id,
            student_id,
            status: SubmissionStatus::InProgress,
            completed_deliverables: BTreeSet::new(),
            feedback_revealed: false,
            deliverable_link: String::new(),
            impact_statement: String::new(),
            started_at: now,
            submitted_at: None,
            verified_at: None,
            updated_at: now,
            lecturer_id: None,
            lecturer_name: None,
            verification_notes: None,
            certificate_id: None,
            version: 0,
        }
    }

    /// Whether the tracking and gating fields may still change
    pub fn is_mutable(&self) -> bool {
        self.status == SubmissionStatus::InProgress
    }

    /// Validate an impact statement against the character bound.
    ///
    /// The bound counts characters, not bytes, so multibyte text is not
    /// penalized.
    pub fn validate_impact_statement(statement: &str) -> SprintResult<()> {
        let length = statement.chars().count();
        if length > MAX_IMPACT_STATEMENT_CHARS {
            return Err(SprintError::ImpactStatementTooLong { length });
        }
        Ok(())
    }
}
