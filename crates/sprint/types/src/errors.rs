//! Error taxonomy for sprint operations
//!
//! Every failure here stems from a violated precondition, not infrastructure
//! flakiness: nothing is retried automatically, and retrying without changing
//! the input reproduces the same error. Each variant carries a stable kind
//! (for programmatic handling) and one actionable message (for people).

use crate::{DeliverableId, ProjectId, SubmissionId};
use crate::submission::MAX_IMPACT_STATEMENT_CHARS;

/// Errors that can occur in sprint operations
#[derive(Debug, thiserror::Error)]
pub enum SprintError {
    #[error("Project not found: {0}")]
    ProjectNotFound(ProjectId),

    #[error("Submission not found: {0}")]
    SubmissionNotFound(SubmissionId),

    #[error("Deliverable {deliverable} does not belong to project {project}")]
    DeliverableNotFound {
        project: ProjectId,
        deliverable: DeliverableId,
    },

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Add a link to your deliverable before submitting")]
    MissingDeliverable,

    #[error("Write an impact statement before submitting")]
    MissingImpactStatement,

    #[error("Reveal and review the stakeholder feedback before submitting")]
    FeedbackNotReviewed,

    #[error(
        "Impact statement is {length} characters; the limit is {MAX_IMPACT_STATEMENT_CHARS}"
    )]
    ImpactStatementTooLong { length: usize },

    #[error("Affirm all three integrity checks before recording a decision")]
    IntegrityChecksIncomplete,

    #[error("Submission {0} has already been verified")]
    AlreadyVerified(SubmissionId),

    #[error("Submission {0} is not awaiting verification")]
    NotSubmitted(SubmissionId),

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Storage failure: {0}")]
    Storage(String),
}

impl SprintError {
    /// Stable machine-readable kind, independent of the message text
    pub fn kind(&self) -> &'static str {
        match self {
            SprintError::ProjectNotFound(_) => "project_not_found",
            SprintError::SubmissionNotFound(_) => "submission_not_found",
            SprintError::DeliverableNotFound { .. } => "deliverable_not_found",
            SprintError::InvalidTransition(_) => "invalid_transition",
            SprintError::MissingDeliverable => "missing_deliverable",
            SprintError::MissingImpactStatement => "missing_impact_statement",
            SprintError::FeedbackNotReviewed => "feedback_not_reviewed",
            SprintError::ImpactStatementTooLong { .. } => "impact_statement_too_long",
            SprintError::IntegrityChecksIncomplete => "integrity_checks_incomplete",
            SprintError::AlreadyVerified(_) => "already_verified",
            SprintError::NotSubmitted(_) => "not_submitted",
            SprintError::Unauthorized(_) => "unauthorized",
            SprintError::Storage(_) => "storage",
        }
    }
}

/// Result type alias for sprint operations
pub type SprintResult<T> = Result<T, SprintError>;
