//! Error types for the sprint daemon

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sprint_types::SprintError;
use thiserror::Error;

/// Daemon-level errors
#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Seed error: {0}")]
    Seed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for daemon operations
pub type DaemonResult<T> = Result<T, DaemonError>;

/// API error wrapper: carries the domain error out as a status code plus a
/// `{ error, message }` body, keeping the stable kind distinct from the text.
#[derive(Debug)]
pub struct ApiError(pub SprintError);

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

impl From<SprintError> for ApiError {
    fn from(err: SprintError) -> Self {
        Self(err)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SprintError::ProjectNotFound(_)
            | SprintError::SubmissionNotFound(_)
            | SprintError::DeliverableNotFound { .. } => StatusCode::NOT_FOUND,
            SprintError::Unauthorized(_) => StatusCode::FORBIDDEN,
            SprintError::InvalidTransition(_)
            | SprintError::NotSubmitted(_)
            | SprintError::AlreadyVerified(_) => StatusCode::CONFLICT,
            SprintError::MissingDeliverable
            | SprintError::MissingImpactStatement
            | SprintError::FeedbackNotReviewed
            | SprintError::ImpactStatementTooLong { .. }
            | SprintError::IntegrityChecksIncomplete => StatusCode::UNPROCESSABLE_ENTITY,
            SprintError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }

        let body = ErrorBody {
            error: self.0.kind(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_failures_are_unprocessable() {
        let response = ApiError(SprintError::FeedbackNotReviewed).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_duplicate_verification_is_conflict() {
        let err = SprintError::AlreadyVerified(sprint_types::SubmissionId::new("x"));
        assert_eq!(ApiError(err).into_response().status(), StatusCode::CONFLICT);
    }
}
