//! Verification handlers

use super::account_id;
use crate::api::state::AppState;
use crate::error::ApiResult;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use sprint_types::{
    CertificateId, IntegrityAttestations, LecturerId, LecturerVerification, ProjectSubmission,
    ReviewDecision, SubmissionId,
};

fn lecturer_actor(headers: &HeaderMap) -> ApiResult<LecturerId> {
    let account = account_id(headers)?;
    Ok(LecturerId::new(account.0))
}

/// Request body for recording a verification decision
#[derive(Deserialize)]
pub struct VerifyRequest {
    pub functionality_verified: bool,
    pub skill_level_verified: bool,
    pub original_work_verified: bool,
    pub approved: bool,
    #[serde(default)]
    pub comments: String,
    pub certificate_id: Option<String>,
    pub digital_badge_url: Option<String>,
}

/// Response carrying both the immutable record and the finalized submission
#[derive(Serialize)]
pub struct VerifyResponse {
    pub verification: LecturerVerification,
    pub submission: ProjectSubmission,
}

/// Record the reviewer's decision; flips the submission terminal
pub async fn verify(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<VerifyRequest>,
) -> ApiResult<Json<VerifyResponse>> {
    let actor = lecturer_actor(&headers)?;

    let attestations = IntegrityAttestations {
        functionality_verified: request.functionality_verified,
        skill_level_verified: request.skill_level_verified,
        original_work_verified: request.original_work_verified,
    };
    let mut decision = if request.approved {
        ReviewDecision::approve(request.comments)
    } else {
        ReviewDecision::reject(request.comments)
    };
    if let Some(cert) = request.certificate_id {
        decision = decision.with_certificate(CertificateId::new(cert));
    }
    if let Some(url) = request.digital_badge_url {
        decision = decision.with_badge_url(url);
    }

    let (verification, submission) = state
        .service
        .verify(&actor, &SubmissionId::new(id), attestations, decision)
        .await?;
    Ok(Json(VerifyResponse {
        verification,
        submission,
    }))
}

/// The verification recorded for a submission, if any (lecturer-only).
/// Answers `null` when no decision has been recorded yet.
pub async fn get_verification(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<Option<LecturerVerification>>> {
    let actor = lecturer_actor(&headers)?;
    let verification = state
        .service
        .get_verification(&actor, &SubmissionId::new(id))
        .await?;
    Ok(Json(verification))
}
