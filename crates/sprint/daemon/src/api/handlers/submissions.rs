//! Submission lifecycle handlers
//!
//! Student-side mutations take the actor from the `x-account-id` header and
//! pass it through as a student reference; the service enforces the role and
//! ownership.

use super::account_id;
use crate::api::state::AppState;
use crate::error::ApiResult;
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use sprint_types::{
    DeliverableId, FieldUpdates, ProjectId, ProjectSubmission, StudentId, SubmissionId,
    TrackedStatus,
};

fn student_actor(headers: &HeaderMap) -> ApiResult<StudentId> {
    let account = account_id(headers)?;
    Ok(StudentId::new(account.0))
}

/// Start a sprint against a project. Idempotent per `(project, student)`:
/// the existing submission comes back unchanged if one exists.
pub async fn start_sprint(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<ProjectSubmission>> {
    let actor = student_actor(&headers)?;
    let submission = state
        .service
        .start_sprint(&actor, &ProjectId::new(project_id))
        .await?;
    Ok(Json(submission))
}

/// Snapshot of one submission (owner or lecturer)
pub async fn get_submission(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<ProjectSubmission>> {
    let account = account_id(&headers)?;
    let actor = state.service.actor_for(&account)?;
    let submission = state
        .service
        .get_submission(&actor, &SubmissionId::new(id))
        .await?;
    Ok(Json(submission))
}

/// Flip a deliverable in the personal checklist
pub async fn toggle_deliverable(
    State(state): State<AppState>,
    Path((id, deliverable_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> ApiResult<Json<ProjectSubmission>> {
    let actor = student_actor(&headers)?;
    let submission = state
        .service
        .toggle_deliverable(
            &actor,
            &SubmissionId::new(id),
            &DeliverableId::new(deliverable_id),
        )
        .await?;
    Ok(Json(submission))
}

/// Response for the feedback reveal: the updated submission plus the text
/// the student just unlocked
#[derive(Serialize)]
pub struct RevealResponse {
    pub submission: ProjectSubmission,
    pub stakeholder_feedback: String,
}

/// Open the read-before-proceed gate on the stakeholder feedback
pub async fn reveal_feedback(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<RevealResponse>> {
    let actor = student_actor(&headers)?;
    let submission_id = SubmissionId::new(id);
    let submission = state
        .service
        .reveal_feedback(&actor, &submission_id)
        .await?;
    let stakeholder_feedback = state
        .service
        .stakeholder_feedback(&actor, &submission_id)
        .await?;
    Ok(Json(RevealResponse {
        submission,
        stakeholder_feedback,
    }))
}

/// Update the deliverable link and/or impact statement
pub async fn update_fields(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(updates): Json<FieldUpdates>,
) -> ApiResult<Json<ProjectSubmission>> {
    let actor = student_actor(&headers)?;
    let submission = state
        .service
        .update_fields(&actor, &SubmissionId::new(id), updates)
        .await?;
    Ok(Json(submission))
}

/// Run the submit gate
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<ProjectSubmission>> {
    let actor = student_actor(&headers)?;
    let submission = state
        .service
        .submit(&actor, &SubmissionId::new(id))
        .await?;
    Ok(Json(submission))
}

/// Query for the pair-status route
#[derive(Deserialize)]
pub struct PairStatusQuery {
    pub student: String,
}

/// Pair-status response
#[derive(Serialize)]
pub struct PairStatusResponse {
    pub project_id: String,
    pub student_id: String,
    pub status: TrackedStatus,
}

/// Status of a `(project, student)` pair; `not_started` when no record exists
pub async fn pair_status(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Query(query): Query<PairStatusQuery>,
    headers: HeaderMap,
) -> ApiResult<Json<PairStatusResponse>> {
    let account = account_id(&headers)?;
    let actor = state.service.actor_for(&account)?;
    let project_id = ProjectId::new(project_id);
    let student_id = StudentId::new(query.student);

    let status = state
        .service
        .status_for(&actor, &project_id, &student_id)
        .await?;
    Ok(Json(PairStatusResponse {
        project_id: project_id.to_string(),
        student_id: student_id.to_string(),
        status,
    }))
}

/// All of one student's submissions, newest-first
pub async fn list_student_submissions(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<ProjectSubmission>>> {
    let account = account_id(&headers)?;
    let actor = state.service.actor_for(&account)?;
    let submissions = state
        .service
        .submissions_for_student(&actor, &StudentId::new(id))
        .await?;
    Ok(Json(submissions))
}
