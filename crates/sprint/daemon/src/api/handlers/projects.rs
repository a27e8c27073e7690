//! Project catalog handlers

use crate::api::state::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use sprint_types::{Project, ProjectId, SprintError};

/// List published briefs
pub async fn list_projects(State(state): State<AppState>) -> ApiResult<Json<Vec<Project>>> {
    Ok(Json(state.service.list_projects().await?))
}

/// Get one brief
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Project>> {
    let project = state.service.get_project(&ProjectId::new(id)).await?;
    Ok(Json(project))
}

/// Publish response
#[derive(Serialize)]
pub struct PublishResponse {
    pub id: String,
    pub published: bool,
}

/// Publish a new brief. Briefs are immutable once published; there is no
/// update or delete route.
pub async fn publish_project(
    State(state): State<AppState>,
    Json(project): Json<Project>,
) -> ApiResult<Json<PublishResponse>> {
    let id = project.id.to_string();
    state
        .catalog
        .publish(project)
        .map_err(|e| ApiError(SprintError::from(e)))?;
    Ok(Json(PublishResponse {
        id,
        published: true,
    }))
}
