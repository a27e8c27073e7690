//! Account registration handlers

use crate::api::state::AppState;
use crate::error::ApiResult;
use axum::{extract::State, Json};
use sprint_identity::{Account, RegistrationRequest};

/// Register a student or lecturer account
pub async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<RegistrationRequest>,
) -> ApiResult<Json<Account>> {
    let account = state.service.register_account(request)?;
    Ok(Json(account))
}
