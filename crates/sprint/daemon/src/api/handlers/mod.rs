//! Request handlers

mod accounts;
mod health;
mod projects;
mod submissions;
mod verifications;

pub use accounts::*;
pub use health::*;
pub use projects::*;
pub use submissions::*;
pub use verifications::*;

use crate::error::ApiError;
use axum::http::HeaderMap;
use sprint_types::{AccountId, SprintError};

/// Header carrying the caller's account reference. Authentication happens
/// upstream; the daemon only resolves the reference to a role.
pub const ACCOUNT_HEADER: &str = "x-account-id";

/// Extract the acting account from the request headers
pub fn account_id(headers: &HeaderMap) -> Result<AccountId, ApiError> {
    let value = headers
        .get(ACCOUNT_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            ApiError(SprintError::Unauthorized(format!(
                "missing {ACCOUNT_HEADER} header"
            )))
        })?;
    Ok(AccountId::new(value))
}
