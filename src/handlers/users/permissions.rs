use std::sync::Arc;

use axum::extract::{Path, State};
use serde_json::Value;

use crate::error::ApiError;
use crate::identity::IdentityService;
use crate::response::{ApiResponse, ApiResult};

/// GET /users/:username - look up a user's permission set
///
/// The payload shape is owned by the identity service and passed through
/// unchanged. Validation happens before the upstream call so an empty
/// username never reaches the wire.
pub async fn permissions_get(
    State(identity): State<Arc<dyn IdentityService>>,
    Path(username): Path<String>,
) -> ApiResult<Value> {
    if username.trim().is_empty() {
        return Err(ApiError::bad_request("Username is required"));
    }

    let permissions = identity.get_user_permissions(&username).await?;

    Ok(ApiResponse::success(permissions))
}

/// GET /users and /users/ - the username segment was never supplied
pub async fn permissions_missing_username() -> ApiError {
    ApiError::bad_request("Username is required")
}
