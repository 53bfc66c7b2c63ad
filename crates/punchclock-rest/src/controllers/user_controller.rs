//! User lookup controller.

use crate::{
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use punchclock_service::UserResponse;
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new().route("/users/:email", get(get_user))
}

/// Get a user by email address.
#[utoipa::path(
    get,
    path = "/api/users/{email}",
    tag = "users",
    params(("email" = String, Path, description = "Email address of the user")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Malformed email", body = punchclock_core::ErrorResponse),
        (status = 404, description = "No such user", body = punchclock_core::ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<UserResponse> {
    debug!("Get user request: {}", email);

    let response = state.user_service.get_by_email(&email).await?;
    ok(response)
}
