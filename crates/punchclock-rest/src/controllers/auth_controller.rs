//! Login and token identity controller.

use crate::{
    extractors::{BearerToken, ValidatedJson},
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use punchclock_core::ErrorResponse;
use punchclock_service::{IdentityResponse, LoginRequest, LoginResponse};
use tracing::debug;

/// Creates the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/auth/me", get(me))
}

/// Log in with an identity token and open a session.
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Missing token", body = ErrorResponse),
        (status = 401, description = "Token rejected", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    debug!("Login request");

    let response = state.auth_service.login(request).await?;
    ok(response)
}

/// Describe the caller's bearer identity token.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Token accepted", body = IdentityResponse),
        (status = 401, description = "Missing or rejected token", body = ErrorResponse)
    )
)]
pub async fn me(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> ApiResult<IdentityResponse> {
    let response = state.auth_service.identify(&token).await?;
    ok(response)
}
