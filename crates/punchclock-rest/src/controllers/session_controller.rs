//! Session controller.

use crate::{
    extractors::ValidatedJson,
    responses::{created, no_content, ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use punchclock_core::ErrorResponse;
use punchclock_service::{CreateSessionRequest, SessionResponse};
use tracing::debug;

/// Creates the session router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/session", post(create_session))
        .route("/session/:session_id", get(get_session).delete(delete_session))
}

/// Store a session for a signed-in provider profile.
#[utoipa::path(
    post,
    path = "/api/session",
    tag = "sessions",
    request_body = CreateSessionRequest,
    responses(
        (status = 201, description = "Session stored", body = SessionResponse),
        (status = 400, description = "Invalid request or email", body = ErrorResponse)
    )
)]
pub async fn create_session(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    debug!(
        "Create session request for: {}",
        request.profile.email().unwrap_or("<no email>")
    );

    let response = state.session_service.create(request).await?;
    Ok(created(response))
}

/// Describe a live session.
#[utoipa::path(
    get,
    path = "/api/session/{session_id}",
    tag = "sessions",
    params(("session_id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Session is live", body = SessionResponse),
        (status = 401, description = "Unknown or expired session", body = ErrorResponse)
    )
)]
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<SessionResponse> {
    let response = state.session_service.get(&session_id).await?;
    ok(response)
}

/// Log out by deleting the session.
#[utoipa::path(
    delete,
    path = "/api/session/{session_id}",
    tag = "sessions",
    params(("session_id" = String, Path, description = "Session id")),
    responses(
        (status = 204, description = "Session deleted"),
        (status = 404, description = "No such session", body = ErrorResponse)
    )
)]
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete session request: {}", session_id);

    state.session_service.revoke(&session_id).await?;
    Ok(no_content())
}
