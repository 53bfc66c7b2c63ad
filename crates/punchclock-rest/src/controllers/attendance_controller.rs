//! Punch and records controller.

use crate::{
    extractors::OptionalJson,
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use punchclock_core::ErrorResponse;
use punchclock_service::{PunchRequest, PunchResponse, RecordsResponse};
use tracing::debug;

/// Creates the attendance router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/punch/:session_id", get(punch).post(punch))
        .route("/records/:session_id/:page", get(records))
}

/// Punch in or out. Without a body the punch toggles.
#[utoipa::path(
    post,
    path = "/api/punch/{session_id}",
    tag = "attendance",
    params(("session_id" = String, Path, description = "Session id")),
    request_body(content = PunchRequest, description = "Optional explicit direction"),
    responses(
        (status = 200, description = "Punch recorded", body = PunchResponse),
        (status = 401, description = "Unknown or expired session", body = ErrorResponse),
        (status = 409, description = "Punch conflicts with the current state", body = ErrorResponse)
    )
)]
pub async fn punch(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    OptionalJson(request): OptionalJson<PunchRequest>,
) -> ApiResult<PunchResponse> {
    debug!(action = ?request.action, "Punch request");

    let response = state.attendance_service.punch(&session_id, request).await?;
    ok(response)
}

/// Page through work records with salaries.
#[utoipa::path(
    get,
    path = "/api/records/{session_id}/{page}",
    tag = "attendance",
    params(
        ("session_id" = String, Path, description = "Session id"),
        ("page" = String, Path, description = "Page number, starting at 1. Anything else is page 1")
    ),
    responses(
        (status = 200, description = "A page of records", body = RecordsResponse),
        (status = 401, description = "Unknown or expired session", body = ErrorResponse)
    )
)]
pub async fn records(
    State(state): State<AppState>,
    Path((session_id, page)): Path<(String, String)>,
) -> ApiResult<RecordsResponse> {
    let page = parse_page(&page);
    debug!(page, "Records request");

    let response = state.attendance_service.records(&session_id, page).await?;
    ok(response)
}

/// Reads the leading digits of the path segment. Anything else is page 1.
fn parse_page(page: &str) -> usize {
    let digits: String = page
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok().filter(|&p| p > 0).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page() {
        assert_eq!(parse_page("3"), 3);
        assert_eq!(parse_page("12abc"), 12);
        assert_eq!(parse_page("0"), 1);
        assert_eq!(parse_page("-1"), 1);
        assert_eq!(parse_page("two"), 1);
        assert_eq!(parse_page(""), 1);
    }
}
