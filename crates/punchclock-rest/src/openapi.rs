//! OpenAPI documentation configuration.

use crate::controllers::{HealthResponse, ReadinessResponse};
use punchclock_core::{
    ErrorResponse, FieldError, PunchKind, SessionId, UserId, UserProfile, WorkTimeId,
};
use punchclock_service::{
    CreateSessionRequest, IdentityResponse, LoginRequest, LoginResponse, PunchRequest, PunchResponse,
    RecordsResponse, SessionResponse, UserResponse, WorkRecord,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the Punchclock API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Punchclock API",
        version = "1.0.0",
        description = "Attendance tracking: sessions, punches and salaried work records",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        crate::controllers::auth_controller::login,
        crate::controllers::auth_controller::me,
        crate::controllers::user_controller::get_user,
        crate::controllers::session_controller::create_session,
        crate::controllers::session_controller::get_session,
        crate::controllers::session_controller::delete_session,
        crate::controllers::attendance_controller::punch,
        crate::controllers::attendance_controller::records,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            // Core types
            UserId,
            SessionId,
            WorkTimeId,
            PunchKind,
            UserProfile,
            ErrorResponse,
            FieldError,
            // DTOs
            LoginRequest,
            LoginResponse,
            IdentityResponse,
            UserResponse,
            CreateSessionRequest,
            SessionResponse,
            PunchRequest,
            PunchResponse,
            WorkRecord,
            RecordsResponse,
            HealthResponse,
            ReadinessResponse,
        )
    ),
    tags(
        (name = "auth", description = "Login with an identity token"),
        (name = "users", description = "User lookup"),
        (name = "sessions", description = "Session store"),
        (name = "attendance", description = "Punches and work records"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
