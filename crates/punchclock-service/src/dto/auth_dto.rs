//! Login DTOs.

use super::UserResponse;
use chrono::{DateTime, Utc};
use punchclock_core::SessionId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Login with an identity token issued by the OAuth/OpenID provider.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(alias = "token", alias = "id_token")]
    #[validate(length(min = 1, message = "Identity token is required"))]
    pub id_token: String,
}

/// Result of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub session_id: SessionId,
    pub expires_at: DateTime<Utc>,
    pub expires_in: u64,
    pub user: UserResponse,
    /// True when this login created the user.
    pub new_user: bool,
}

/// Identity carried by a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResponse {
    /// The token's `sub` claim.
    pub user_id: String,
    pub email: String,
}
