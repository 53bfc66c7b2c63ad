//! Session DTOs.

use chrono::{DateTime, Utc};
use punchclock_core::{Session, SessionId, UserId, UserProfile};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Profile of the signed-in client account, stored as a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    #[serde(flatten)]
    pub profile: UserProfile,

    /// Token the client obtained from the identity provider.
    #[serde(default)]
    #[validate(length(min = 1, message = "Token must not be empty"))]
    pub token: Option<String>,
}

/// A stored session with its profile, without the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: SessionId,
    #[serde(flatten)]
    pub profile: UserProfile,
    /// Account the profile's email belongs to, when known.
    pub user_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Seconds until the session expires.
    pub expires_in: u64,
}

impl SessionResponse {
    /// Builds the response as seen at `now`.
    #[must_use]
    pub fn from_session(session: &Session, now: DateTime<Utc>) -> Self {
        Self {
            session_id: session.session_id,
            profile: session.profile.clone(),
            user_id: session.user_id,
            created_at: session.created_at,
            expires_at: session.expires_at,
            expires_in: session.remaining_secs(now),
        }
    }
}
