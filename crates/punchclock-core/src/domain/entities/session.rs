//! Session entity stored in the key-value store.

use crate::domain::value_objects::UserProfile;
use crate::{SessionId, User, UserId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A signed-in session. Serialized as JSON into the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: SessionId,
    /// Account the profile's email resolved to when the session was stored.
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub profile: UserProfile,
    /// The identity or access token the client presented, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Creates an anonymous session that expires `ttl` after `now`.
    #[must_use]
    pub fn new(profile: UserProfile, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            session_id: SessionId::new(),
            user_id: None,
            profile,
            token: None,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Links the session to an account.
    #[must_use]
    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Attaches the client's token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = (!token.trim().is_empty()).then_some(token);
        self
    }

    /// Email from the stored profile.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.profile.email()
    }

    /// Returns true once `now` has reached the expiry.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Seconds until expiry, zero when already expired.
    #[must_use]
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> u64 {
        u64::try_from((self.expires_at - now).num_seconds()).unwrap_or(0)
    }
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            display_name: Some(user.name.clone()),
            email: Some(user.email.as_str().to_string()),
            ..Self::default()
        }
    }
}
