//! User entity.

use crate::domain::value_objects::{Email, Role};
use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A person who punches in and out. Keyed by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,

    /// User's email address.
    pub email: Email,

    /// Display name.
    pub name: String,

    /// User's role, which decides the hourly rate.
    pub role: Role,

    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user.
    #[must_use]
    pub fn new(email: Email, name: impl Into<String>, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            email,
            name: name.into(),
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a user from identity-token claims.
    ///
    /// A blank or missing name falls back to the local part of the email.
    #[must_use]
    pub fn from_identity(email: Email, name: Option<&str>, role: Role) -> Self {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map_or_else(|| email.local_part().to_string(), ToString::to_string);
        Self::new(email, name, role)
    }

    /// Changes the display name.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }
}
