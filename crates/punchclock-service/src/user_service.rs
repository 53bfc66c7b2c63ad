//! User lookups.

use crate::dto::UserResponse;
use async_trait::async_trait;
use punchclock_core::{Email, PunchError, PunchResult};
use punchclock_repository::UserRepository;
use std::sync::Arc;
use tracing::debug;

/// User service trait.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Gets a user by email address.
    async fn get_by_email(&self, email: &str) -> PunchResult<UserResponse>;
}

/// User service implementation.
pub struct UserServiceImpl {
    user_repository: Arc<dyn UserRepository>,
}

impl UserServiceImpl {
    /// Creates a new user service.
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn get_by_email(&self, email: &str) -> PunchResult<UserResponse> {
        debug!("Getting user by email: {}", email);

        let email = Email::new(email)?;
        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| PunchError::not_found("User", &email))?;

        Ok(UserResponse::from(user))
    }
}
