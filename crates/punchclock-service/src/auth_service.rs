//! Login with an identity token.

use crate::dto::{IdentityResponse, LoginRequest, LoginResponse, UserResponse};
use crate::session_service::SessionService;
use async_trait::async_trait;
use punchclock_core::{
    Clock, Email, PunchError, PunchResult, Role, User, UserProfile, ValidateExt,
};
use punchclock_repository::UserRepository;
use punchclock_security::jwt::{IdentityClaims, IdentityTokenDecoder};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Authentication service trait.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Logs in with an identity token, creating the user on first login.
    async fn login(&self, request: LoginRequest) -> PunchResult<LoginResponse>;

    /// Decodes a bearer identity token without touching users or sessions.
    async fn identify(&self, token: &str) -> PunchResult<IdentityResponse>;
}

/// Authentication service implementation.
pub struct AuthServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    session_service: Arc<dyn SessionService>,
    decoder: Arc<IdentityTokenDecoder>,
    clock: Arc<dyn Clock>,
    new_user_role: Role,
}

impl AuthServiceImpl {
    /// Creates a new authentication service. First-time users get `new_user_role`.
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        session_service: Arc<dyn SessionService>,
        decoder: Arc<IdentityTokenDecoder>,
        clock: Arc<dyn Clock>,
        new_user_role: Role,
    ) -> Self {
        Self {
            user_repository,
            session_service,
            decoder,
            clock,
            new_user_role,
        }
    }

    /// Finds the user for `email`, creating it when absent.
    async fn find_or_create(&self, email: Email, claims: &IdentityClaims) -> PunchResult<(User, bool)> {
        if let Some(user) = self.user_repository.find_by_email(&email).await? {
            return Ok((self.sync_name(user, claims).await?, false));
        }

        let user = User::from_identity(email, claims.name.as_deref(), self.new_user_role.clone());
        match self.user_repository.save(&user).await {
            Ok(saved) => {
                info!(user_id = %saved.id, "User created on first login");
                Ok((saved, true))
            }
            // Lost a race with a concurrent first login.
            Err(PunchError::Conflict(_)) => {
                warn!("User {} was created concurrently", user.email);
                let existing = self
                    .user_repository
                    .find_by_email(&user.email)
                    .await?
                    .ok_or_else(|| PunchError::not_found("User", &user.email))?;
                Ok((existing, false))
            }
            Err(e) => Err(e),
        }
    }

    /// Adopts the token's display name when it changed.
    async fn sync_name(&self, mut user: User, claims: &IdentityClaims) -> PunchResult<User> {
        let Some(name) = claims.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) else {
            return Ok(user);
        };
        if name == user.name {
            return Ok(user);
        }

        if self.user_repository.update_name(user.id, name).await? {
            debug!(user_id = %user.id, "Display name updated from identity token");
            user.rename(name);
        }
        Ok(user)
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn login(&self, request: LoginRequest) -> PunchResult<LoginResponse> {
        request.validate_request()?;

        let claims = self.decoder.decode(&request.id_token)?;
        debug!("Login attempt for: {}", claims.email());

        let email = Email::new(claims.email())
            .map_err(|e| PunchError::InvalidToken(e.to_string()))?;
        let (user, new_user) = self.find_or_create(email, &claims).await?;

        let profile = UserProfile {
            uid: claims.sub.clone(),
            provider_id: claims.iss.clone().unwrap_or_default(),
            ..UserProfile::from(&user)
        };
        let session = self
            .session_service
            .open(&user, profile, request.id_token.trim())
            .await?;

        info!(user_id = %user.id, "User logged in");
        Ok(LoginResponse {
            session_id: session.session_id,
            expires_at: session.expires_at,
            expires_in: session.remaining_secs(self.clock.now_utc()),
            user: UserResponse::from(user),
            new_user,
        })
    }

    async fn identify(&self, token: &str) -> PunchResult<IdentityResponse> {
        let claims = self.decoder.decode(token)?;
        debug!(sub = %claims.sub, "Identity token decoded");
        Ok(IdentityResponse {
            email: claims.email().to_string(),
            user_id: claims.sub,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::InMemorySessionStore;
    use crate::session_service::SessionServiceImpl;
    use chrono::Utc;
    use punchclock_config::SecurityConfig;
    use punchclock_core::SystemClock;
    use punchclock_repository::InMemoryUserRepository;
    use std::time::Duration;

    struct Fixture {
        auth: AuthServiceImpl,
        sessions: Arc<SessionServiceImpl>,
        users: Arc<InMemoryUserRepository>,
        decoder: Arc<IdentityTokenDecoder>,
    }

    fn fixture(users: Vec<User>) -> Fixture {
        let users = Arc::new(InMemoryUserRepository::with_users(users));
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let sessions = Arc::new(SessionServiceImpl::new(
            users.clone(),
            Arc::new(InMemorySessionStore::new()),
            clock.clone(),
            Duration::from_secs(600),
        ));
        let decoder = Arc::new(IdentityTokenDecoder::new(Arc::new(SecurityConfig {
            token_secret: "auth-service-test-secret".to_string(),
            ..Default::default()
        })));
        let auth = AuthServiceImpl::new(
            users.clone(),
            sessions.clone(),
            decoder.clone(),
            clock,
            Role::Staff,
        );
        Fixture {
            auth,
            sessions,
            users,
            decoder,
        }
    }

    fn token(f: &Fixture, email: &str, name: Option<&str>) -> LoginRequest {
        let mut claims = IdentityClaims::new("sub", email, chrono::Duration::hours(1));
        claims.name = name.map(ToString::to_string);
        LoginRequest {
            id_token: f.decoder.issue(&claims).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_first_login_creates_user() {
        let f = fixture(Vec::new());
        let response = f.auth.login(token(&f, "Aiko@Example.com", Some("Aiko"))).await.unwrap();

        assert!(response.new_user);
        assert_eq!(response.user.email, "aiko@example.com");
        assert_eq!(response.user.name, "Aiko");
        assert_eq!(response.user.role, "staff");
        assert!(response.expires_at > Utc::now());

        let session = f.sessions.resolve(&response.session_id.to_string()).await.unwrap();
        assert_eq!(session.user_id, Some(response.user.id));
        assert_eq!(session.profile.uid, "sub");
        assert_eq!(session.profile.display_name.as_deref(), Some("Aiko"));
    }

    #[tokio::test]
    async fn test_second_login_reuses_user() {
        let f = fixture(Vec::new());
        let first = f.auth.login(token(&f, "aiko@example.com", None)).await.unwrap();
        let second = f.auth.login(token(&f, "aiko@example.com", None)).await.unwrap();

        assert!(!second.new_user);
        assert_eq!(first.user.id, second.user.id);
        assert_eq!(second.user.name, "aiko");
        assert_ne!(first.session_id, second.session_id);
    }

    #[tokio::test]
    async fn test_login_updates_changed_name() {
        let existing = User::new(Email::new("ken@example.com").unwrap(), "Ken", Role::Manager);
        let id = existing.id;
        let f = fixture(vec![existing]);

        let response = f.auth.login(token(&f, "ken@example.com", Some("Ken Sato"))).await.unwrap();
        assert_eq!(response.user.name, "Ken Sato");
        assert_eq!(response.user.role, "manager");
        assert_eq!(f.users.find_by_id(id).await.unwrap().unwrap().name, "Ken Sato");
    }

    #[tokio::test]
    async fn test_login_rejects_bad_tokens() {
        let f = fixture(Vec::new());
        let err = f
            .auth
            .login(LoginRequest {
                id_token: "not.a.jwt".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);

        let err = f
            .auth
            .login(LoginRequest {
                id_token: String::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);

        let err = f.auth.login(token(&f, "not-an-email", None)).await.unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TOKEN");
    }

    #[tokio::test]
    async fn test_identify_reads_claims_only() {
        let f = fixture(Vec::new());
        let request = token(&f, "mio@example.com", Some("Mio"));

        let identity = f.auth.identify(&request.id_token).await.unwrap();
        assert_eq!(identity.user_id, "sub");
        assert_eq!(identity.email, "mio@example.com");
        assert!(f.users.find_by_email(&Email::new("mio@example.com").unwrap()).await.unwrap().is_none());

        let err = f.auth.identify("garbage").await.unwrap_err();
        assert_eq!(err.status_code(), 401);
    }
}
