//! Session lifecycle on top of the key-value store.

use crate::dto::{CreateSessionRequest, SessionResponse};
use crate::session::{session_keys, SessionStore, SessionStoreExt};
use async_trait::async_trait;
use punchclock_core::{
    Clock, Email, PunchError, PunchResult, Session, SessionId, User, UserProfile, ValidateExt,
};
use punchclock_repository::UserRepository;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Session service trait.
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Stores the client's profile as a new session.
    async fn create(&self, request: CreateSessionRequest) -> PunchResult<SessionResponse>;

    /// Stores a session for `user` holding `token`.
    async fn open(&self, user: &User, profile: UserProfile, token: &str) -> PunchResult<Session>;

    /// Looks up a live session. Malformed, unknown and expired ids are all 401.
    async fn resolve(&self, session_id: &str) -> PunchResult<Session>;

    /// Describes a live session.
    async fn get(&self, session_id: &str) -> PunchResult<SessionResponse>;

    /// Deletes a session (logout).
    async fn revoke(&self, session_id: &str) -> PunchResult<()>;
}

/// Session service implementation.
pub struct SessionServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl SessionServiceImpl {
    /// Creates a new session service whose sessions live for `ttl`.
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
        ttl: Duration,
    ) -> Self {
        Self {
            user_repository,
            store,
            clock,
            ttl,
        }
    }

    fn ttl(&self) -> PunchResult<chrono::Duration> {
        chrono::Duration::from_std(self.ttl)
            .map_err(|e| PunchError::Configuration(format!("Invalid session TTL: {}", e)))
    }

    async fn persist(&self, session: &Session) -> PunchResult<()> {
        self.store
            .set(&session_keys::session(session.session_id), session, self.ttl)
            .await
    }

    fn parse_id(session_id: &str) -> PunchResult<SessionId> {
        SessionId::parse(session_id)
            .map_err(|_| PunchError::SessionNotFound(session_id.trim().to_string()))
    }
}

#[async_trait]
impl SessionService for SessionServiceImpl {
    async fn create(&self, request: CreateSessionRequest) -> PunchResult<SessionResponse> {
        request.validate_request()?;

        let user_id = match request.profile.email() {
            Some(email) => {
                let email = Email::new(email)?;
                self.user_repository.find_by_email(&email).await?.map(|u| u.id)
            }
            None => None,
        };

        let now = self.clock.now_utc();
        let mut session = Session::new(request.profile, now, self.ttl()?);
        if let Some(user_id) = user_id {
            session = session.with_user(user_id);
        }
        if let Some(token) = request.token {
            session = session.with_token(token);
        }

        self.persist(&session).await?;
        info!(session_id = %session.session_id, linked = user_id.is_some(), "Session stored");
        Ok(SessionResponse::from_session(&session, now))
    }

    async fn open(&self, user: &User, profile: UserProfile, token: &str) -> PunchResult<Session> {
        let session = Session::new(profile, self.clock.now_utc(), self.ttl()?)
            .with_user(user.id)
            .with_token(token);

        self.persist(&session).await?;
        info!(session_id = %session.session_id, user_id = %user.id, "Session opened");
        Ok(session)
    }

    async fn resolve(&self, session_id: &str) -> PunchResult<Session> {
        let id = Self::parse_id(session_id)?;
        let key = session_keys::session(id);

        let session: Session = self
            .store
            .get(&key)
            .await?
            .ok_or_else(|| PunchError::SessionNotFound(id.to_string()))?;

        if session.is_expired(self.clock.now_utc()) {
            debug!(session_id = %id, "Session expired");
            self.store.delete(&key).await?;
            return Err(PunchError::SessionNotFound(id.to_string()));
        }

        Ok(session)
    }

    async fn get(&self, session_id: &str) -> PunchResult<SessionResponse> {
        let session = self.resolve(session_id).await?;
        Ok(SessionResponse::from_session(&session, self.clock.now_utc()))
    }

    async fn revoke(&self, session_id: &str) -> PunchResult<()> {
        let id = SessionId::parse(session_id)
            .map_err(|_| PunchError::not_found("Session", session_id.trim()))?;

        if !self.store.delete(&session_keys::session(id)).await? {
            return Err(PunchError::not_found("Session", id));
        }

        info!(session_id = %id, "Session revoked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::InMemorySessionStore;
    use chrono::{TimeZone, Utc};
    use punchclock_core::{FixedClock, Role};
    use punchclock_repository::InMemoryUserRepository;

    struct Fixture {
        service: SessionServiceImpl,
        store: Arc<InMemorySessionStore>,
        user: User,
    }

    fn fixture_at(clock: FixedClock) -> Fixture {
        let user = User::new(Email::new("hanako@example.com").unwrap(), "Hanako", Role::Staff);
        let store = Arc::new(InMemorySessionStore::new());
        let service = SessionServiceImpl::new(
            Arc::new(InMemoryUserRepository::with_users(vec![user.clone()])),
            store.clone(),
            Arc::new(clock),
            Duration::from_secs(3600),
        );
        Fixture { service, store, user }
    }

    fn fixture() -> Fixture {
        fixture_at(FixedClock(Utc::now()))
    }

    fn request(email: &str) -> CreateSessionRequest {
        CreateSessionRequest {
            profile: UserProfile {
                display_name: Some("Hanako".to_string()),
                email: Some(email.to_string()),
                provider_id: "google.com".to_string(),
                uid: "uid-hanako".to_string(),
                ..UserProfile::default()
            },
            token: Some("identity-token".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_links_known_user() {
        let f = fixture();
        let created = f.service.create(request("hanako@example.com")).await.unwrap();
        assert_eq!(created.user_id, Some(f.user.id));
        assert_eq!(created.profile.uid, "uid-hanako");
        assert_eq!(created.expires_in, 3600);

        let session = f.service.resolve(&created.session_id.to_string()).await.unwrap();
        assert_eq!(session.token.as_deref(), Some("identity-token"));
        assert_eq!(f.store.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_for_unknown_account_stores_profile() {
        let f = fixture();
        let created = f.service.create(request("nobody@example.com")).await.unwrap();
        assert!(created.user_id.is_none());

        let described = f.service.get(&created.session_id.to_string()).await.unwrap();
        assert_eq!(described.profile.email(), Some("nobody@example.com"));
        assert_eq!(described.profile.display_name.as_deref(), Some("Hanako"));
    }

    #[tokio::test]
    async fn test_create_without_email_or_token() {
        let f = fixture();
        let created = f.service.create(CreateSessionRequest::default()).await.unwrap();
        assert!(created.user_id.is_none());
        let session = f.service.resolve(&created.session_id.to_string()).await.unwrap();
        assert!(session.token.is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_email() {
        let err = fixture().service.create(request("nobody")).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_resolve_unknown_or_malformed() {
        let f = fixture();
        let err = f.service.resolve(&SessionId::new().to_string()).await.unwrap_err();
        assert_eq!(err.status_code(), 401);

        let err = f.service.resolve("not-a-session").await.unwrap_err();
        assert_eq!(err.error_code(), "SESSION_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_resolve_expired_session() {
        let past = FixedClock(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        let f = fixture_at(past);
        let stale = f
            .service
            .open(&f.user, UserProfile::from(&f.user), "tok")
            .await
            .unwrap();

        // Same store, but the clock is now far past the expiry.
        let later = SessionServiceImpl::new(
            Arc::new(InMemoryUserRepository::new()),
            f.store.clone(),
            Arc::new(FixedClock(Utc::now())),
            Duration::from_secs(3600),
        );
        let err = later.resolve(&stale.session_id.to_string()).await.unwrap_err();
        assert_eq!(err.status_code(), 401);
        assert!(f.store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_revoke() {
        let f = fixture();
        let session = f
            .service
            .open(&f.user, UserProfile::from(&f.user), "tok")
            .await
            .unwrap();
        let id = session.session_id.to_string();

        f.service.revoke(&id).await.unwrap();
        assert_eq!(f.service.resolve(&id).await.unwrap_err().status_code(), 401);
        assert_eq!(f.service.revoke(&id).await.unwrap_err().status_code(), 404);
        assert_eq!(f.service.revoke("garbage").await.unwrap_err().status_code(), 404);
    }

    #[tokio::test]
    async fn test_get_describes_session() {
        let f = fixture();
        let session = f
            .service
            .open(&f.user, UserProfile::from(&f.user), "tok")
            .await
            .unwrap();
        let response = f.service.get(&session.session_id.to_string()).await.unwrap();
        assert_eq!(response.profile.email(), Some("hanako@example.com"));
        assert_eq!(response.user_id, Some(f.user.id));
        assert_eq!(response.session_id, session.session_id);
    }
}
