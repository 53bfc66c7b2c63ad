//! Common test infrastructure for REST API tests.
//!
//! Wires the real services over in-memory repositories and an in-memory
//! session store, then drives the router with `oneshot`.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use punchclock_config::{ObservabilityConfig, SecurityConfig, ServerConfig};
use punchclock_core::{Clock, HealthCheck, HourlyRates, Role, SystemClock};
use punchclock_repository::{
    InMemoryAttendanceRepository, InMemoryUserRepository, InMemoryWorkTimeRepository,
};
use punchclock_rest::{create_router, AppState};
use punchclock_security::{IdentityClaims, IdentityTokenDecoder};
use punchclock_service::{
    AttendanceRepositories, AttendanceServiceImpl, AuthServiceImpl, InMemorySessionStore,
    SessionServiceImpl, UserServiceImpl,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// A router backed by in-memory state.
pub struct TestApp {
    router: Router,
    decoder: Arc<IdentityTokenDecoder>,
}

impl TestApp {
    /// Creates an app with no readiness checks.
    pub fn new() -> Self {
        Self::with_health_checks(Vec::new())
    }

    /// Creates an app whose `/ready` reports `checks`.
    pub fn with_health_checks(checks: Vec<Arc<dyn HealthCheck>>) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let decoder = Arc::new(IdentityTokenDecoder::new(Arc::new(SecurityConfig {
            token_secret: "rest-test-secret".to_string(),
            ..Default::default()
        })));

        let session_service = Arc::new(SessionServiceImpl::new(
            users.clone(),
            Arc::new(InMemorySessionStore::new()),
            clock.clone(),
            Duration::from_secs(3600),
        ));
        let auth_service = Arc::new(AuthServiceImpl::new(
            users.clone(),
            session_service.clone(),
            decoder.clone(),
            clock.clone(),
            Role::Staff,
        ));
        let attendance_service = Arc::new(AttendanceServiceImpl::new(
            AttendanceRepositories {
                users: users.clone(),
                records: Arc::new(InMemoryAttendanceRepository::new()),
                work_times: Arc::new(InMemoryWorkTimeRepository::new()),
            },
            session_service.clone(),
            clock,
            HourlyRates::default(),
            31,
        ));

        let state = AppState::new(
            Arc::new(UserServiceImpl::new(users)),
            session_service,
            auth_service,
            attendance_service,
        )
        .with_health_checks(checks);

        let router = create_router(state, &ServerConfig::default(), &ObservabilityConfig::default());
        Self { router, decoder }
    }

    /// Issues an identity token for `email`.
    pub fn identity_token(&self, email: &str, name: Option<&str>) -> String {
        let mut claims = IdentityClaims::new("test-sub", email, chrono::Duration::hours(1));
        claims.name = name.map(ToString::to_string);
        self.decoder.issue(&claims).expect("token signing failed")
    }

    /// Logs in and returns the session id.
    pub async fn login(&self, email: &str) -> String {
        let token = self.identity_token(email, None);
        let (status, body) = self
            .request(Method::POST, "/api/login", Some(serde_json::json!({ "idToken": token })))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["sessionId"].as_str().expect("sessionId missing").to_string()
    }

    /// Sends a request and returns the status and the JSON body (`Null` when empty).
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.request_with_headers(method, uri, body, &[]).await
    }

    /// Like [`TestApp::request`], with extra request headers.
    pub async fn request_with_headers(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("request build failed"))
            .await
            .expect("router failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body read failed")
            .to_bytes();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, json)
    }
}
