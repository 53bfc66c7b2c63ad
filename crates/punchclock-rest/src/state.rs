//! Application state for Axum handlers.

use punchclock_core::HealthCheck;
use punchclock_service::{AttendanceService, AuthService, SessionService, UserService};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub session_service: Arc<dyn SessionService>,
    pub auth_service: Arc<dyn AuthService>,
    pub attendance_service: Arc<dyn AttendanceService>,
    /// Dependencies checked by `/ready`.
    pub health_checks: Arc<[Arc<dyn HealthCheck>]>,
}

impl AppState {
    /// Creates a new application state with no readiness checks.
    pub fn new(
        user_service: Arc<dyn UserService>,
        session_service: Arc<dyn SessionService>,
        auth_service: Arc<dyn AuthService>,
        attendance_service: Arc<dyn AttendanceService>,
    ) -> Self {
        Self {
            user_service,
            session_service,
            auth_service,
            attendance_service,
            health_checks: Arc::from(Vec::new()),
        }
    }

    /// Sets the dependencies `/ready` checks.
    #[must_use]
    pub fn with_health_checks(mut self, checks: Vec<Arc<dyn HealthCheck>>) -> Self {
        self.health_checks = Arc::from(checks);
        self
    }
}
