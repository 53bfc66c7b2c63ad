//! Builds the service graph from configuration.

use deadpool_redis::{Config as RedisPoolConfig, Pool, PoolConfig, Runtime};
use punchclock_config::{AppConfig, RedisConfig};
use punchclock_core::{Clock, PunchError, PunchResult, Role};
use punchclock_repository::{
    DatabasePool, MySqlAttendanceRepository, MySqlUserRepository, MySqlWorkTimeRepository,
};
use punchclock_rest::AppState;
use punchclock_security::IdentityTokenDecoder;
use punchclock_service::{
    AttendanceRepositories, AttendanceServiceImpl, AuthServiceImpl, SessionService,
    SessionServiceImpl, SessionStore, UserServiceImpl,
};
use std::sync::Arc;
use tracing::info;

/// Creates the Redis pool backing the session store.
///
/// Connections are opened lazily, so this only fails on a malformed URL.
pub fn create_redis_pool(config: &RedisConfig) -> PunchResult<Pool> {
    let mut pool_config = RedisPoolConfig::from_url(config.url.clone());
    pool_config.pool = Some(PoolConfig::new(config.pool_size));

    let pool = pool_config
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| PunchError::Configuration(format!("Invalid Redis configuration: {e}")))?;

    info!(pool_size = config.pool_size, "Redis connection pool created");
    Ok(pool)
}

/// MySQL-backed repositories sharing one pool.
pub fn mysql_repositories(pool: &Arc<DatabasePool>) -> AttendanceRepositories {
    AttendanceRepositories {
        users: Arc::new(MySqlUserRepository::new(pool.clone())),
        records: Arc::new(MySqlAttendanceRepository::new(pool.clone())),
        work_times: Arc::new(MySqlWorkTimeRepository::new(pool.clone())),
    }
}

/// Wires the services into handler state.
pub fn build_state(
    config: &AppConfig,
    repos: AttendanceRepositories,
    store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
) -> AppState {
    let decoder = Arc::new(IdentityTokenDecoder::new(Arc::new(config.security.clone())));

    let session_service: Arc<dyn SessionService> = Arc::new(SessionServiceImpl::new(
        repos.users.clone(),
        store,
        clock.clone(),
        config.session.ttl(),
    ));

    let user_service = Arc::new(UserServiceImpl::new(repos.users.clone()));

    let auth_service = Arc::new(AuthServiceImpl::new(
        repos.users.clone(),
        session_service.clone(),
        decoder,
        clock.clone(),
        Role::parse(&config.attendance.new_user_role),
    ));

    let attendance_service = Arc::new(AttendanceServiceImpl::new(
        repos,
        session_service.clone(),
        clock,
        config.attendance.rates,
        config.attendance.page_size,
    ));

    AppState::new(user_service, session_service, auth_service, attendance_service)
}
