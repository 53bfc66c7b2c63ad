//! Redis-backed session store.

use super::SessionStore;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};
use punchclock_core::{HealthCheck, HealthStatus, PunchError, PunchResult};
use std::time::Duration;
use tracing::debug;

/// Session store over a `deadpool-redis` pool.
#[derive(Clone)]
pub struct RedisSessionStore {
    pool: Pool,
}

impl RedisSessionStore {
    /// Creates a store over an existing pool.
    #[must_use]
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    async fn get_conn(&self) -> PunchResult<deadpool_redis::Connection> {
        self.pool.get().await.map_err(|e| {
            PunchError::SessionStore(format!("Failed to get Redis connection: {}", e))
        })
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get_raw(&self, key: &str) -> PunchResult<Option<String>> {
        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn.get(key).await.map_err(|e| {
            PunchError::SessionStore(format!("Failed to get key '{}': {}", key, e))
        })?;

        debug!(key, found = value.is_some(), "Session lookup");
        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> PunchResult<()> {
        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs).await.map_err(|e| {
            PunchError::SessionStore(format!("Failed to set key '{}': {}", key, e))
        })?;

        debug!("Stored key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete(&self, key: &str) -> PunchResult<bool> {
        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn.del(key).await.map_err(|e| {
            PunchError::SessionStore(format!("Failed to delete key '{}': {}", key, e))
        })?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }

    async fn ping(&self) -> PunchResult<()> {
        let mut conn = self.get_conn().await?;
        let _: String = deadpool_redis::redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| PunchError::SessionStore(format!("PING failed: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl HealthCheck for RedisSessionStore {
    fn name(&self) -> &str {
        "redis"
    }

    async fn check(&self) -> HealthStatus {
        match self.ping().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        }
    }
}

impl std::fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("RedisSessionStore")
            .field("size", &status.size)
            .field("available", &status.available)
            .finish()
    }
}
