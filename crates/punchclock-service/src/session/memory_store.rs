//! In-memory session store for tests.

use super::SessionStore;
use async_trait::async_trait;
use punchclock_core::{PunchError, PunchResult};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// A TTL-aware map standing in for Redis.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live keys.
    pub fn len(&self) -> PunchResult<usize> {
        let now = Instant::now();
        Ok(self.lock()?.values().filter(|(_, exp)| *exp > now).count())
    }

    /// Returns true when no live keys remain.
    pub fn is_empty(&self) -> PunchResult<bool> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> PunchResult<MutexGuard<'_, HashMap<String, (String, Instant)>>> {
        self.entries
            .lock()
            .map_err(|_| PunchError::SessionStore("session map poisoned".to_string()))
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_raw(&self, key: &str) -> PunchResult<Option<String>> {
        let mut entries = self.lock()?;
        match entries.get(key) {
            Some((_, expires)) if *expires <= Instant::now() => {
                entries.remove(key);
                Ok(None)
            }
            Some((value, _)) => Ok(Some(value.clone())),
            None => Ok(None),
        }
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> PunchResult<()> {
        let expires = Instant::now() + ttl;
        self.lock()?
            .insert(key.to_string(), (value.to_string(), expires));
        Ok(())
    }

    async fn delete(&self, key: &str) -> PunchResult<bool> {
        let now = Instant::now();
        Ok(self
            .lock()?
            .remove(key)
            .is_some_and(|(_, expires)| expires > now))
    }

    async fn ping(&self) -> PunchResult<()> {
        self.lock().map(|_| ())
    }
}
