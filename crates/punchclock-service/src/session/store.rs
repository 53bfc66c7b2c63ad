//! Session store trait for key-value backends.

use punchclock_core::PunchResult;
use async_trait::async_trait;
use std::time::Duration;

/// Key-value store holding serialized sessions.
///
/// Values are JSON strings so the trait stays dyn-compatible; use
/// [`SessionStoreExt`] for typed access.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Gets a raw value. Returns `None` if the key is absent or expired.
    async fn get_raw(&self, key: &str) -> PunchResult<Option<String>>;

    /// Sets a raw value that expires after `ttl`.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> PunchResult<()>;

    /// Deletes a key. Returns `true` if it existed.
    async fn delete(&self, key: &str) -> PunchResult<bool>;

    /// Checks that the backend answers.
    async fn ping(&self) -> PunchResult<()>;
}

/// Typed get/set on top of [`SessionStore`].
#[async_trait]
pub trait SessionStoreExt: SessionStore {
    /// Gets and deserializes a value.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> PunchResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Serializes and stores a value.
    async fn set<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> PunchResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }
}

impl<T: SessionStore + ?Sized> SessionStoreExt for T {}
