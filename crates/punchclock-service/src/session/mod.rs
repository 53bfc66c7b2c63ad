//! Key-value session storage.

pub mod keys;
mod redis_store;
mod store;

#[cfg(any(test, feature = "testing"))]
mod memory_store;

pub use keys as session_keys;
pub use redis_store::RedisSessionStore;
pub use store::{SessionStore, SessionStoreExt};

#[cfg(any(test, feature = "testing"))]
pub use memory_store::InMemorySessionStore;
