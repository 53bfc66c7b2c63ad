//! Session key naming.

use punchclock_core::SessionId;

/// Prefix for every session key.
pub const SESSION_PREFIX: &str = "punchclock:session";

/// Key under which a session is stored.
#[must_use]
pub fn session(id: SessionId) -> String {
    format!("{}:{}", SESSION_PREFIX, id)
}
