//! Result type aliases for Punchclock.

use crate::PunchError;

/// A specialized `Result` type for Punchclock operations.
pub type PunchResult<T> = Result<T, PunchError>;
