//! MySQL repository implementations.

mod attendance_repository;
mod user_repository;
mod work_time_repository;

pub use attendance_repository::MySqlAttendanceRepository;
pub use user_repository::MySqlUserRepository;
pub use work_time_repository::MySqlWorkTimeRepository;

use punchclock_core::PunchError;
use uuid::Uuid;

/// Parses a CHAR(36) id column.
fn parse_uuid(value: &str, column: &str) -> Result<Uuid, PunchError> {
    Uuid::parse_str(value)
        .map_err(|e| PunchError::Internal(format!("Invalid UUID in {column}: {e}")))
}
