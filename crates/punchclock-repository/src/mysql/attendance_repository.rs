//! MySQL attendance log implementation.

use crate::{traits::AttendanceRepository, DatabasePool};
use async_trait::async_trait;
use chrono::NaiveDate;
use punchclock_core::{AttendanceRecord, PunchResult, UserId};
use std::sync::Arc;
use tracing::debug;

/// Writes punches to `AttendanceRecords`.
#[derive(Clone)]
pub struct MySqlAttendanceRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlAttendanceRepository {
    /// Creates a new MySQL attendance repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceRepository for MySqlAttendanceRepository {
    async fn append(&self, record: &AttendanceRecord) -> PunchResult<()> {
        debug!(
            "Recording punch {} for user {} at {}",
            record.kind, record.user_id, record.punched_at
        );

        sqlx::query(
            r#"
            INSERT INTO AttendanceRecords (id, user_id, kind, punched_at, work_date)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.id.to_string())
        .bind(record.user_id.to_string())
        .bind(record.kind.as_str())
        .bind(record.punched_at)
        .bind(record.work_date)
        .execute(self.pool.inner())
        .await?;

        Ok(())
    }

    async fn count_by_user_and_date(&self, user_id: UserId, date: NaiveDate) -> PunchResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM AttendanceRecords WHERE user_id = ? AND work_date = ?",
        )
        .bind(user_id.to_string())
        .bind(date)
        .fetch_one(self.pool.inner())
        .await?;

        Ok(u64::try_from(count).unwrap_or(0))
    }
}
