//! MySQL work interval repository implementation.

use super::parse_uuid;
use crate::{traits::WorkTimeRepository, DatabasePool};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use punchclock_core::{Page, PageRequest, PunchError, PunchResult, UserId, WorkTime, WorkTimeId};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// Reads and writes `WorkTimeManagement`.
#[derive(Clone)]
pub struct MySqlWorkTimeRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlWorkTimeRepository {
    /// Creates a new MySQL work time repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct WorkTimeRow {
    id: String,
    user_id: String,
    work_date: NaiveDate,
    clock_in: NaiveDateTime,
    clock_out: Option<NaiveDateTime>,
    worked_minutes: Option<i64>,
}

impl TryFrom<WorkTimeRow> for WorkTime {
    type Error = PunchError;

    fn try_from(row: WorkTimeRow) -> Result<Self, Self::Error> {
        Ok(WorkTime {
            id: WorkTimeId::from_uuid(parse_uuid(&row.id, "WorkTimeManagement.id")?),
            user_id: UserId::from_uuid(parse_uuid(&row.user_id, "WorkTimeManagement.user_id")?),
            work_date: row.work_date,
            clock_in: row.clock_in,
            clock_out: row.clock_out,
            worked_minutes: row.worked_minutes,
        })
    }
}

#[async_trait]
impl WorkTimeRepository for MySqlWorkTimeRepository {
    async fn find_open(&self, user_id: UserId) -> PunchResult<Option<WorkTime>> {
        let row = sqlx::query_as::<_, WorkTimeRow>(
            r#"
            SELECT id, user_id, work_date, clock_in, clock_out, worked_minutes
            FROM WorkTimeManagement
            WHERE user_id = ? AND clock_out IS NULL
            ORDER BY clock_in DESC
            LIMIT 1
            "#,
        )
        .bind(user_id.to_string())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(WorkTime::try_from).transpose()
    }

    async fn open(&self, work_time: &WorkTime) -> PunchResult<()> {
        debug!("Opening work interval {} for user {}", work_time.id, work_time.user_id);

        sqlx::query(
            r#"
            INSERT INTO WorkTimeManagement (id, user_id, work_date, clock_in)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(work_time.id.to_string())
        .bind(work_time.user_id.to_string())
        .bind(work_time.work_date)
        .bind(work_time.clock_in)
        .execute(self.pool.inner())
        .await?;

        Ok(())
    }

    async fn close(
        &self,
        id: WorkTimeId,
        clock_out: NaiveDateTime,
        worked_minutes: i64,
    ) -> PunchResult<bool> {
        debug!("Closing work interval {} ({} minutes)", id, worked_minutes);

        let result = sqlx::query(
            r#"
            UPDATE WorkTimeManagement
            SET clock_out = ?, worked_minutes = ?
            WHERE id = ? AND clock_out IS NULL
            "#,
        )
        .bind(clock_out)
        .bind(worked_minutes)
        .bind(id.to_string())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn find_by_user(&self, user_id: UserId, page: PageRequest) -> PunchResult<Page<WorkTime>> {
        debug!("Finding work intervals for user {}, page: {}, size: {}", user_id, page.page, page.size);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM WorkTimeManagement WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_one(self.pool.inner())
            .await?;

        let rows = sqlx::query_as::<_, WorkTimeRow>(
            r#"
            SELECT id, user_id, work_date, clock_in, clock_out, worked_minutes
            FROM WorkTimeManagement
            WHERE user_id = ?
            ORDER BY clock_in DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(user_id.to_string())
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.pool.inner())
        .await?;

        let items = rows
            .into_iter()
            .map(WorkTime::try_from)
            .collect::<PunchResult<Vec<_>>>()?;

        Ok(Page::new(items, page.page, page.size, u64::try_from(total).unwrap_or(0)))
    }
}
