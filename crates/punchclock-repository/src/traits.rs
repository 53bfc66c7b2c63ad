//! Repository trait definitions.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use punchclock_core::{
    AttendanceRecord, Email, Page, PageRequest, PunchResult, User, UserId, WorkTime, WorkTimeId,
};

/// User repository trait.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> PunchResult<Option<User>>;

    /// Finds a user by email.
    async fn find_by_email(&self, email: &Email) -> PunchResult<Option<User>>;

    /// Saves a new user. A duplicate email is a `Conflict`.
    async fn save(&self, user: &User) -> PunchResult<User>;

    /// Changes a user's display name. Returns false if the user does not exist.
    async fn update_name(&self, id: UserId, name: &str) -> PunchResult<bool>;
}

/// Repository for the append-only `AttendanceRecords` log.
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Appends a punch.
    async fn append(&self, record: &AttendanceRecord) -> PunchResult<()>;

    /// Counts the punches a user made on a JST calendar day.
    async fn count_by_user_and_date(&self, user_id: UserId, date: NaiveDate) -> PunchResult<u64>;
}

/// Repository for `WorkTimeManagement` intervals.
#[async_trait]
pub trait WorkTimeRepository: Send + Sync {
    /// Finds the user's open interval, if any.
    async fn find_open(&self, user_id: UserId) -> PunchResult<Option<WorkTime>>;

    /// Inserts a newly opened interval. A second open interval is a `Conflict`.
    async fn open(&self, work_time: &WorkTime) -> PunchResult<()>;

    /// Closes an open interval. Returns false if it was not open.
    async fn close(
        &self,
        id: WorkTimeId,
        clock_out: NaiveDateTime,
        worked_minutes: i64,
    ) -> PunchResult<bool>;

    /// Pages a user's intervals, newest clock-in first.
    async fn find_by_user(&self, user_id: UserId, page: PageRequest) -> PunchResult<Page<WorkTime>>;
}
