//! In-memory repositories backed by `Mutex<HashMap>`.
//!
//! They enforce the same uniqueness rules as the MySQL schema: one user per
//! email and one open work interval per user.

use crate::traits::{AttendanceRepository, UserRepository, WorkTimeRepository};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use punchclock_core::{
    AttendanceRecord, Email, Page, PageRequest, PunchError, PunchResult, User, UserId, WorkTime,
    WorkTimeId,
};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> PunchResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| PunchError::internal("In-memory repository lock poisoned"))
}

/// In-memory user repository.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-filled with `users`.
    #[must_use]
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users.into_iter().map(|u| (u.id, u)).collect()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> PunchResult<Option<User>> {
        Ok(lock(&self.users)?.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> PunchResult<Option<User>> {
        Ok(lock(&self.users)?
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn save(&self, user: &User) -> PunchResult<User> {
        let mut users = lock(&self.users)?;
        if users.values().any(|u| u.email == user.email) {
            return Err(PunchError::conflict(format!(
                "Duplicate entry '{}' for key 'uk_users_email'",
                user.email
            )));
        }
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn update_name(&self, id: UserId, name: &str) -> PunchResult<bool> {
        Ok(lock(&self.users)?
            .get_mut(&id)
            .map(|user| user.rename(name))
            .is_some())
    }
}

/// In-memory attendance log.
#[derive(Debug, Default)]
pub struct InMemoryAttendanceRepository {
    records: Mutex<Vec<AttendanceRecord>>,
}

impl InMemoryAttendanceRepository {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every record, oldest first.
    pub fn records(&self) -> PunchResult<Vec<AttendanceRecord>> {
        Ok(lock(&self.records)?.clone())
    }
}

#[async_trait]
impl AttendanceRepository for InMemoryAttendanceRepository {
    async fn append(&self, record: &AttendanceRecord) -> PunchResult<()> {
        lock(&self.records)?.push(record.clone());
        Ok(())
    }

    async fn count_by_user_and_date(&self, user_id: UserId, date: NaiveDate) -> PunchResult<u64> {
        let count = lock(&self.records)?
            .iter()
            .filter(|r| r.user_id == user_id && r.work_date == date)
            .count();
        Ok(count as u64)
    }
}

/// In-memory work interval repository.
#[derive(Debug, Default)]
pub struct InMemoryWorkTimeRepository {
    intervals: Mutex<HashMap<WorkTimeId, WorkTime>>,
}

impl InMemoryWorkTimeRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-filled with `intervals`.
    #[must_use]
    pub fn with_intervals(intervals: Vec<WorkTime>) -> Self {
        Self {
            intervals: Mutex::new(intervals.into_iter().map(|w| (w.id, w)).collect()),
        }
    }
}

#[async_trait]
impl WorkTimeRepository for InMemoryWorkTimeRepository {
    async fn find_open(&self, user_id: UserId) -> PunchResult<Option<WorkTime>> {
        Ok(lock(&self.intervals)?
            .values()
            .find(|w| w.user_id == user_id && w.is_open())
            .cloned())
    }

    async fn open(&self, work_time: &WorkTime) -> PunchResult<()> {
        let mut intervals = lock(&self.intervals)?;
        if intervals
            .values()
            .any(|w| w.user_id == work_time.user_id && w.is_open())
        {
            return Err(PunchError::conflict(format!(
                "Duplicate entry for key 'uk_work_time_open' (user {})",
                work_time.user_id
            )));
        }
        intervals.insert(work_time.id, work_time.clone());
        Ok(())
    }

    async fn close(
        &self,
        id: WorkTimeId,
        clock_out: NaiveDateTime,
        worked_minutes: i64,
    ) -> PunchResult<bool> {
        let mut intervals = lock(&self.intervals)?;
        match intervals.get_mut(&id) {
            Some(interval) if interval.is_open() => {
                interval.clock_out = Some(clock_out);
                interval.worked_minutes = Some(worked_minutes);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn find_by_user(&self, user_id: UserId, page: PageRequest) -> PunchResult<Page<WorkTime>> {
        let mut mine: Vec<WorkTime> = lock(&self.intervals)?
            .values()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.clock_in.cmp(&a.clock_in));
        Ok(Page::from_slice(&mine, page))
    }
}
