//! Punching in and out, and priced work records.

use crate::dto::{PunchRequest, PunchResponse, RecordsResponse, WorkRecord};
use crate::session_service::SessionService;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use punchclock_core::{
    jst_now, AttendanceRecord, Clock, Email, HourlyRates, PageRequest, PunchError, PunchKind,
    PunchResult, User, UserId, WorkTime,
};
use punchclock_repository::{AttendanceRepository, UserRepository, WorkTimeRepository};
use std::sync::Arc;
use tracing::{debug, info};

/// Attendance service trait.
#[async_trait]
pub trait AttendanceService: Send + Sync {
    /// Punches in or out for the session's user.
    async fn punch(&self, session_id: &str, request: PunchRequest) -> PunchResult<PunchResponse>;

    /// Returns a 1-indexed page of the session user's work records.
    async fn records(&self, session_id: &str, page: usize) -> PunchResult<RecordsResponse>;
}

/// Repositories the attendance service writes to.
#[derive(Clone)]
pub struct AttendanceRepositories {
    pub users: Arc<dyn UserRepository>,
    pub records: Arc<dyn AttendanceRepository>,
    pub work_times: Arc<dyn WorkTimeRepository>,
}

/// Attendance service implementation.
pub struct AttendanceServiceImpl {
    repos: AttendanceRepositories,
    session_service: Arc<dyn SessionService>,
    clock: Arc<dyn Clock>,
    rates: HourlyRates,
    page_size: usize,
}

impl AttendanceServiceImpl {
    /// Creates a new attendance service.
    pub fn new(
        repos: AttendanceRepositories,
        session_service: Arc<dyn SessionService>,
        clock: Arc<dyn Clock>,
        rates: HourlyRates,
        page_size: usize,
    ) -> Self {
        Self {
            repos,
            session_service,
            clock,
            rates,
            page_size,
        }
    }

    /// Finds the account behind a session: the linked user if any, else the
    /// user owning the profile's email.
    async fn session_user(&self, session_id: &str) -> PunchResult<User> {
        let session = self.session_service.resolve(session_id).await?;
        if let Some(user_id) = session.user_id {
            return self
                .repos
                .users
                .find_by_id(user_id)
                .await?
                .ok_or_else(|| PunchError::not_found("User", user_id));
        }

        let email = session
            .email()
            .ok_or_else(|| PunchError::not_found("User email", session.session_id))?;
        let email = Email::new(email)?;
        self.repos
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| PunchError::not_found("User", &email))
    }

    async fn clock_in(&self, user_id: UserId, now: NaiveDateTime) -> PunchResult<()> {
        let interval = WorkTime::open(user_id, now);
        self.repos.work_times.open(&interval).await?;
        debug!(work_time_id = %interval.id, "Work interval opened");
        Ok(())
    }

    async fn clock_out(&self, mut interval: WorkTime, now: NaiveDateTime) -> PunchResult<i64> {
        let minutes = interval.close(now)?;
        if !self
            .repos
            .work_times
            .close(interval.id, now, minutes)
            .await?
        {
            return Err(PunchError::conflict("Work interval was already closed"));
        }
        debug!(work_time_id = %interval.id, minutes, "Work interval closed");
        Ok(minutes)
    }
}

#[async_trait]
impl AttendanceService for AttendanceServiceImpl {
    async fn punch(&self, session_id: &str, request: PunchRequest) -> PunchResult<PunchResponse> {
        let user = self.session_user(session_id).await?;
        let now = jst_now(self.clock.as_ref());
        let open = self.repos.work_times.find_open(user.id).await?;

        let worked_minutes = match (request.action, open) {
            (Some(PunchKind::In), Some(_)) => {
                return Err(PunchError::conflict("Already punched in"));
            }
            (Some(PunchKind::Out), None) => {
                return Err(PunchError::conflict("Not punched in"));
            }
            (_, Some(interval)) => Some(self.clock_out(interval, now).await?),
            (_, None) => {
                self.clock_in(user.id, now).await?;
                None
            }
        };
        let kind = if worked_minutes.is_some() {
            PunchKind::Out
        } else {
            PunchKind::In
        };

        self.repos
            .records
            .append(&AttendanceRecord::new(user.id, kind, now))
            .await?;
        let punches_today = self
            .repos
            .records
            .count_by_user_and_date(user.id, now.date())
            .await?;

        info!(user_id = %user.id, %kind, "Punch recorded");
        Ok(PunchResponse {
            kind,
            user_id: user.id,
            date: now.date(),
            time: now.time(),
            punched_at: now,
            worked_minutes,
            punches_today,
        })
    }

    async fn records(&self, session_id: &str, page: usize) -> PunchResult<RecordsResponse> {
        let request = PageRequest::from_one_based(page, self.page_size);
        let user = self.session_user(session_id).await?;
        debug!(user_id = %user.id, page = request.number(), "Loading work records");

        let rate = self.rates.rate_for(&user.role);
        let intervals = self.repos.work_times.find_by_user(user.id, request).await?;
        let info = intervals.info;
        let records: Vec<WorkRecord> = intervals
            .content
            .iter()
            .map(|interval| WorkRecord::priced(interval, rate))
            .collect();

        let total_minutes = records.iter().map(|r| r.worked_minutes).sum();
        let total_salary = records.iter().map(|r| r.salary).sum();

        Ok(RecordsResponse {
            user_id: user.id,
            role: user.role.to_string(),
            hourly_rate: rate,
            records,
            page: request.number(),
            size: info.size,
            total_elements: info.total_elements,
            total_pages: info.total_pages,
            has_next: info.has_next(),
            total_minutes,
            total_hours: punchclock_core::minutes_to_hours(total_minutes),
            total_salary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::InMemorySessionStore;
    use crate::session_service::SessionServiceImpl;
    use chrono::{DateTime, Duration, NaiveDate, Utc};
    use mockall::mock;
    use crate::dto::CreateSessionRequest;
    use punchclock_core::{from_jst, Page, Role, UserProfile, WorkTimeId};
    use punchclock_repository::{
        InMemoryAttendanceRepository, InMemoryUserRepository, InMemoryWorkTimeRepository,
    };
    use std::sync::Mutex;

    /// A clock tests can move forward.
    struct SteppingClock(Mutex<DateTime<Utc>>);

    impl SteppingClock {
        fn at(h: u32, m: u32) -> Self {
            Self(Mutex::new(from_jst(jst(1, h, m))))
        }

        fn advance(&self, by: Duration) {
            *self.0.lock().unwrap() += by;
        }
    }

    impl Clock for SteppingClock {
        fn now_utc(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    fn jst(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    struct Fixture {
        service: AttendanceServiceImpl,
        sessions: Arc<SessionServiceImpl>,
        records: Arc<InMemoryAttendanceRepository>,
        clock: Arc<SteppingClock>,
        user: User,
    }

    impl Fixture {
        async fn session(&self) -> String {
            self.sessions
                .open(&self.user, UserProfile::from(&self.user), "tok")
                .await
                .unwrap()
                .session_id
                .to_string()
        }
    }

    fn fixture_with(role: Role, work_times: Arc<dyn WorkTimeRepository>) -> Fixture {
        let user = User::new(Email::new("worker@example.com").unwrap(), "Worker", role);
        let users = Arc::new(InMemoryUserRepository::with_users(vec![user.clone()]));
        let records = Arc::new(InMemoryAttendanceRepository::new());
        let clock = Arc::new(SteppingClock::at(9, 0));
        let sessions = Arc::new(SessionServiceImpl::new(
            users.clone(),
            Arc::new(InMemorySessionStore::new()),
            clock.clone(),
            std::time::Duration::from_secs(7 * 24 * 3600),
        ));
        let service = AttendanceServiceImpl::new(
            AttendanceRepositories {
                users,
                records: records.clone(),
                work_times,
            },
            sessions.clone(),
            clock.clone(),
            HourlyRates::default(),
            10,
        );
        Fixture {
            service,
            sessions,
            records,
            clock,
            user,
        }
    }

    fn fixture(role: Role) -> Fixture {
        fixture_with(role, Arc::new(InMemoryWorkTimeRepository::new()))
    }

    // =============================================================================
    // Punch Tests
    // =============================================================================

    #[tokio::test]
    async fn test_toggle_punch_in_then_out() {
        let f = fixture(Role::Staff);
        let sid = f.session().await;

        let first = f.service.punch(&sid, PunchRequest::toggle()).await.unwrap();
        assert_eq!(first.kind, PunchKind::In);
        assert_eq!(first.punched_at, jst(1, 9, 0));
        assert!(first.worked_minutes.is_none());
        assert_eq!(first.punches_today, 1);

        f.clock.advance(Duration::minutes(8 * 60 + 30));
        let second = f.service.punch(&sid, PunchRequest::toggle()).await.unwrap();
        assert_eq!(second.kind, PunchKind::Out);
        assert_eq!(second.worked_minutes, Some(510));
        assert_eq!(second.time.to_string(), "17:30:00");
        assert_eq!(second.punches_today, 2);

        let log = f.records.records().unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[1].kind, PunchKind::Out);
    }

    #[tokio::test]
    async fn test_explicit_action_conflicts() {
        let f = fixture(Role::Staff);
        let sid = f.session().await;

        let err = f
            .service
            .punch(&sid, PunchRequest::explicit(PunchKind::Out))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);

        f.service
            .punch(&sid, PunchRequest::explicit(PunchKind::In))
            .await
            .unwrap();
        let err = f
            .service
            .punch(&sid, PunchRequest::explicit(PunchKind::In))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);
        assert_eq!(f.records.records().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_overnight_shift() {
        let f = fixture(Role::PartTime);
        let sid = f.session().await;
        f.clock.advance(Duration::hours(13));

        f.service.punch(&sid, PunchRequest::toggle()).await.unwrap();
        f.clock.advance(Duration::hours(8));
        let out = f.service.punch(&sid, PunchRequest::toggle()).await.unwrap();

        assert_eq!(out.worked_minutes, Some(480));
        assert_eq!(out.date, NaiveDate::from_ymd_opt(2024, 4, 2).unwrap());
        assert_eq!(out.punches_today, 1);
    }

    #[tokio::test]
    async fn test_punch_with_unknown_session() {
        let f = fixture(Role::Staff);
        let err = f
            .service
            .punch(&punchclock_core::SessionId::new().to_string(), PunchRequest::toggle())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);

        let err = f.service.records("nope", 1).await.unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    fn profile_request(email: &str) -> CreateSessionRequest {
        CreateSessionRequest {
            profile: UserProfile {
                email: Some(email.to_string()),
                uid: "client-uid".to_string(),
                ..UserProfile::default()
            },
            token: None,
        }
    }

    #[tokio::test]
    async fn test_profile_session_punches_by_email() {
        let f = fixture(Role::Staff);
        let created = f.sessions.create(profile_request("Worker@Example.com")).await.unwrap();
        let sid = created.session_id.to_string();

        let punch = f.service.punch(&sid, PunchRequest::toggle()).await.unwrap();
        assert_eq!(punch.user_id, f.user.id);
    }

    #[tokio::test]
    async fn test_profile_session_without_account() {
        let f = fixture(Role::Staff);

        let stranger = f.sessions.create(profile_request("stranger@example.com")).await.unwrap();
        let err = f
            .service
            .punch(&stranger.session_id.to_string(), PunchRequest::toggle())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);

        let anonymous = f.sessions.create(CreateSessionRequest::default()).await.unwrap();
        let err = f
            .service
            .records(&anonymous.session_id.to_string(), 1)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert!(f.records.records().unwrap().is_empty());
    }

    // =============================================================================
    // Records Tests
    // =============================================================================

    #[tokio::test]
    async fn test_records_with_salary() {
        let f = fixture(Role::Manager);
        let sid = f.session().await;

        for minutes in [60, 90] {
            f.service.punch(&sid, PunchRequest::toggle()).await.unwrap();
            f.clock.advance(Duration::minutes(minutes));
            f.service.punch(&sid, PunchRequest::toggle()).await.unwrap();
            f.clock.advance(Duration::minutes(30));
        }
        f.service.punch(&sid, PunchRequest::toggle()).await.unwrap();

        let page = f.service.records(&sid, 1).await.unwrap();
        assert_eq!(page.hourly_rate, 2000);
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.records.len(), 3);
        assert!(page.records[0].open);
        assert_eq!(page.records[1].worked_minutes, 90);
        assert_eq!(page.records[1].salary, 3000);
        assert_eq!(page.records[2].salary, 2000);
        assert_eq!(page.total_minutes, 150);
        assert_eq!(page.total_salary, 5000);
        assert!((page.total_hours - 2.5).abs() < f64::EPSILON);
        assert!(!page.has_next);
    }

    #[tokio::test]
    async fn test_unknown_role_uses_default_rate() {
        let f = fixture(Role::parse("contractor"));
        let sid = f.session().await;
        f.service.punch(&sid, PunchRequest::toggle()).await.unwrap();
        f.clock.advance(Duration::minutes(7));
        f.service.punch(&sid, PunchRequest::toggle()).await.unwrap();

        let page = f.service.records(&sid, 1).await.unwrap();
        assert_eq!(page.role, "contractor");
        assert_eq!(page.hourly_rate, 1000);
        assert_eq!(page.total_salary, 117);
    }

    #[tokio::test]
    async fn test_records_paging_edges() {
        let f = fixture(Role::Staff);
        let sid = f.session().await;

        f.service.punch(&sid, PunchRequest::toggle()).await.unwrap();
        let first = f.service.records(&sid, 0).await.unwrap();
        assert_eq!(first.page, 1);
        assert_eq!(first.records.len(), 1);

        let beyond = f.service.records(&sid, 5).await.unwrap();
        assert!(beyond.records.is_empty());
        assert_eq!(beyond.page, 5);
        assert_eq!(beyond.total_minutes, 0);
        assert_eq!(beyond.total_salary, 0);
    }

    // =============================================================================
    // Failure Injection
    // =============================================================================

    mock! {
        WorkTimes {}

        #[async_trait]
        impl WorkTimeRepository for WorkTimes {
            async fn find_open(&self, user_id: UserId) -> PunchResult<Option<WorkTime>>;
            async fn open(&self, work_time: &WorkTime) -> PunchResult<()>;
            async fn close(
                &self,
                id: WorkTimeId,
                clock_out: NaiveDateTime,
                worked_minutes: i64,
            ) -> PunchResult<bool>;
            async fn find_by_user(&self, user_id: UserId, page: PageRequest) -> PunchResult<Page<WorkTime>>;
        }
    }

    #[tokio::test]
    async fn test_database_failure_is_not_recorded() {
        let mut work_times = MockWorkTimes::new();
        work_times
            .expect_find_open()
            .returning(|_| Err(PunchError::Database("connection reset".to_string())));
        work_times.expect_open().never();

        let f = fixture_with(Role::Staff, Arc::new(work_times));
        let sid = f.session().await;

        let err = f.service.punch(&sid, PunchRequest::toggle()).await.unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert!(f.records.records().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_close_is_a_conflict() {
        let mut work_times = MockWorkTimes::new();
        let open = WorkTime::open(UserId::new(), jst(1, 8, 0));
        work_times
            .expect_find_open()
            .returning(move |_| Ok(Some(open.clone())));
        work_times.expect_close().times(1).returning(|_, _, _| Ok(false));

        let f = fixture_with(Role::Staff, Arc::new(work_times));
        let sid = f.session().await;

        let err = f.service.punch(&sid, PunchRequest::toggle()).await.unwrap_err();
        assert_eq!(err.status_code(), 409);
        assert!(f.records.records().unwrap().is_empty());
    }
}
