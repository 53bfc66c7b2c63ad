//! Punch and record DTOs.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use punchclock_core::{
    minutes_to_hours, salary_for_minutes, PunchKind, UserId, WorkTime, WorkTimeId,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Optional body of a punch. Without `action` the punch toggles.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PunchRequest {
    pub action: Option<PunchKind>,
}

impl PunchRequest {
    /// A punch that toggles the current state.
    #[must_use]
    pub const fn toggle() -> Self {
        Self { action: None }
    }

    /// A punch in a fixed direction.
    #[must_use]
    pub const fn explicit(kind: PunchKind) -> Self {
        Self { action: Some(kind) }
    }
}

/// Outcome of a punch. Times are JST.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PunchResponse {
    pub kind: PunchKind,
    pub user_id: UserId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub punched_at: NaiveDateTime,
    /// Minutes of the interval just closed; absent on punch in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worked_minutes: Option<i64>,
    /// Punches made today, this one included.
    pub punches_today: u64,
}

/// One work interval with its pay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkRecord {
    pub id: WorkTimeId,
    pub date: NaiveDate,
    pub clock_in: NaiveDateTime,
    pub clock_out: Option<NaiveDateTime>,
    pub worked_minutes: i64,
    pub hours: f64,
    pub hourly_rate: i64,
    pub salary: i64,
    pub open: bool,
}

impl WorkRecord {
    /// Prices an interval at `hourly_rate`. Open intervals earn nothing yet.
    #[must_use]
    pub fn priced(interval: &WorkTime, hourly_rate: i64) -> Self {
        let minutes = interval.credited_minutes();
        Self {
            id: interval.id,
            date: interval.work_date,
            clock_in: interval.clock_in,
            clock_out: interval.clock_out,
            worked_minutes: minutes,
            hours: minutes_to_hours(minutes),
            hourly_rate,
            salary: salary_for_minutes(minutes, hourly_rate),
            open: interval.is_open(),
        }
    }
}

/// A page of work records with totals for the page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordsResponse {
    pub user_id: UserId,
    pub role: String,
    pub hourly_rate: i64,
    pub records: Vec<WorkRecord>,
    /// 1-indexed page number, as requested.
    pub page: usize,
    pub size: usize,
    pub total_elements: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub total_minutes: i64,
    pub total_hours: f64,
    pub total_salary: i64,
}
