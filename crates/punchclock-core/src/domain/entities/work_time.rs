//! Work interval entity.

use crate::clock::worked_minutes;
use crate::{PunchError, PunchResult, UserId, WorkTimeId};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One row of `WorkTimeManagement`: a clock-in and, once closed, its clock-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkTime {
    pub id: WorkTimeId,
    pub user_id: UserId,
    /// JST date of the clock-in.
    pub work_date: NaiveDate,
    pub clock_in: NaiveDateTime,
    pub clock_out: Option<NaiveDateTime>,
    /// Set together with `clock_out`.
    pub worked_minutes: Option<i64>,
}

impl WorkTime {
    /// Opens a new interval at `clock_in` (JST).
    #[must_use]
    pub fn open(user_id: UserId, clock_in: NaiveDateTime) -> Self {
        Self {
            id: WorkTimeId::new(),
            user_id,
            work_date: clock_in.date(),
            clock_in,
            clock_out: None,
            worked_minutes: None,
        }
    }

    /// Returns true while the interval has no clock-out.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }

    /// Closes the interval and returns the minutes worked.
    pub fn close(&mut self, clock_out: NaiveDateTime) -> PunchResult<i64> {
        if !self.is_open() {
            return Err(PunchError::conflict("Work interval is already closed"));
        }
        let minutes = worked_minutes(self.clock_in, clock_out);
        self.clock_out = Some(clock_out);
        self.worked_minutes = Some(minutes);
        Ok(minutes)
    }

    /// Minutes credited to this interval; open intervals count as zero.
    #[must_use]
    pub fn credited_minutes(&self) -> i64 {
        self.worked_minutes.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_open_and_close() {
        let mut wt = WorkTime::open(UserId::new(), at(1, 9, 0));
        assert!(wt.is_open());
        assert_eq!(wt.credited_minutes(), 0);

        let minutes = wt.close(at(1, 17, 45)).unwrap();
        assert_eq!(minutes, 525);
        assert!(!wt.is_open());
        assert_eq!(wt.worked_minutes, Some(525));
        assert_eq!(wt.credited_minutes(), 525);
    }

    #[test]
    fn test_overnight_interval_keeps_clock_in_date() {
        let mut wt = WorkTime::open(UserId::new(), at(1, 22, 0));
        assert_eq!(wt.close(at(2, 6, 0)).unwrap(), 480);
        assert_eq!(wt.work_date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[test]
    fn test_close_twice_conflicts() {
        let mut wt = WorkTime::open(UserId::new(), at(1, 9, 0));
        wt.close(at(1, 10, 0)).unwrap();
        assert_eq!(wt.close(at(1, 11, 0)).unwrap_err().status_code(), 409);
    }
}
