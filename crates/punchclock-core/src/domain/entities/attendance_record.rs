//! Append-only punch log entry.

use crate::domain::value_objects::PunchKind;
use crate::{RecordId, UserId};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One row of `AttendanceRecords`: a single punch in or out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: RecordId,
    pub user_id: UserId,
    pub kind: PunchKind,
    /// JST wall-clock time of the punch.
    pub punched_at: NaiveDateTime,
    /// JST calendar date of the punch.
    pub work_date: NaiveDate,
}

impl AttendanceRecord {
    /// Creates a record stamped at `punched_at` (JST).
    #[must_use]
    pub fn new(user_id: UserId, kind: PunchKind, punched_at: NaiveDateTime) -> Self {
        Self {
            id: RecordId::new(),
            user_id,
            kind,
            punched_at,
            work_date: punched_at.date(),
        }
    }
}
