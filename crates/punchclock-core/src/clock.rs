//! Japan Standard Time helpers and an injectable clock.
//!
//! All attendance timestamps are stored as JST wall-clock values
//! (`NaiveDateTime`), so every conversion out of UTC goes through here.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Utc};

/// Offset of Japan Standard Time from UTC, in seconds. JST has no DST.
pub const JST_OFFSET_SECS: i32 = 9 * 3600;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Returns the JST fixed offset.
#[must_use]
pub fn jst() -> FixedOffset {
    FixedOffset::east_opt(JST_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// A source of the current instant.
pub trait Clock: Send + Sync {
    /// Returns the current instant in UTC.
    fn now_utc(&self) -> DateTime<Utc>;

    /// Returns the current JST wall-clock time.
    fn now_jst(&self) -> NaiveDateTime {
        to_jst(self.now_utc())
    }

    /// Returns today's date in JST.
    fn today_jst(&self) -> NaiveDate {
        self.now_jst().date()
    }
}

/// Reads the operating system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant. Intended for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Creates a clock pinned to the given JST wall-clock time.
    #[must_use]
    pub fn at_jst(local: NaiveDateTime) -> Self {
        Self(from_jst(local))
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Returns the current JST wall-clock time from the given clock.
#[must_use]
pub fn jst_now(clock: &dyn Clock) -> NaiveDateTime {
    clock.now_jst()
}

/// Converts a UTC instant to JST wall-clock time.
#[must_use]
pub fn to_jst(instant: DateTime<Utc>) -> NaiveDateTime {
    instant.with_timezone(&jst()).naive_local()
}

/// Converts a JST wall-clock time back to a UTC instant.
#[must_use]
pub fn from_jst(local: NaiveDateTime) -> DateTime<Utc> {
    (local - Duration::seconds(i64::from(JST_OFFSET_SECS))).and_utc()
}

/// Minutes from `start` to `end` as times of day.
///
/// An `end` earlier than `start` is taken to be on the following day, so
/// `22:00 -> 06:00` is 480 minutes.
#[must_use]
pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    let diff = (end - start).num_minutes();
    if diff < 0 {
        diff + MINUTES_PER_DAY
    } else {
        diff
    }
}

/// Whole minutes worked between two JST timestamps, never negative.
#[must_use]
pub fn worked_minutes(clock_in: NaiveDateTime, clock_out: NaiveDateTime) -> i64 {
    (clock_out - clock_in).num_minutes().max(0)
}
