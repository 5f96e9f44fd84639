// LeadDesk - core/clock.rs
//
// Explicit "now" for every time-relative derivation.
// Core layer: never reads the wall clock itself; callers pin the instant.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Offset, Utc};

/// A pinned current instant plus the UTC offset that defines calendar days.
///
/// Instants are compared in UTC; "today", "tomorrow", and "this month" are
/// evaluated in the local time given by `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    now: DateTime<Utc>,
    offset: FixedOffset,
}

impl Clock {
    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { now, offset }
    }

    /// Clock whose calendar days are UTC days.
    pub fn utc(now: DateTime<Utc>) -> Self {
        Self::new(now, Utc.fix())
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Convert an instant to local wall-clock time.
    pub fn local(&self, ts: DateTime<Utc>) -> DateTime<FixedOffset> {
        ts.with_timezone(&self.offset)
    }

    /// Local calendar date of `ts`.
    pub fn local_date(&self, ts: DateTime<Utc>) -> NaiveDate {
        self.local(ts).date_naive()
    }

    pub fn today(&self) -> NaiveDate {
        self.local_date(self.now)
    }

    pub fn tomorrow(&self) -> NaiveDate {
        let today = self.today();
        today.succ_opt().unwrap_or(today)
    }

    pub fn is_today(&self, ts: DateTime<Utc>) -> bool {
        self.local_date(ts) == self.today()
    }

    pub fn is_tomorrow(&self, ts: DateTime<Utc>) -> bool {
        self.local_date(ts) == self.tomorrow()
    }

    /// Strictly before now.
    pub fn is_past(&self, ts: DateTime<Utc>) -> bool {
        ts < self.now
    }

    /// Same local year and month as now.
    pub fn is_this_month(&self, ts: DateTime<Utc>) -> bool {
        let date = self.local_date(ts);
        let today = self.today();
        date.year() == today.year() && date.month() == today.month()
    }

    /// Whole hours elapsed since `ts`, truncated toward zero.
    /// Negative when `ts` lies in the future.
    pub fn hours_since(&self, ts: DateTime<Utc>) -> i64 {
        (self.now - ts).num_hours()
    }

    /// Whole minutes elapsed since `ts`, truncated toward zero.
    pub fn minutes_since(&self, ts: DateTime<Utc>) -> i64 {
        (self.now - ts).num_minutes()
    }

    /// `now` shifted by whole days.
    pub fn days_from_now(&self, days: i64) -> DateTime<Utc> {
        self.now + Duration::days(days)
    }
}
