//! Evaluation context module.
//!
//! Some date/time formulas are relative to the present (age, days until a
//! date, the local time at a UTC offset). Rather than letting compute
//! functions read the clock, the caller passes an `EvalContext` holding the
//! reference instant. Formulas stay pure: the same inputs and the same
//! context always produce the same result.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Reference clock for formula evaluation.
///
/// # Examples
///
/// ```rust
/// use calckit::EvalContext;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
/// let ctx = EvalContext::fixed(today, noon);
///
/// assert_eq!(ctx.today(), today);
/// assert_eq!(ctx.now().time(), noon);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalContext {
    /// Local date and time the evaluation is relative to.
    now: NaiveDateTime,
    /// Offset of local time from UTC, in seconds.
    utc_offset_seconds: i32,
}

impl EvalContext {
    /// Capture the current local date and time.
    pub fn current() -> Self {
        let now = Local::now();
        Self {
            now: now.naive_local(),
            utc_offset_seconds: now.offset().local_minus_utc(),
        }
    }

    /// Pin the context to a given local date and time, at UTC.
    pub fn fixed(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            now: date.and_time(time),
            utc_offset_seconds: 0,
        }
    }

    /// Same context with a different local offset from UTC.
    pub fn with_utc_offset_seconds(mut self, seconds: i32) -> Self {
        self.utc_offset_seconds = seconds;
        self
    }

    /// The local reference date.
    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }

    /// The local reference date and time.
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// The reference instant expressed in UTC.
    pub fn utc_now(&self) -> NaiveDateTime {
        self.now - chrono::Duration::seconds(i64::from(self.utc_offset_seconds))
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_context() {
        let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let time = NaiveTime::from_hms_opt(8, 30, 0).unwrap();
        let ctx = EvalContext::fixed(date, time);
        assert_eq!(ctx.today(), date);
        assert_eq!(ctx.utc_now(), ctx.now());
    }

    #[test]
    fn test_utc_offset() {
        let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let time = NaiveTime::from_hms_opt(8, 30, 0).unwrap();
        let ctx = EvalContext::fixed(date, time).with_utc_offset_seconds(2 * 3600);
        assert_eq!(
            ctx.utc_now().time(),
            NaiveTime::from_hms_opt(6, 30, 0).unwrap()
        );
    }
}
