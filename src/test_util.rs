// src/test_util.rs

use crate::{TimePoint, Timestamp};

use chrono::{NaiveDate, NaiveTime};

/// Asserts that two `f64` values are approximately equal using a
/// relative epsilon of `4 * f64::EPSILON`.
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e) = ($actual, $expected);
        assert!(
            (a - e).abs() <= e.abs() * 4.0 * f64::EPSILON,
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;

/// Convenience: point constructor.
pub fn pt(timestamp: Timestamp, value: f64) -> TimePoint {
    TimePoint::new(timestamp, value)
}

/// Epoch milliseconds of `year-month-day hour:00:00` UTC.
pub fn at(year: i32, month: u32, day: u32, hour: u32) -> Timestamp {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("valid date")
        .and_time(NaiveTime::from_hms_opt(hour, 0, 0).expect("valid hour"))
        .and_utc()
        .timestamp_millis()
}
