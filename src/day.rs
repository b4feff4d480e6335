use crate::Timestamp;

use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

/// A UTC calendar day.
///
/// Displays and serializes as `YYYY-MM-DD`. Ordering is chronological.
///
/// # Example
///
/// ```
/// use quantedge_overlay::DayKey;
///
/// let day = DayKey::of(1_704_114_000_000).unwrap(); // 2024-01-01T13:00Z
/// assert_eq!(day.to_string(), "2024-01-01");
/// assert_eq!(day.midnight(), 1_704_067_200_000);
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Day containing `timestamp`, or `None` outside chrono's calendar range.
    #[must_use]
    pub fn of(timestamp: Timestamp) -> Option<Self> {
        DateTime::from_timestamp_millis(timestamp).map(|dt| Self(dt.date_naive()))
    }

    /// Day from a calendar date, or `None` if the date does not exist.
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Timestamp of `00:00:00.000` UTC on this day.
    #[must_use]
    pub fn midnight(self) -> Timestamp {
        self.0.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
    }

    #[must_use]
    pub fn date(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for DayKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Self)
    }
}

impl Display for DayKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
