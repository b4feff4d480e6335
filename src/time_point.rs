use crate::{DayKey, Sign};

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};

/// Milliseconds since the Unix epoch, UTC.
///
/// Every series handled by this crate is keyed by this value. Date strings
/// found in source documents are converted to it at the parsing boundary.
pub type Timestamp = i64;

/// A price value.
///
/// Semantic alias for [`f64`], used where a value is known to be a close
/// price rather than an arbitrary indicator reading.
pub type Price = f64;

/// One sample of a series at a point in time.
///
/// Serializes as `{"x": <timestamp>, "y": <value>}`, the shape consumed by
/// chart renderers.
///
/// # Example
///
/// ```
/// use quantedge_overlay::TimePoint;
///
/// let point = TimePoint::new(1_704_067_200_000, 42_000.0);
/// assert_eq!(point.timestamp(), 1_704_067_200_000);
/// assert_eq!(point.value(), 42_000.0);
/// ```
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct TimePoint {
    #[serde(rename = "x")]
    timestamp: Timestamp,
    #[serde(rename = "y")]
    value: f64,
}

impl TimePoint {
    /// Creates a point. `value` must be finite; samples parsed through
    /// [`Dataset`](crate::Dataset) are validated before reaching here.
    #[must_use]
    pub fn new(timestamp: Timestamp, value: f64) -> Self {
        debug_assert!(value.is_finite(), "TimePoint value must be finite: {value}");

        Self { timestamp, value }
    }

    #[inline]
    #[must_use]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Sign of the value.
    #[inline]
    #[must_use]
    pub fn sign(&self) -> Sign {
        Sign::of(self.value)
    }

    /// UTC calendar day the point falls on, or `None` if the timestamp lies
    /// outside the representable calendar.
    #[must_use]
    pub fn day(&self) -> Option<DayKey> {
        DayKey::of(self.timestamp)
    }
}

impl Display for TimePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.timestamp, self.value)
    }
}
