use crate::{TimePoint, Timestamp};

use std::fmt::{Debug, Display};

/// Closed time interval `[start, end]`.
///
/// # Example
///
/// ```
/// use quantedge_overlay::TimeRange;
///
/// let range = TimeRange::spanning([30, 10, 20]).unwrap();
/// assert_eq!((range.start(), range.end()), (10, 30));
/// assert!(range.contains(10) && range.contains(30));
/// assert!(!range.contains(31));
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct TimeRange {
    start: Timestamp,
    end: Timestamp,
}

impl TimeRange {
    /// # Panics
    ///
    /// Panics if `start > end`.
    #[must_use]
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        assert!(start <= end, "range start must not exceed end: {start} > {end}");
        Self { start, end }
    }

    /// Smallest range covering every timestamp, or `None` for no timestamps.
    #[must_use]
    pub fn spanning(timestamps: impl IntoIterator<Item = Timestamp>) -> Option<Self> {
        timestamps.into_iter().fold(None, |range, t| {
            Some(match range {
                None => Self { start: t, end: t },
                Some(Self { start, end }) => Self {
                    start: start.min(t),
                    end: end.max(t),
                },
            })
        })
    }

    #[inline]
    #[must_use]
    pub fn start(&self) -> Timestamp {
        self.start
    }

    #[inline]
    #[must_use]
    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Inclusive on both bounds.
    #[inline]
    #[must_use]
    pub fn contains(&self, timestamp: Timestamp) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }

    /// The contiguous run of `series` that falls within this range.
    ///
    /// `series` must be sorted ascending by timestamp.
    #[must_use]
    pub fn slice<'a>(&self, series: &'a [TimePoint]) -> &'a [TimePoint] {
        debug_assert!(
            series.is_sorted_by_key(TimePoint::timestamp),
            "series must be sorted by timestamp"
        );

        let from = series.partition_point(|p| p.timestamp() < self.start);
        let to = series.partition_point(|p| p.timestamp() <= self.end);

        &series[from..to.max(from)]
    }
}

impl Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Price points that fall within the indicator's observed time range.
///
/// `date_key` selects each indicator record's timestamp; the range runs from
/// the earliest to the latest of them, both inclusive. The result is a
/// sub-slice of `full`, which must be sorted ascending. Either input empty
/// gives an empty slice.
///
/// # Example
///
/// ```
/// use quantedge_overlay::{TimePoint, align_to_range};
///
/// let prices: Vec<TimePoint> = (1..=10).map(|t| TimePoint::new(t, 100.0)).collect();
/// let ratios = [(5_i64, 1.1), (3, 0.9), (4, 1.0)];
///
/// let aligned = align_to_range(&prices, &ratios, |&(t, _)| t);
/// assert_eq!(aligned, &prices[2..5]);
/// ```
#[must_use]
pub fn align_to_range<'a, R>(
    full: &'a [TimePoint],
    indicator: &[R],
    date_key: impl Fn(&R) -> Timestamp,
) -> &'a [TimePoint] {
    match TimeRange::spanning(indicator.iter().map(date_key)) {
        Some(range) => range.slice(full),
        None => &[],
    }
}

/// [`align_to_range`] for an indicator already expressed as points.
#[must_use]
pub fn align_to_points<'a>(full: &'a [TimePoint], indicator: &[TimePoint]) -> &'a [TimePoint] {
    align_to_range(full, indicator, TimePoint::timestamp)
}
