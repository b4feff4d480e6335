use crate::TimePoint;

use serde::{Serialize, Serializer};
use std::{
    fmt::{Debug, Display},
    mem,
};
use tracing::debug;

/// Mathematical sign of a value.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    /// Sign of `value`. Both `0.0` and `-0.0` are [`Sign::Zero`].
    #[inline]
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            Self::Positive
        } else if value < 0.0 {
            Self::Negative
        } else {
            Self::Zero
        }
    }

    /// `-1`, `0`, or `1`.
    #[inline]
    #[must_use]
    pub fn as_i8(self) -> i8 {
        match self {
            Self::Negative => -1,
            Self::Zero => 0,
            Self::Positive => 1,
        }
    }
}

impl Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_i8())
    }
}

impl Serialize for Sign {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.as_i8())
    }
}

/// A contiguous run of same-sign points.
///
/// Serializes as `{"data": [...], "sign": -1 | 0 | 1}`.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct Segment {
    #[serde(rename = "data")]
    points: Vec<TimePoint>,
    sign: Sign,
}

impl Segment {
    fn new(points: Vec<TimePoint>, sign: Sign) -> Self {
        Self { points, sign }
    }

    #[must_use]
    pub fn points(&self) -> &[TimePoint] {
        &self.points
    }

    #[must_use]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    #[must_use]
    pub fn into_points(self) -> Vec<TimePoint> {
        self.points
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Segment({}, {} points)", self.sign, self.points.len())
    }
}

/// Splits a series into runs of equal sign for piecewise coloring.
///
/// Walks `series` once (it must be sorted ascending):
///
/// - a point valued exactly zero closes the current run and becomes a
///   one-point segment of sign zero;
/// - a point whose sign differs from the current run closes that run at a
///   linearly interpolated zero crossing, and the next run starts from the
///   same crossing point;
/// - anything else extends the current run, which takes the sign of its
///   first point.
///
/// Crossing timestamps are rounded to the nearest millisecond.
///
/// # Example
///
/// ```
/// use quantedge_overlay::{Sign, TimePoint, segment_by_sign};
///
/// let segments = segment_by_sign(&[TimePoint::new(1000, 2.0), TimePoint::new(2000, -1.0)]);
/// let crossing = TimePoint::new(1667, 0.0);
///
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[0].sign(), Sign::Positive);
/// assert_eq!(segments[0].points(), [TimePoint::new(1000, 2.0), crossing]);
/// assert_eq!(segments[1].sign(), Sign::Negative);
/// assert_eq!(segments[1].points(), [crossing, TimePoint::new(2000, -1.0)]);
/// ```
#[must_use]
pub fn segment_by_sign(series: &[TimePoint]) -> Vec<Segment> {
    let Some(first) = series.first() else {
        return Vec::new();
    };

    let mut segments = Vec::new();
    let mut run: Vec<TimePoint> = Vec::new();
    let mut run_sign = first.sign();

    for &point in series {
        let sign = point.sign();

        if sign == Sign::Zero {
            if !run.is_empty() {
                segments.push(Segment::new(mem::take(&mut run), run_sign));
            }
            segments.push(Segment::new(vec![point], Sign::Zero));
            run_sign = Sign::Zero;
            continue;
        }

        match run.last() {
            Some(&prev) if sign != run_sign => {
                let zero = zero_crossing(prev, point);
                run.push(zero);
                let closed = mem::replace(&mut run, vec![zero, point]);
                segments.push(Segment::new(closed, run_sign));
                run_sign = sign;
            }
            Some(_) => run.push(point),
            None => {
                run_sign = sign;
                run.push(point);
            }
        }
    }

    if !run.is_empty() {
        segments.push(Segment::new(run, run_sign));
    }

    debug!(points = series.len(), segments = segments.len(), "segmented by sign");

    segments
}

/// Point where the line from `prev` to `curr` crosses zero.
///
/// Only called for non-zero values of opposite sign, so the denominator is
/// never zero and `t` lies in `(0, 1)`.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn zero_crossing(prev: TimePoint, curr: TimePoint) -> TimePoint {
    let t = prev.value() / (prev.value() - curr.value());
    let span = (curr.timestamp() - prev.timestamp()) as f64;
    let offset = (t * span).round() as i64;

    TimePoint::new(prev.timestamp() + offset, 0.0)
}
