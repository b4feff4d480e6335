use crate::{DayKey, TimePoint, Timestamp, numeric};

use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// One raw perpetual funding-rate sample.
///
/// Deserializes from Binance's `fundingRate` endpoint records, where
/// `fundingRate` is a numeric string.
#[derive(Clone, Copy, PartialEq, Debug, Deserialize)]
pub struct FundingSample {
    #[serde(rename = "fundingTime", deserialize_with = "numeric::de_timestamp")]
    funding_time: Timestamp,
    #[serde(rename = "fundingRate", deserialize_with = "numeric::de_number")]
    funding_rate: f64,
}

impl FundingSample {
    #[must_use]
    pub fn new(funding_time: Timestamp, funding_rate: f64) -> Self {
        Self {
            funding_time,
            funding_rate,
        }
    }

    #[inline]
    #[must_use]
    pub fn funding_time(&self) -> Timestamp {
        self.funding_time
    }

    #[inline]
    #[must_use]
    pub fn funding_rate(&self) -> f64 {
        self.funding_rate
    }
}

impl From<FundingSample> for TimePoint {
    fn from(sample: FundingSample) -> Self {
        TimePoint::new(sample.funding_time, sample.funding_rate)
    }
}

/// Collapses funding samples to one rate per UTC day.
///
/// See [`daily_last`].
///
/// # Example
///
/// ```
/// use quantedge_overlay::{FundingSample, TimePoint, daily_funding};
///
/// const JAN_1: i64 = 1_704_067_200_000;
/// const HOUR: i64 = 3_600_000;
///
/// let samples = [
///     FundingSample::new(JAN_1 + 13 * HOUR, 0.02),
///     FundingSample::new(JAN_1 + HOUR, 0.01),
/// ];
///
/// assert_eq!(daily_funding(&samples), [TimePoint::new(JAN_1, 0.02)]);
/// ```
#[must_use]
pub fn daily_funding(samples: &[FundingSample]) -> Vec<TimePoint> {
    daily_last(samples.iter().copied().map(TimePoint::from))
}

/// Collapses a series to one point per UTC calendar day.
///
/// Each day keeps the value of its chronologically last sample, stamped at
/// that day's UTC midnight. Input order does not matter; samples sharing
/// an exact timestamp resolve to the later one in input order. Output is
/// sorted ascending with no duplicate days.
#[must_use]
pub fn daily_last(points: impl IntoIterator<Item = TimePoint>) -> Vec<TimePoint> {
    let mut sorted: Vec<TimePoint> = points.into_iter().collect();
    sorted.sort_by_key(TimePoint::timestamp);

    let mut days: BTreeMap<DayKey, f64> = BTreeMap::new();
    for point in &sorted {
        if !point.value().is_finite() {
            warn!(timestamp = point.timestamp(), "dropping non-finite sample");
            continue;
        }

        match point.day() {
            Some(day) => {
                days.insert(day, point.value());
            }
            None => warn!(timestamp = point.timestamp(), "dropping sample outside calendar range"),
        }
    }

    debug!(samples = sorted.len(), days = days.len(), "aggregated to daily");

    days.into_iter()
        .map(|(day, value)| TimePoint::new(day.midnight(), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{at, pt};
    use serde_json::json;

    fn sample(day: u32, hour: u32, rate: f64) -> FundingSample {
        FundingSample::new(at(2024, 1, day, hour), rate)
    }

    #[test]
    fn empty_input() {
        assert!(daily_funding(&[]).is_empty());
        assert!(daily_last(Vec::new()).is_empty());
    }

    #[test]
    fn last_sample_of_day_wins() {
        let samples = [sample(1, 1, 0.01), sample(1, 13, 0.02)];
        assert_eq!(daily_funding(&samples), [pt(at(2024, 1, 1, 0), 0.02)]);
    }

    #[test]
    fn last_wins_regardless_of_input_order() {
        let samples = [sample(1, 16, 0.03), sample(1, 0, 0.01), sample(1, 8, 0.02)];
        assert_eq!(daily_funding(&samples), [pt(at(2024, 1, 1, 0), 0.03)]);
    }

    #[test]
    fn one_point_per_day_sorted() {
        let samples = [
            sample(3, 8, 0.3),
            sample(1, 8, 0.1),
            sample(2, 0, -0.2),
            sample(2, 16, 0.2),
            sample(1, 16, 0.15),
        ];
        assert_eq!(
            daily_funding(&samples),
            [
                pt(at(2024, 1, 1, 0), 0.15),
                pt(at(2024, 1, 2, 0), 0.2),
                pt(at(2024, 1, 3, 0), 0.3),
            ]
        );
    }

    #[test]
    fn day_boundary_is_utc_midnight() {
        let samples = [
            FundingSample::new(at(2024, 1, 2, 0) - 1, 0.1),
            FundingSample::new(at(2024, 1, 2, 0), 0.2),
        ];
        assert_eq!(
            daily_funding(&samples),
            [pt(at(2024, 1, 1, 0), 0.1), pt(at(2024, 1, 2, 0), 0.2)]
        );
    }

    #[test]
    fn already_daily_is_unchanged() {
        let daily = vec![
            pt(at(2024, 1, 1, 0), 0.01),
            pt(at(2024, 1, 2, 0), -0.02),
            pt(at(2024, 1, 5, 0), 0.0),
        ];
        assert_eq!(daily_last(daily.clone()), daily);
    }

    #[test]
    fn equal_timestamps_resolve_to_later_record() {
        let samples = [sample(1, 8, 0.1), sample(1, 8, 0.2)];
        assert_eq!(daily_funding(&samples), [pt(at(2024, 1, 1, 0), 0.2)]);
    }

    #[test]
    fn deserializes_binance_record() {
        let record = json!({
            "symbol": "BTCUSDT",
            "fundingTime": 1_704_096_000_000_i64,
            "fundingRate": "0.00037409",
            "markPrice": "42500.1"
        });
        let sample: FundingSample = serde_json::from_value(record).unwrap();
        assert_eq!(sample, FundingSample::new(1_704_096_000_000, 0.000_374_09));
    }
}
