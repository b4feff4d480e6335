#![allow(dead_code)]

use quantedge_overlay::{Dataset, Kline, TimePoint, Timestamp, price_series};
use serde::{Deserialize, de::DeserializeOwned};

/// Directory holding one JSON document per source, named as in the
/// default `DataCatalog`.
pub const DATA_DIR: &str = "tests/fixtures/data";

pub const JAN_1: Timestamp = 1_704_067_200_000;
pub const DAY: Timestamp = 86_400_000;
pub const HOUR: Timestamp = 3_600_000;

/// Midnight UTC of January `day`, 2024.
pub fn jan(day: i64) -> Timestamp {
    JAN_1 + (day - 1) * DAY
}

/// Expected value at a timestamp.
#[derive(Debug, Deserialize)]
pub struct RefValue {
    pub open_time: Timestamp,
    pub expected: f64,
}

/// Load a JSON document from the fixture directory.
pub fn load_dataset(file: &str) -> Dataset {
    let path = format!("{DATA_DIR}/{file}");
    Dataset::from_path(&path).unwrap_or_else(|e| panic!("failed to load {path}: {e}"))
}

/// Load the fixture klines and build the price series.
///
/// Jan 1-10 2024, except Jan 7 whose close is `NaN`.
pub fn load_prices() -> Vec<TimePoint> {
    let klines = load_dataset("btcusdt_kline_1d.json").decode::<Kline>();
    assert_eq!(klines.rejected().len(), 1, "only the NaN close is rejected");
    price_series(klines.records())
}

/// Load expected values from a CSV file.
pub fn load_ref_values(path: &str) -> Vec<RefValue> {
    load_records(path, "invalid reference record")
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Assert every point's timestamp lies within `[start, end]`.
pub fn assert_within(points: &[TimePoint], start: Timestamp, end: Timestamp) {
    for point in points {
        assert!(
            (start..=end).contains(&point.timestamp()),
            "{point} outside [{start}, {end}]"
        );
    }
}

pub fn assert_sorted(points: &[TimePoint]) {
    assert!(
        points.windows(2).all(|w| w[0].timestamp() <= w[1].timestamp()),
        "series is not sorted: {points:?}"
    );
}

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
