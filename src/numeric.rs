//! Field-level parsing shared by schema extraction and typed records.
//!
//! Source documents are loose: Binance sends rates and ratios as strings,
//! collectors write epoch milliseconds or `YYYY-MM-DD` strings for time.
//! Everything is validated here, so no NaN leaves this module.

use crate::{InvalidSample, Timestamp};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value;

const DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Reads a finite number from a JSON number or a numeric string.
pub(crate) fn number(field: &str, value: &Value) -> Result<f64, InvalidSample> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(n) if n.is_finite() => Ok(n),
        Some(_) => Err(InvalidSample::NonFinite {
            field: field.to_owned(),
            raw: value.to_string(),
        }),
        None => Err(InvalidSample::NotANumber {
            field: field.to_owned(),
            raw: value.to_string(),
        }),
    }
}

/// Reads a timestamp from epoch milliseconds or a UTC date string.
pub(crate) fn timestamp(field: &str, value: &Value) -> Result<Timestamp, InvalidSample> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(float_millis)),
        Value::String(s) => parse_date_time(s),
        _ => None,
    };

    parsed.ok_or_else(|| InvalidSample::InvalidTimestamp {
        field: field.to_owned(),
        raw: value.to_string(),
    })
}

/// Parses RFC 3339, naive date-times (taken as UTC, trailing `Z` allowed
/// without seconds), and bare `YYYY-MM-DD` dates (UTC midnight).
pub(crate) fn parse_date_time(s: &str) -> Option<Timestamp> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }

    let naive = s.strip_suffix('Z').unwrap_or(s);
    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc().timestamp_millis())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn float_millis(ms: f64) -> Option<Timestamp> {
    let ms = ms.trunc();
    (ms.is_finite() && ms >= i64::MIN as f64 && ms < i64::MAX as f64).then_some(ms as i64)
}

// The serde adapters below surface `InvalidSample` text through a custom
// error; `Dataset::decode` rewraps it as `InvalidSample::Malformed`.

pub(crate) fn de_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    number("value", &value).map_err(D::Error::custom)
}

pub(crate) fn de_opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => number("value", &value).map(Some).map_err(D::Error::custom),
    }
}

pub(crate) fn de_timestamp<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    timestamp("time", &value).map_err(D::Error::custom)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use serde_json::json;

    const JAN_1: Timestamp = 1_704_067_200_000;
    const HOUR_MS: Timestamp = 3_600_000;

    mod numbers {
        use super::*;

        #[test]
        fn json_number() {
            assert_eq!(number("close", &json!(42_000.5)), Ok(42_000.5));
            assert_eq!(number("close", &json!(7)), Ok(7.0));
        }

        #[test]
        fn numeric_string() {
            assert_eq!(number("fundingRate", &json!("0.00010000")), Ok(0.0001));
            assert_eq!(number("fundingRate", &json!(" -0.5 ")), Ok(-0.5));
        }

        #[test]
        fn garbage_string_is_rejected() {
            assert_eq!(
                number("close", &json!("n/a")),
                Err(InvalidSample::NotANumber {
                    field: "close".into(),
                    raw: "\"n/a\"".into(),
                })
            );
        }

        #[test]
        fn nan_string_is_rejected() {
            assert!(matches!(
                number("close", &json!("NaN")),
                Err(InvalidSample::NonFinite { .. })
            ));
            assert!(matches!(
                number("close", &json!("inf")),
                Err(InvalidSample::NonFinite { .. })
            ));
        }

        #[test]
        fn non_scalar_is_rejected() {
            assert!(matches!(
                number("close", &json!(null)),
                Err(InvalidSample::NotANumber { .. })
            ));
            assert!(matches!(
                number("close", &json!([1.0])),
                Err(InvalidSample::NotANumber { .. })
            ));
            assert!(matches!(
                number("close", &json!(true)),
                Err(InvalidSample::NotANumber { .. })
            ));
        }
    }

    mod timestamps {
        use super::*;

        #[test]
        fn epoch_millis() {
            assert_eq!(timestamp("t", &json!(JAN_1)), Ok(JAN_1));
        }

        #[test]
        fn fractional_millis_truncate() {
            assert_eq!(timestamp("t", &json!(1_000.9)), Ok(1_000));
        }

        #[test]
        fn bare_date_is_utc_midnight() {
            assert_eq!(timestamp("index", &json!("2024-01-01")), Ok(JAN_1));
        }

        #[test]
        fn rfc3339() {
            assert_eq!(
                timestamp("t", &json!("2024-01-01T13:00:00Z")),
                Ok(JAN_1 + 13 * HOUR_MS)
            );
            assert_eq!(
                timestamp("t", &json!("2024-01-01T14:00:00+01:00")),
                Ok(JAN_1 + 13 * HOUR_MS)
            );
        }

        #[test]
        fn minutes_precision_with_zulu() {
            assert_eq!(
                timestamp("t", &json!("2024-01-01T01:00Z")),
                Ok(JAN_1 + HOUR_MS)
            );
        }

        #[test]
        fn readable_collector_format() {
            assert_eq!(
                timestamp("t", &json!("2024-01-01 08:00:00")),
                Ok(JAN_1 + 8 * HOUR_MS)
            );
        }

        #[test]
        fn garbage_is_rejected() {
            assert_eq!(
                timestamp("datetime", &json!("yesterday")),
                Err(InvalidSample::InvalidTimestamp {
                    field: "datetime".into(),
                    raw: "\"yesterday\"".into(),
                })
            );
            assert!(timestamp("t", &json!(null)).is_err());
        }
    }

    mod serde_adapters {
        use super::*;

        #[derive(Deserialize, Debug)]
        struct Row {
            #[serde(deserialize_with = "de_timestamp")]
            at: Timestamp,
            #[serde(deserialize_with = "de_number")]
            value: f64,
            #[serde(default, deserialize_with = "de_opt_number")]
            extra: Option<f64>,
        }

        #[test]
        fn lenient_fields() {
            let row: Row =
                serde_json::from_value(json!({"at": "2024-01-01", "value": "1.5"})).unwrap();
            assert_eq!(row.at, JAN_1);
            assert_eq!(row.value, 1.5);
            assert_eq!(row.extra, None);
        }

        #[test]
        fn optional_field_present() {
            let row: Row =
                serde_json::from_value(json!({"at": 0, "value": 1, "extra": "2"})).unwrap();
            assert_eq!(row.extra, Some(2.0));
        }

        #[test]
        fn bad_value_fails_record() {
            let err = serde_json::from_value::<Row>(json!({"at": 0, "value": "x"})).unwrap_err();
            assert!(err.to_string().contains("is not a number"));
        }
    }
}
