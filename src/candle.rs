use crate::{Price, Timestamp, numeric};

use serde::Deserialize;

/// Candle data used as input to [`price_series`](crate::price_series).
///
/// Implement this on your own kline type to avoid conversion. Only the open
/// time and close price are read.
///
/// # Example
///
/// ```
/// use quantedge_overlay::{Candle, Price, Timestamp};
///
/// struct MyKline {
///     ts: i64,
///     c: f64,
/// }
///
/// impl Candle for MyKline {
///     fn open_time(&self) -> Timestamp { self.ts }
///     fn close(&self) -> Price { self.c }
/// }
/// ```
pub trait Candle {
    /// Bar open timestamp.
    fn open_time(&self) -> Timestamp;

    /// Closing price of the bar.
    ///
    /// Non-finite values are dropped by the series builder rather than
    /// propagated.
    fn close(&self) -> Price;
}

/// One kline record as written by the Binance kline collector.
///
/// Prices may be JSON numbers or numeric strings. `open_time` and `close`
/// are required; a record whose close does not parse is rejected when the
/// dataset is decoded. The remaining OHLCV fields are optional.
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Kline {
    #[serde(deserialize_with = "numeric::de_timestamp")]
    open_time: Timestamp,
    #[serde(deserialize_with = "numeric::de_number")]
    close: Price,
    #[serde(default, deserialize_with = "numeric::de_opt_number")]
    open: Option<Price>,
    #[serde(default, deserialize_with = "numeric::de_opt_number")]
    high: Option<Price>,
    #[serde(default, deserialize_with = "numeric::de_opt_number")]
    low: Option<Price>,
    #[serde(default, deserialize_with = "numeric::de_opt_number")]
    volume: Option<f64>,
}

impl Kline {
    /// A kline carrying only the fields the price series needs.
    #[must_use]
    pub fn new(open_time: Timestamp, close: Price) -> Self {
        Self {
            open_time,
            close,
            open: None,
            high: None,
            low: None,
            volume: None,
        }
    }

    #[must_use]
    pub fn open(&self) -> Option<Price> {
        self.open
    }

    #[must_use]
    pub fn high(&self) -> Option<Price> {
        self.high
    }

    #[must_use]
    pub fn low(&self) -> Option<Price> {
        self.low
    }

    #[must_use]
    pub fn volume(&self) -> Option<f64> {
        self.volume
    }
}

impl Candle for Kline {
    #[inline]
    fn open_time(&self) -> Timestamp {
        self.open_time
    }

    #[inline]
    fn close(&self) -> Price {
        self.close
    }
}
