//! Time alignment of market indicator series against a price overlay.
//!
//! Raw documents (klines, funding rates, positioning ratios, on-chain
//! metrics, news) come in as loose JSON arrays through [`Dataset`].
//! [`SourceSchema`] and serde turn records into [`TimePoint`]s, rejecting
//! anything non-numeric. The transforms then:
//!
//! - build a sorted close-price series ([`price_series`]);
//! - clip it to an indicator's time range ([`align_to_range`],
//!   [`align_to_points`]);
//! - collapse intraday samples into one value per UTC day
//!   ([`daily_funding`], [`daily_last`]);
//! - split a series into same-sign runs for piecewise coloring
//!   ([`segment_by_sign`]).
//!
//! The chart types ([`FundingChart`], [`IndicatorChart`],
//! [`OpenInterestChart`], [`Timeline`]) bundle those results and serialize
//! to the `{x, y}` shape a chart renderer consumes. Missing or empty input
//! always yields empty output, never an error.
//!
//! Diagnostics go through [`tracing`]; install a subscriber to see them.

mod candle;
mod catalog;
mod charts;
mod daily;
mod day;
mod error;
mod events;
mod numeric;
mod panel;
mod price_series;
mod range;
mod records;
mod schema;
mod segment;
mod time_point;

pub use crate::candle::{Candle, Kline};
pub use crate::day::DayKey;
pub use crate::error::{InvalidSample, LoadError};
pub use crate::time_point::{Price, TimePoint, Timestamp};

pub use crate::records::{Dataset, Decoded, Rejected};
pub use crate::schema::{SourceSchema, SourceSchemaBuilder};

pub use crate::daily::{FundingSample, daily_funding, daily_last};
pub use crate::price_series::price_series;
pub use crate::range::{TimeRange, align_to_points, align_to_range};
pub use crate::segment::{Segment, Sign, segment_by_sign};

pub use crate::events::{EventIndex, MarketEvent};
pub use crate::panel::EventPanel;

pub use crate::catalog::{Dashboard, DataCatalog, Source};
pub use crate::charts::{FundingChart, IndicatorChart, OpenInterestChart, Timeline};

#[cfg(test)]
mod test_util;
