//! Chart-ready bundles: each indicator paired with the price points that
//! cover its time range.
//!
//! Every `build` returns `None` when the indicator has no data, which tells
//! the caller to skip that chart.

use crate::{
    Dataset, DayKey, EventIndex, FundingSample, MarketEvent, Segment, SourceSchema, TimePoint,
    TimeRange, align_to_points, daily_funding, segment_by_sign,
};

use serde::Serialize;
use tracing::debug;

/// An indicator series with its aligned price overlay.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct IndicatorChart {
    indicator: Vec<TimePoint>,
    price: Vec<TimePoint>,
}

impl IndicatorChart {
    /// Sorts `indicator` and aligns `prices` to its range.
    #[must_use]
    pub fn build(prices: &[TimePoint], mut indicator: Vec<TimePoint>) -> Option<Self> {
        if indicator.is_empty() {
            debug!("no indicator data, skipping chart");
            return None;
        }

        indicator.sort_by_key(TimePoint::timestamp);
        let price = align_to_points(prices, &indicator).to_vec();

        Some(Self { indicator, price })
    }

    /// Extracts the indicator from `dataset` with `schema`, then builds.
    #[must_use]
    pub fn from_dataset(
        prices: &[TimePoint],
        dataset: &Dataset,
        schema: &SourceSchema,
    ) -> Option<Self> {
        Self::build(prices, dataset.points(schema).into_records())
    }

    #[must_use]
    pub fn indicator(&self) -> &[TimePoint] {
        &self.indicator
    }

    #[must_use]
    pub fn price(&self) -> &[TimePoint] {
        &self.price
    }
}

/// Daily funding rate, its sign segments, and the aligned price overlay.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct FundingChart {
    daily: Vec<TimePoint>,
    segments: Vec<Segment>,
    price: Vec<TimePoint>,
}

impl FundingChart {
    #[must_use]
    pub fn build(prices: &[TimePoint], samples: &[FundingSample]) -> Option<Self> {
        let daily = daily_funding(samples);
        if daily.is_empty() {
            debug!("no funding data, skipping chart");
            return None;
        }

        let price = align_to_points(prices, &daily).to_vec();
        let segments = segment_by_sign(&daily);

        Some(Self {
            daily,
            segments,
            price,
        })
    }

    #[must_use]
    pub fn from_dataset(prices: &[TimePoint], dataset: &Dataset) -> Option<Self> {
        Self::build(prices, dataset.decode::<FundingSample>().records())
    }

    /// One rate per UTC day, ascending.
    #[must_use]
    pub fn daily(&self) -> &[TimePoint] {
        &self.daily
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn price(&self) -> &[TimePoint] {
        &self.price
    }
}

/// Open interest in contracts and in notional value, sharing one price
/// overlay aligned to both.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct OpenInterestChart {
    contracts: Vec<TimePoint>,
    notional: Vec<TimePoint>,
    price: Vec<TimePoint>,
}

impl OpenInterestChart {
    #[must_use]
    pub fn build(
        prices: &[TimePoint],
        mut contracts: Vec<TimePoint>,
        mut notional: Vec<TimePoint>,
    ) -> Option<Self> {
        let Some(range) = TimeRange::spanning(
            contracts
                .iter()
                .chain(&notional)
                .map(TimePoint::timestamp),
        ) else {
            debug!("no open interest data, skipping chart");
            return None;
        };

        contracts.sort_by_key(TimePoint::timestamp);
        notional.sort_by_key(TimePoint::timestamp);
        let price = range.slice(prices).to_vec();

        Some(Self {
            contracts,
            notional,
            price,
        })
    }

    #[must_use]
    pub fn from_dataset(prices: &[TimePoint], dataset: &Dataset) -> Option<Self> {
        Self::build(
            prices,
            dataset.points(&SourceSchema::open_interest()).into_records(),
            dataset
                .points(&SourceSchema::open_interest_value())
                .into_records(),
        )
    }

    #[must_use]
    pub fn contracts(&self) -> &[TimePoint] {
        &self.contracts
    }

    #[must_use]
    pub fn notional(&self) -> &[TimePoint] {
        &self.notional
    }

    #[must_use]
    pub fn price(&self) -> &[TimePoint] {
        &self.price
    }
}

/// Price series annotated with market events.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct Timeline {
    price: Vec<TimePoint>,
    markers: Vec<bool>,
    events: EventIndex,
}

impl Timeline {
    /// `None` when there are no prices to draw.
    #[must_use]
    pub fn build(price: Vec<TimePoint>, events: EventIndex) -> Option<Self> {
        if price.is_empty() {
            debug!("no price data, skipping timeline");
            return None;
        }

        let markers = events.markers(&price);

        Some(Self {
            price,
            markers,
            events,
        })
    }

    #[must_use]
    pub fn price(&self) -> &[TimePoint] {
        &self.price
    }

    /// Per price point: whether its day has events.
    #[must_use]
    pub fn markers(&self) -> &[bool] {
        &self.markers
    }

    #[must_use]
    pub fn events(&self) -> &EventIndex {
        &self.events
    }

    /// Day of the price point at `index`, as reported by a hover or click.
    #[must_use]
    pub fn day_at(&self, index: usize) -> Option<DayKey> {
        self.price.get(index).and_then(TimePoint::day)
    }

    /// Events of the day at `index`.
    #[must_use]
    pub fn events_at(&self, index: usize) -> &[MarketEvent] {
        self.day_at(index)
            .map(|day| self.events.on(day))
            .unwrap_or_default()
    }
}
