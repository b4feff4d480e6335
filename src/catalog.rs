use crate::{
    Dataset, FundingChart, IndicatorChart, Kline, LoadError, MarketEvent,
    OpenInterestChart, SourceSchema, TimePoint, Timeline, price_series,
};

use serde::{Deserialize, Serialize};
use std::{
    fmt::Display,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// One input document of the dashboard.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Source {
    Klines,
    FundingRate,
    LongShortRatio,
    OpenInterest,
    ExchangeBalance,
    TransactionVolume,
    MarketEvents,
}

impl Source {
    pub const ALL: [Self; 7] = [
        Self::Klines,
        Self::FundingRate,
        Self::LongShortRatio,
        Self::OpenInterest,
        Self::ExchangeBalance,
        Self::TransactionVolume,
        Self::MarketEvents,
    ];
}

impl Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Klines => "klines",
            Self::FundingRate => "funding rate",
            Self::LongShortRatio => "long/short ratio",
            Self::OpenInterest => "open interest",
            Self::ExchangeBalance => "exchange balance",
            Self::TransactionVolume => "transaction volume",
            Self::MarketEvents => "market events",
        };
        f.write_str(name)
    }
}

/// File names of the dashboard's input documents, relative to a data
/// directory.
///
/// Deserializes from JSON; missing keys keep their default file name.
///
/// # Example
///
/// ```
/// use quantedge_overlay::{DataCatalog, Source};
///
/// let catalog = DataCatalog::from_json_str(r#"{"klines": "eth_kline_1d.json"}"#).unwrap();
///
/// assert_eq!(catalog.file(Source::Klines), "eth_kline_1d.json");
/// assert_eq!(catalog.file(Source::FundingRate), "btcusdt_funding_rate.json");
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DataCatalog {
    klines: String,
    funding_rate: String,
    long_short_ratio: String,
    open_interest: String,
    exchange_balance: String,
    transaction_volume: String,
    market_events: String,
}

impl Default for DataCatalog {
    fn default() -> Self {
        Self {
            klines: "btcusdt_kline_1d.json".to_owned(),
            funding_rate: "btcusdt_funding_rate.json".to_owned(),
            long_short_ratio: "btcusdt_long_short_ratio_1d.json".to_owned(),
            open_interest: "btcusdt_open_interest_1d.json".to_owned(),
            exchange_balance: "btc_exchange_balance.json".to_owned(),
            transaction_volume: "btc_transaction_volume.json".to_owned(),
            market_events: "market_events_cryptocompare.json".to_owned(),
        }
    }
}

impl DataCatalog {
    /// # Errors
    ///
    /// Returns [`LoadError::Json`] if `text` is not a valid catalog.
    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(text)?)
    }

    #[must_use]
    pub fn file(&self, source: Source) -> &str {
        match source {
            Source::Klines => &self.klines,
            Source::FundingRate => &self.funding_rate,
            Source::LongShortRatio => &self.long_short_ratio,
            Source::OpenInterest => &self.open_interest,
            Source::ExchangeBalance => &self.exchange_balance,
            Source::TransactionVolume => &self.transaction_volume,
            Source::MarketEvents => &self.market_events,
        }
    }

    #[must_use]
    pub fn path(&self, root: impl AsRef<Path>, source: Source) -> PathBuf {
        root.as_ref().join(self.file(source))
    }

    /// Reads `source` under `root`; an unavailable document is empty.
    #[must_use]
    pub fn load(&self, root: impl AsRef<Path>, source: Source) -> Dataset {
        Dataset::load_or_empty(self.path(root, source))
    }

    /// Loads every document under `root` and assembles all charts.
    #[must_use]
    pub fn dashboard(&self, root: impl AsRef<Path>) -> Dashboard {
        let root = root.as_ref();
        let load = |source: Source| {
            let dataset = self.load(root, source);
            debug!(%source, records = dataset.len(), "source loaded");
            dataset
        };

        let klines = load(Source::Klines).decode::<Kline>();
        let prices = price_series(klines.records());
        let events = load(Source::MarketEvents).decode::<MarketEvent>();

        let dashboard = Dashboard {
            funding: FundingChart::from_dataset(&prices, &load(Source::FundingRate)),
            long_short_ratio: IndicatorChart::from_dataset(
                &prices,
                &load(Source::LongShortRatio),
                &SourceSchema::long_short_ratio(),
            ),
            open_interest: OpenInterestChart::from_dataset(&prices, &load(Source::OpenInterest)),
            exchange_balance: IndicatorChart::from_dataset(
                &prices,
                &load(Source::ExchangeBalance),
                &SourceSchema::exchange_balance(),
            ),
            transaction_volume: IndicatorChart::from_dataset(
                &prices,
                &load(Source::TransactionVolume),
                &SourceSchema::transaction_volume(),
            ),
            timeline: Timeline::build(prices.clone(), events.into_records().into_iter().collect()),
            prices,
        };

        info!(root = %root.display(), charts = dashboard.chart_count(), "dashboard assembled");

        dashboard
    }
}

/// Every chart of the dashboard; a chart without data is `None`.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct Dashboard {
    prices: Vec<TimePoint>,
    funding: Option<FundingChart>,
    long_short_ratio: Option<IndicatorChart>,
    open_interest: Option<OpenInterestChart>,
    exchange_balance: Option<IndicatorChart>,
    transaction_volume: Option<IndicatorChart>,
    timeline: Option<Timeline>,
}

impl Dashboard {
    #[must_use]
    pub fn prices(&self) -> &[TimePoint] {
        &self.prices
    }

    #[must_use]
    pub fn funding(&self) -> Option<&FundingChart> {
        self.funding.as_ref()
    }

    #[must_use]
    pub fn long_short_ratio(&self) -> Option<&IndicatorChart> {
        self.long_short_ratio.as_ref()
    }

    #[must_use]
    pub fn open_interest(&self) -> Option<&OpenInterestChart> {
        self.open_interest.as_ref()
    }

    #[must_use]
    pub fn exchange_balance(&self) -> Option<&IndicatorChart> {
        self.exchange_balance.as_ref()
    }

    #[must_use]
    pub fn transaction_volume(&self) -> Option<&IndicatorChart> {
        self.transaction_volume.as_ref()
    }

    #[must_use]
    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    /// Number of charts that have data.
    #[must_use]
    pub fn chart_count(&self) -> usize {
        [
            self.funding.is_some(),
            self.long_short_ratio.is_some(),
            self.open_interest.is_some(),
            self.exchange_balance.is_some(),
            self.transaction_volume.is_some(),
            self.timeline.is_some(),
        ]
        .into_iter()
        .filter(|&present| present)
        .count()
    }
}
