use crate::{DayKey, TimePoint};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A dated market news event.
///
/// Deserializes from the news collector's records. Only `date` and `title`
/// are required; records without a valid `YYYY-MM-DD` date are rejected
/// when the dataset is decoded.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MarketEvent {
    date: DayKey,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default = "MarketEvent::no_url")]
    url: String,
    #[serde(default = "MarketEvent::unknown_source")]
    source: String,
}

impl MarketEvent {
    #[must_use]
    pub fn new(date: DayKey, title: impl Into<String>) -> Self {
        Self {
            date,
            title: title.into(),
            description: None,
            url: Self::no_url(),
            source: Self::unknown_source(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_link(mut self, url: impl Into<String>, source: impl Into<String>) -> Self {
        self.url = url.into();
        self.source = source.into();
        self
    }

    #[must_use]
    pub fn date(&self) -> DayKey {
        self.date
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Hover text: the description, or the title when there is none.
    #[must_use]
    pub fn summary(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(&self.title)
    }

    fn no_url() -> String {
        "#".to_owned()
    }

    fn unknown_source() -> String {
        "Unknown".to_owned()
    }
}

/// Market events grouped by UTC day.
///
/// # Example
///
/// ```
/// use quantedge_overlay::{DayKey, EventIndex, MarketEvent};
///
/// let day = DayKey::from_ymd(2024, 1, 10).unwrap();
/// let index = EventIndex::new([
///     MarketEvent::new(day, "Spot ETF approved"),
///     MarketEvent::new(day, "Exchange outage"),
/// ]);
///
/// assert_eq!(index.count_on(day), 2);
/// assert_eq!(index.on(day)[0].title(), "Spot ETF approved");
/// ```
#[derive(Clone, Default, PartialEq, Eq, Debug, Serialize)]
#[serde(transparent)]
pub struct EventIndex {
    by_day: BTreeMap<DayKey, Vec<MarketEvent>>,
}

impl EventIndex {
    /// Groups `events` by day, keeping input order within a day.
    #[must_use]
    pub fn new(events: impl IntoIterator<Item = MarketEvent>) -> Self {
        let mut by_day: BTreeMap<DayKey, Vec<MarketEvent>> = BTreeMap::new();
        for event in events {
            by_day.entry(event.date).or_default().push(event);
        }

        Self { by_day }
    }

    /// Events on `day`, empty if there are none.
    #[must_use]
    pub fn on(&self, day: DayKey) -> &[MarketEvent] {
        self.by_day.get(&day).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn count_on(&self, day: DayKey) -> usize {
        self.on(day).len()
    }

    #[must_use]
    pub fn has_events(&self, day: DayKey) -> bool {
        self.by_day.contains_key(&day)
    }

    /// Days with at least one event, ascending.
    pub fn days(&self) -> impl Iterator<Item = DayKey> + '_ {
        self.by_day.keys().copied()
    }

    /// Total number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_day.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_day.is_empty()
    }

    /// One flag per point: whether the point's UTC day has events.
    #[must_use]
    pub fn markers(&self, points: &[TimePoint]) -> Vec<bool> {
        points
            .iter()
            .map(|p| p.day().is_some_and(|day| self.has_events(day)))
            .collect()
    }
}

impl FromIterator<MarketEvent> for EventIndex {
    fn from_iter<I: IntoIterator<Item = MarketEvent>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dataset, test_util::{at, pt}};
    use serde_json::json;

    fn day(d: u32) -> DayKey {
        DayKey::from_ymd(2024, 1, d).unwrap()
    }

    mod market_event {
        use super::*;

        #[test]
        fn decodes_collector_record() {
            let event: MarketEvent = serde_json::from_value(json!({
                "date": "2024-01-10",
                "title": "SEC approves spot Bitcoin ETFs",
                "description": "The SEC approved...",
                "url": "https://example.com/etf",
                "source": "CoinDesk"
            }))
            .unwrap();

            assert_eq!(event.date(), day(10));
            assert_eq!(event.source(), "CoinDesk");
            assert_eq!(event.summary(), "The SEC approved...");
        }

        #[test]
        fn defaults_for_optional_fields() {
            let event: MarketEvent =
                serde_json::from_value(json!({"date": "2024-01-10", "title": "Halving"})).unwrap();
            assert_eq!(event.url(), "#");
            assert_eq!(event.source(), "Unknown");
            assert_eq!(event.description(), None);
            assert_eq!(event.summary(), "Halving");
        }

        #[test]
        fn empty_description_falls_back_to_title() {
            let event = MarketEvent::new(day(1), "Title").with_description("");
            assert_eq!(event.summary(), "Title");
        }

        #[test]
        fn invalid_dates_are_rejected() {
            let dataset = Dataset::from(vec![
                json!({"date": "2024-01-10", "title": "ok"}),
                json!({"date": 20_240_110, "title": "numeric date"}),
                json!({"title": "no date"}),
                json!({"date": "Jan 10", "title": "free text"}),
            ]);
            let decoded = dataset.decode::<MarketEvent>();
            assert_eq!(decoded.records().len(), 1);
            assert_eq!(decoded.rejected().len(), 3);
        }
    }

    mod index {
        use super::*;

        #[test]
        fn groups_by_day_in_input_order() {
            let index = EventIndex::new([
                MarketEvent::new(day(3), "b"),
                MarketEvent::new(day(1), "a"),
                MarketEvent::new(day(3), "c"),
            ]);

            assert_eq!(index.len(), 3);
            assert_eq!(index.days().collect::<Vec<_>>(), [day(1), day(3)]);
            let titles: Vec<&str> = index.on(day(3)).iter().map(MarketEvent::title).collect();
            assert_eq!(titles, ["b", "c"]);
        }

        #[test]
        fn day_without_events() {
            let index = EventIndex::new([MarketEvent::new(day(1), "a")]);
            assert!(index.on(day(2)).is_empty());
            assert_eq!(index.count_on(day(2)), 0);
            assert!(!index.has_events(day(2)));
        }

        #[test]
        fn empty_index() {
            let index: EventIndex = std::iter::empty().collect();
            assert!(index.is_empty());
            assert_eq!(index.len(), 0);
        }

        #[test]
        fn markers_follow_point_day() {
            let index = EventIndex::new([MarketEvent::new(day(2), "a")]);
            let prices = [
                pt(at(2024, 1, 1, 0), 1.0),
                pt(at(2024, 1, 2, 0), 1.0),
                pt(at(2024, 1, 2, 23), 1.0),
                pt(at(2024, 1, 3, 0), 1.0),
            ];
            assert_eq!(index.markers(&prices), [false, true, true, false]);
        }

        #[test]
        fn serializes_keyed_by_day() {
            let index = EventIndex::new([MarketEvent::new(day(2), "a")]);
            let json = serde_json::to_value(&index).unwrap();
            assert_eq!(json["2024-01-02"][0]["title"], "a");
        }
    }
}
