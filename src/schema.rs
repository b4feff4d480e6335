use crate::{InvalidSample, TimePoint, numeric};

use serde_json::Value;
use std::fmt::{Debug, Display};

/// Field mapping for one JSON data source.
///
/// Names the field holding the sample value and an ordered list of
/// candidate fields holding its time. The time field is resolved once per
/// dataset (the first candidate present on the first record) and then used
/// for every record, so a document never mixes time fields.
///
/// # Example
///
/// ```
/// use quantedge_overlay::SourceSchema;
///
/// let schema = SourceSchema::builder()
///     .timestamp_field("datetime")
///     .timestamp_field("index")
///     .value_field("exchange_balance")
///     .build();
///
/// assert_eq!(schema, SourceSchema::exchange_balance());
/// assert_eq!(schema.to_string(), "SourceSchema(datetime|index -> exchange_balance)");
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct SourceSchema {
    timestamp_fields: Vec<String>,
    value_field: String,
}

impl SourceSchema {
    /// Returns a new builder with no fields set.
    #[must_use]
    pub fn builder() -> SourceSchemaBuilder {
        SourceSchemaBuilder::new()
    }

    /// Daily kline close price.
    #[must_use]
    pub fn kline_close() -> Self {
        Self::single("open_time", "close")
    }

    /// Raw perpetual funding rate samples.
    #[must_use]
    pub fn funding_rate() -> Self {
        Self::single("fundingTime", "fundingRate")
    }

    /// Global long/short account ratio.
    #[must_use]
    pub fn long_short_ratio() -> Self {
        Self::single("timestamp", "longShortRatio")
    }

    /// Open interest in contracts.
    #[must_use]
    pub fn open_interest() -> Self {
        Self::single("timestamp", "sumOpenInterest")
    }

    /// Open interest notional value.
    #[must_use]
    pub fn open_interest_value() -> Self {
        Self::single("timestamp", "sumOpenInterestValue")
    }

    /// On-chain exchange balance.
    #[must_use]
    pub fn exchange_balance() -> Self {
        Self::on_chain("exchange_balance")
    }

    /// On-chain transaction volume.
    #[must_use]
    pub fn transaction_volume() -> Self {
        Self::on_chain("transaction_volume")
    }

    #[must_use]
    pub fn timestamp_fields(&self) -> &[String] {
        &self.timestamp_fields
    }

    #[must_use]
    pub fn value_field(&self) -> &str {
        &self.value_field
    }

    fn single(timestamp: &str, value: &str) -> Self {
        Self::builder()
            .timestamp_field(timestamp)
            .value_field(value)
            .build()
    }

    // On-chain exports carry the date under `datetime` or, when written from
    // a dataframe index, under `index`.
    fn on_chain(value: &str) -> Self {
        Self::builder()
            .timestamp_field("datetime")
            .timestamp_field("index")
            .value_field(value)
            .build()
    }

    pub(crate) fn resolve(&self, records: &[Value]) -> ResolvedSchema<'_> {
        let first = records.iter().find_map(Value::as_object);

        let timestamp_field = first
            .and_then(|object| {
                self.timestamp_fields
                    .iter()
                    .find(|field| object.get(field.as_str()).is_some_and(|v| !v.is_null()))
            })
            .unwrap_or(&self.timestamp_fields[0]);

        ResolvedSchema {
            timestamp_field,
            value_field: &self.value_field,
        }
    }
}

impl Display for SourceSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SourceSchema({} -> {})",
            self.timestamp_fields.join("|"),
            self.value_field
        )
    }
}

/// Builder for [`SourceSchema`].
///
/// At least one timestamp field and the value field must be set before
/// calling [`build`](SourceSchemaBuilder::build).
#[derive(Default)]
pub struct SourceSchemaBuilder {
    timestamp_fields: Vec<String>,
    value_field: Option<String>,
}

impl SourceSchemaBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Adds a candidate timestamp field. Earlier candidates take priority.
    #[must_use]
    pub fn timestamp_field(mut self, field: impl Into<String>) -> Self {
        self.timestamp_fields.push(field.into());
        self
    }

    /// Sets the value field.
    #[must_use]
    pub fn value_field(mut self, field: impl Into<String>) -> Self {
        self.value_field.replace(field.into());
        self
    }

    /// Builds the schema. Panics if required fields are missing.
    #[must_use]
    pub fn build(self) -> SourceSchema {
        assert!(
            !self.timestamp_fields.is_empty(),
            "timestamp field is required"
        );

        SourceSchema {
            timestamp_fields: self.timestamp_fields,
            value_field: self.value_field.expect("value field is required"),
        }
    }
}

/// A schema with its time field fixed for one dataset.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ResolvedSchema<'a> {
    timestamp_field: &'a str,
    value_field: &'a str,
}

impl ResolvedSchema<'_> {
    pub(crate) fn timestamp_field(&self) -> &str {
        self.timestamp_field
    }

    pub(crate) fn extract(&self, record: &Value) -> Result<TimePoint, InvalidSample> {
        let object = record.as_object().ok_or(InvalidSample::NotAnObject)?;

        let field = |name: &str| {
            object
                .get(name)
                .filter(|v| !v.is_null())
                .ok_or_else(|| InvalidSample::MissingField {
                    field: name.to_owned(),
                })
        };

        let timestamp = numeric::timestamp(self.timestamp_field, field(self.timestamp_field)?)?;
        let value = numeric::number(self.value_field, field(self.value_field)?)?;

        Ok(TimePoint::new(timestamp, value))
    }
}
