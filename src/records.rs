use crate::{InvalidSample, LoadError, SourceSchema, TimePoint};

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{any::type_name, fs::File, io::BufReader, io::Read, path::Path};
use tracing::{debug, warn};

/// An array of JSON records from one source document.
///
/// `null` and `[]` both load as an empty dataset: absence of data is never an
/// error. Records are validated lazily, per record, by [`decode`] and
/// [`points`], so one bad row costs one sample rather than the document.
///
/// [`decode`]: Dataset::decode
/// [`points`]: Dataset::points
///
/// # Example
///
/// ```
/// use quantedge_overlay::{Dataset, SourceSchema};
///
/// let dataset = Dataset::from_json_str(
///     r#"[{"timestamp": 1704067200000, "longShortRatio": "1.25"},
///         {"timestamp": 1704153600000, "longShortRatio": "n/a"}]"#,
/// )
/// .unwrap();
///
/// let decoded = dataset.points(&SourceSchema::long_short_ratio());
/// assert_eq!(decoded.records().len(), 1);
/// assert_eq!(decoded.rejected()[0].index(), 1);
///
/// assert!(Dataset::from_json_str("null").unwrap().is_empty());
/// ```
#[derive(Clone, Default, PartialEq, Debug)]
pub struct Dataset {
    records: Vec<Value>,
}

impl Dataset {
    /// An empty dataset, the "no data" sentinel.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wraps an already parsed JSON document.
    ///
    /// # Errors
    ///
    /// [`LoadError::NotAnArray`] if `value` is neither `null` nor an array.
    pub fn from_value(value: Value) -> Result<Self, LoadError> {
        match value {
            Value::Null => Ok(Self::empty()),
            Value::Array(records) => Ok(Self { records }),
            other => Err(LoadError::NotAnArray {
                found: kind(&other),
            }),
        }
    }

    /// Parses a JSON document.
    ///
    /// # Errors
    ///
    /// [`LoadError::Json`] on a syntax error, [`LoadError::NotAnArray`] if the
    /// document is not `null` or an array.
    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// Parses a JSON document from a reader.
    ///
    /// # Errors
    ///
    /// See [`from_json_str`](Dataset::from_json_str). I/O failures surface as
    /// [`LoadError::Json`].
    pub fn from_reader(reader: impl Read) -> Result<Self, LoadError> {
        Self::from_value(serde_json::from_reader(reader)?)
    }

    /// Reads and parses a JSON file.
    ///
    /// # Errors
    ///
    /// [`LoadError::Io`] if the file cannot be opened, otherwise as
    /// [`from_reader`](Dataset::from_reader).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_reader(BufReader::new(file))
    }

    /// Reads a JSON file, degrading any failure to an empty dataset.
    ///
    /// This is the boundary where an unavailable source becomes "no data";
    /// the failure is logged at `warn` level.
    #[must_use]
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        match Self::from_path(path) {
            Ok(dataset) => {
                debug!(path = %path.display(), records = dataset.len(), "loaded dataset");
                dataset
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "data unavailable, using empty dataset");
                Self::empty()
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    /// Deserializes every record into `T`, dropping the ones that fail.
    #[must_use]
    pub fn decode<T: DeserializeOwned>(&self) -> Decoded<T> {
        let mut decoded = Decoded::with_capacity(self.records.len());

        for (index, record) in self.records.iter().enumerate() {
            let result = if record.is_object() {
                T::deserialize(record).map_err(|e| InvalidSample::Malformed(e.to_string()))
            } else {
                Err(InvalidSample::NotAnObject)
            };

            match result {
                Ok(value) => decoded.records.push(value),
                Err(reason) => decoded.reject(index, reason, type_name::<T>()),
            }
        }

        decoded
    }

    /// Extracts `(time, value)` samples using `schema`, in document order.
    #[must_use]
    pub fn points(&self, schema: &SourceSchema) -> Decoded<TimePoint> {
        let resolved = schema.resolve(&self.records);
        let mut decoded = Decoded::with_capacity(self.records.len());

        for (index, record) in self.records.iter().enumerate() {
            match resolved.extract(record) {
                Ok(point) => decoded.records.push(point),
                Err(reason) => decoded.reject(index, reason, schema.value_field()),
            }
        }

        decoded
    }
}

impl From<Vec<Value>> for Dataset {
    fn from(records: Vec<Value>) -> Self {
        Self { records }
    }
}

/// A record dropped at the parsing boundary.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Rejected {
    index: usize,
    reason: InvalidSample,
}

impl Rejected {
    /// Position of the record in its source document.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn reason(&self) -> &InvalidSample {
        &self.reason
    }
}

/// Records that passed validation, plus the ones that did not.
#[derive(Clone, PartialEq, Debug)]
pub struct Decoded<T> {
    records: Vec<T>,
    rejected: Vec<Rejected>,
}

impl<T> Decoded<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            rejected: Vec::new(),
        }
    }

    fn reject(&mut self, index: usize, reason: InvalidSample, source: &str) {
        warn!(source, index, %reason, "dropping invalid sample");
        self.rejected.push(Rejected { index, reason });
    }

    #[must_use]
    pub fn records(&self) -> &[T] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<T> {
        self.records
    }

    #[must_use]
    pub fn rejected(&self) -> &[Rejected] {
        &self.rejected
    }

    /// `true` if no record was rejected.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
