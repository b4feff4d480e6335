use crate::Timestamp;

use std::path::PathBuf;
use thiserror::Error;

/// Why a single source record was rejected at the parsing boundary.
///
/// Rejected records are dropped from the output and reported through
/// [`Decoded::rejected`](crate::Decoded::rejected); they never poison the
/// rest of the series with NaN.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum InvalidSample {
    #[error("record is not a JSON object")]
    NotAnObject,

    #[error("missing field `{field}`")]
    MissingField { field: String },

    #[error("field `{field}` is not a number: {raw}")]
    NotANumber { field: String, raw: String },

    #[error("field `{field}` is not finite: {raw}")]
    NonFinite { field: String, raw: String },

    #[error("field `{field}` is not a timestamp: {raw}")]
    InvalidTimestamp { field: String, raw: String },

    #[error("timestamp {0} is outside the supported calendar range")]
    OutOfRange(Timestamp),

    /// Typed decoding failed for a reason other than the above.
    #[error("malformed record: {0}")]
    Malformed(String),
}

/// Failure to load a whole source document.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array of records, found {found}")]
    NotAnArray { found: &'static str },
}
