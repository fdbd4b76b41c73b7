use std::path::PathBuf;
use thiserror::Error;

use crate::scan::duration::ParseDurationError;

/// Which optional duration flag a parse failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationField {
    Lookback,
    Delay,
}

impl std::fmt::Display for DurationField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DurationField::Lookback => f.write_str("lookback"),
            DurationField::Delay => f.write_str("delay"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid {field} duration {value:?}: {source}")]
    InvalidDurationFormat {
        field: DurationField,
        value: String,
        #[source]
        source: ParseDurationError,
    },

    #[error("Failed to read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unrecognized release file {}: {reason}", path.display())]
    UnrecognizedFormat { path: PathBuf, reason: String },

    #[error("Malformed uptime in {}: {contents:?}", path.display())]
    MalformedUptime { path: PathBuf, contents: String },

    #[error("Timestamp out of range")]
    TimestampOutOfRange,
}

impl Error {
    /// The duration field that failed to parse, if this is a duration error.
    pub fn duration_field(&self) -> Option<DurationField> {
        match self {
            Error::InvalidDurationFormat { field, .. } => Some(*field),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
