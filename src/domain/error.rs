//! Domain error types.

use crate::domain::date_label::MonthYear;

/// Failure to turn the raw delimited resource into a [`Dataset`].
///
/// Fatal to loading: no partial dataset is ever returned.
///
/// [`Dataset`]: crate::domain::dataset::Dataset
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("expected a header row and at least one item row, found {rows} row(s)")]
    TooFewRows { rows: usize },

    #[error("header row must have name, category and at least one date column, found {columns} column(s)")]
    TooFewColumns { columns: usize },

    #[error("malformed input at line {line}: {reason}")]
    Malformed { line: u64, reason: String },
}

/// The selected date window cannot be rendered.
///
/// Recoverable: the caller keeps showing whatever it showed before.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidRangeError {
    #[error("no data for start month {requested}")]
    UnknownStart { requested: MonthYear },

    #[error("no data for end month {requested}")]
    UnknownEnd { requested: MonthYear },

    #[error("end date (index {end}) is before start date (index {start})")]
    Inverted { start: usize, end: usize },
}

/// Top-level error type for inflation-tracker.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("failed to read {path}: {reason}")]
    Source { path: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    InvalidRange(#[from] InvalidRangeError),

    #[error("unknown item: {name}")]
    UnknownItem { name: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TrackerError> for std::process::ExitCode {
    fn from(err: &TrackerError) -> Self {
        let code: u8 = match err {
            TrackerError::Io(_) | TrackerError::Source { .. } | TrackerError::Report { .. } => 1,
            TrackerError::ConfigParse { .. }
            | TrackerError::ConfigMissing { .. }
            | TrackerError::ConfigInvalid { .. } => 2,
            TrackerError::Parse(_) => 3,
            TrackerError::InvalidRange(_) | TrackerError::UnknownItem { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
