use std::path::PathBuf;

use thiserror::Error;

use crate::chart::spec::ChartKind;

// ---------------------------------------------------------------------------
// Dataset loading
// ---------------------------------------------------------------------------

/// Failure to turn a file on disk into a [`Dataset`](crate::data::model::Dataset).
///
/// Always fatal at startup: the dashboard has nothing to show without data.
#[derive(Debug, Error)]
pub enum DatasetLoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid Parquet in {path}: {source}")]
    Parquet {
        path: PathBuf,
        #[source]
        source: parquet::errors::ParquetError,
    },

    #[error("cannot decode Arrow data in {path}: {source}")]
    Arrow {
        path: PathBuf,
        #[source]
        source: arrow::error::ArrowError,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("malformed dataset {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },
}

// ---------------------------------------------------------------------------
// Chart construction
// ---------------------------------------------------------------------------

/// Caller-contract violations when building a chart specification.
///
/// The Render Host only offers valid columns, so these indicate a bug
/// rather than a user mistake.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("column '{column}' is not valid for a {kind}")]
    InvalidColumn { kind: ChartKind, column: String },

    #[error("a {kind} needs {expected} column(s), got {found}")]
    ColumnCount {
        kind: ChartKind,
        expected: usize,
        found: usize,
    },
}
