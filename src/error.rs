//! Error types for the table library.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a style option into a concrete value
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StyleError {
    #[error("unknown color name: {0}")]
    UnknownColor(String),

    #[error("invalid color value: {0}")]
    InvalidColor(String),

    #[error("{option} must be {expected}, got {value}")]
    InvalidMetric {
        option: &'static str,
        expected: &'static str,
        value: i64,
    },
}

/// Table construction and sort failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TableError {
    #[error("cannot build a table from an empty dataset")]
    EmptyDataset,

    #[error("{widths} field widths given for {fields} fields")]
    WidthCountMismatch { fields: usize, widths: usize },

    #[error("field width for {field} must be positive, got {width}")]
    InvalidWidth { field: String, width: i32 },

    #[error("record {index} does not have the same fields as the first record")]
    NonUniformRecord { index: usize },

    #[error("{rows} rows of {field_height}px with {row_width}px columns do not fit in a table image")]
    TooLarge {
        rows: usize,
        row_width: i64,
        field_height: i32,
    },

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("style error: {0}")]
    Style(#[from] StyleError),
}

/// Dataset loading failures
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("expected a JSON object of objects at the top level")]
    UnexpectedShape,

    #[error("entry {key} is missing field {field}")]
    MissingField { key: String, field: String },

    #[error("entry {key}: cannot read {field} as {cast}")]
    BadCast {
        key: String,
        field: String,
        cast: &'static str,
    },

    #[error("unsupported value in entry {key}, field {field}")]
    UnsupportedValue { key: String, field: String },

    #[error("unknown data file type: {0}")]
    UnknownFormat(PathBuf),

    #[error("dataset has no records")]
    Empty,
}

/// Configuration file failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Font loading failures
#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read fonts from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse font {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("no fonts found in {0}")]
    NoFonts(PathBuf),
}

/// Failure to assemble a table from its configuration
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("table {name}: {source}")]
    Dataset {
        name: String,
        #[source]
        source: DatasetError,
    },

    #[error("table {name}: {source}")]
    Table {
        name: String,
        #[source]
        source: TableError,
    },

    #[error("no table could be built")]
    NoTables,
}
