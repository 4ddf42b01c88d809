// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Every failure here is a startup-time configuration problem:
// nothing is retried and nothing is partially recovered.
// Each variant names the path, column or row that failed so
// the message alone is enough to fix the input.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrepError {
    /// A file could not be opened or read
    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required column is missing from the header row
    #[error("'{}' is missing required column '{column}'", .path.display())]
    Schema { path: PathBuf, column: String },

    /// The pretrained vector file does not exist
    #[error("pretrained vectors not found at '{}'", .path.display())]
    ResourceNotFound { path: PathBuf },

    /// A training label could not be parsed as a number
    #[error("row {row}: score '{value}' is not a number")]
    InvalidLabel { row: usize, value: String },

    /// The pretrained vector file is malformed
    #[error("'{}' line {line}: {reason}", .path.display())]
    InvalidVectors {
        path:   PathBuf,
        line:   usize,
        reason: String,
    },

    /// The CSV reader rejected a record
    #[error("malformed CSV in '{}': {source}", .path.display())]
    Csv {
        path:   PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The vector cache could not be encoded or decoded
    #[error("vector cache '{}': {source}", .path.display())]
    Cache {
        path:   PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl PrepError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
