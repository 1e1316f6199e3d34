//! Error types for loading FAQ sources.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while materializing entries from a file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read the source file.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV record could not be decoded.
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// JSON document could not be decoded.
    #[error("failed to parse JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// File extension has no loader.
    #[error("unsupported FAQ format '{extension}' (expected .md, .csv or .json)")]
    UnsupportedFormat { extension: String },

    /// An entry without question text.
    #[error("entry {index} has an empty question")]
    EmptyQuestion { index: usize },
}

pub type Result<T> = std::result::Result<T, LoadError>;
