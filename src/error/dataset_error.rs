//! Dataset resolution errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning a dataset id into a list of distances.
///
/// Individual malformed rows are never an error; they are skipped by the loader.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Missing column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: String },
    #[error("Malformed CSV in {path}: {message}")]
    Csv { path: PathBuf, message: String },
}
