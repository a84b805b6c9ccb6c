//! Request-level rejection reasons.

use super::DatasetError;
use thiserror::Error;

/// Reasons a request never reaches the streaming phase.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),
    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),
    #[error("Unknown speed: {0}")]
    UnknownSpeed(String),
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),
}

impl From<serde_json::Error> for SessionError {
    fn from(value: serde_json::Error) -> Self {
        SessionError::InvalidRequest(value.to_string())
    }
}
