//! Outbound delivery errors.

use thiserror::Error;

/// Delivery failure reported by a [`Transport`](crate::session::Transport).
///
/// `Closed` is the expected end of a session when the peer goes away; every
/// other variant is a fault of the transport itself.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("Transport closed by peer")]
    Closed,
    #[error("Failed to encode message: {0}")]
    Encode(String),
    #[error("Transport I/O error: {0}")]
    Io(String),
}

impl TransportError {
    pub fn is_closed(&self) -> bool {
        matches!(self, TransportError::Closed)
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(value: serde_json::Error) -> Self {
        TransportError::Encode(value.to_string())
    }
}
