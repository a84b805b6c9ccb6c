//! Error types for the streaming server.
//!
//! - [`SessionError`] : A request was rejected before streaming began.
//! - [`DatasetError`] : A dataset could not be resolved into distances.
//! - [`TransportError`] : A message could not be delivered to the peer.
//! - [`ConfigError`] : Startup configuration could not be loaded.

pub mod config_error;
pub mod dataset_error;
pub mod session_error;
pub mod transport_error;

pub use config_error::ConfigError;
pub use dataset_error::DatasetError;
pub use session_error::SessionError;
pub use transport_error::TransportError;

/// Convenience alias for session-level results.
pub type SessionResult<T> = Result<T, SessionError>;
/// Convenience alias for dataset resolution results.
pub type DatasetResult<T> = Result<T, DatasetError>;
