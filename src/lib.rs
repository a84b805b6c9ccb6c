//! # sortstream: sorting algorithms as paced event streams
//!
//! `sortstream` serves step-by-step sorting visualizations over WebSocket.
//! A client sends one request naming an algorithm, a dataset of distances and
//! a speed tier; the server replies with one snapshot per step of the sort,
//! paced at the requested interval, until the array is sorted or the client
//! goes away.
//!
//! - **Step-emitting sorters**: bubble, insertion, selection, merge, quick,
//!   shell and heap sort, each a lazy [`Iterator`] of [`ProgressEvent`]s.
//! - **Playback sessions**: a cooperative send-then-sleep loop that stops at
//!   the first sign of a closed peer.
//! - **Datasets**: delimited files of coordinates turned into great-circle
//!   distances from a reference point.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sortstream::{ServerConfig, SortServer};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     SortServer::new(ServerConfig::default()).serve().await
//! }
//! ```
//!
//! Driving a sorter directly:
//!
//! ```rust
//! use sortstream::SortAlgorithm;
//!
//! let mut steps = SortAlgorithm::Quick.steps(vec![3.0, 1.0, 2.0]);
//! let events: Vec<_> = steps.by_ref().collect();
//! assert_eq!(events.last().unwrap().values, vec![1.0, 2.0, 3.0]);
//! assert_eq!(steps.values(), &[1.0, 2.0, 3.0]);
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod server;
pub mod session;
pub mod sorting;

pub use crate::config::{Catalog, ResolvedRequest, ServerConfig};
pub use crate::dataset::{CsvDatasetLoader, DatasetSource, InMemoryDatasets, ReferencePoint};
pub use crate::error::{ConfigError, DatasetError, SessionError, TransportError};
pub use crate::server::SortServer;
pub use crate::session::{
    ChannelTransport, PlaybackOutcome, PlaybackSession, ServerMessage, SessionHandler,
    SessionRequest, SessionState, Transport,
};
pub use crate::sorting::{ProgressEvent, SortAlgorithm, SortSteps};
