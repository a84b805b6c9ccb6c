//! Playback sessions: one paced stream of sorting steps per request.
//!
//! - [`SessionHandler`] : resolves a raw request and drives its session.
//! - [`PlaybackSession`] : the paced send loop.
//! - [`Transport`] : the outbound seam; [`ChannelTransport`] is the in-process
//!   implementation, the WebSocket one lives in [`crate::server`].

mod handler;
mod message;
mod playback;
mod state;
mod transport;

pub use handler::SessionHandler;
pub use message::{ServerMessage, SessionRequest};
pub use playback::{PlaybackOutcome, PlaybackSession};
pub use state::SessionState;
pub use transport::{ChannelTransport, Transport};
