//! Paced delivery of one event sequence.

use std::time::Duration;

use super::message::ServerMessage;
use super::transport::Transport;
use crate::error::TransportError;
use crate::sorting::ProgressEvent;

/// How a playback run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// The sequence was exhausted.
    Completed { delivered: u64 },
    /// The peer went away; no further event was pulled.
    Aborted { delivered: u64 },
    /// The transport failed for a reason other than closure.
    Failed {
        delivered: u64,
        error: TransportError,
    },
}

impl PlaybackOutcome {
    pub fn delivered(&self) -> u64 {
        match self {
            PlaybackOutcome::Completed { delivered }
            | PlaybackOutcome::Aborted { delivered }
            | PlaybackOutcome::Failed { delivered, .. } => *delivered,
        }
    }
}

/// Forwards events to a transport one at a time, sleeping `delay` after each
/// successful send.
///
/// The sleep is a tokio timer, so other connections keep running while this
/// one waits.
#[derive(Debug, Clone, Copy)]
pub struct PlaybackSession {
    delay: Duration,
}

impl PlaybackSession {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub async fn run<I, T>(&self, events: I, transport: &mut T) -> PlaybackOutcome
    where
        I: IntoIterator<Item = ProgressEvent>,
        T: Transport + ?Sized,
    {
        let mut events = events.into_iter();
        let mut delivered = 0u64;

        loop {
            // Check before pulling so a closed peer never costs another step.
            if transport.is_closed() {
                tracing::debug!(delivered, "peer closed before next step");
                return PlaybackOutcome::Aborted { delivered };
            }
            let Some(event) = events.next() else {
                return PlaybackOutcome::Completed { delivered };
            };

            match transport.send(&ServerMessage::Step(event)).await {
                Ok(()) => delivered += 1,
                Err(TransportError::Closed) => {
                    tracing::debug!(delivered, "peer closed, stopping playback");
                    return PlaybackOutcome::Aborted { delivered };
                }
                Err(error) => {
                    tracing::warn!(delivered, error = %error, "transport failed, stopping playback");
                    return PlaybackOutcome::Failed { delivered, error };
                }
            }

            if self.delay.is_zero() {
                continue;
            }
            let pause = tokio::time::sleep(self.delay);
            match transport.close_signal() {
                Some(closed) => tokio::select! {
                    _ = pause => {}
                    _ = closed.cancelled() => {
                        tracing::debug!(delivered, "peer closed during pacing");
                        return PlaybackOutcome::Aborted { delivered };
                    }
                },
                None => pause.await,
            }
        }
    }
}
