//! Session lifecycle.

use super::playback::PlaybackOutcome;
use crate::sorting::SortAlgorithm;

/// Lifecycle of one request:
/// `Idle -> Resolving -> Streaming -> {Completed | Aborted | Failed}`, or
/// `Resolving -> Rejected` when the request cannot be served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Resolving,
    Streaming {
        algorithm: SortAlgorithm,
        dataset: String,
        len: usize,
    },
    Completed {
        delivered: u64,
    },
    Aborted {
        delivered: u64,
    },
    Failed {
        delivered: u64,
        error: String,
    },
    Rejected {
        reason: String,
    },
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionState::Completed { .. }
                | SessionState::Aborted { .. }
                | SessionState::Failed { .. }
                | SessionState::Rejected { .. }
        )
    }

    /// Whether the connection can serve another request after this state.
    pub fn connection_usable(&self) -> bool {
        !matches!(
            self,
            SessionState::Aborted { .. } | SessionState::Failed { .. }
        )
    }

    fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Resolving => "resolving",
            SessionState::Streaming { .. } => "streaming",
            SessionState::Completed { .. } => "completed",
            SessionState::Aborted { .. } => "aborted",
            SessionState::Failed { .. } => "failed",
            SessionState::Rejected { .. } => "rejected",
        }
    }
}

impl From<PlaybackOutcome> for SessionState {
    fn from(outcome: PlaybackOutcome) -> Self {
        match outcome {
            PlaybackOutcome::Completed { delivered } => SessionState::Completed { delivered },
            PlaybackOutcome::Aborted { delivered } => SessionState::Aborted { delivered },
            PlaybackOutcome::Failed { delivered, error } => SessionState::Failed {
                delivered,
                error: error.to_string(),
            },
        }
    }
}

/// One request's state machine, numbered within its connection.
#[derive(Debug)]
pub(crate) struct Session {
    seq: u64,
    state: SessionState,
}

impl Session {
    pub(crate) fn new(seq: u64) -> Self {
        Self {
            seq,
            state: SessionState::Idle,
        }
    }

    pub(crate) fn enter(&mut self, next: SessionState) {
        debug_assert!(!self.state.is_terminal(), "session already finished");
        tracing::debug!(
            session = self.seq,
            from = self.state.name(),
            to = next.name(),
            "session transition"
        );
        self.state = next;
    }

    pub(crate) fn finish(mut self, last: SessionState) -> SessionState {
        self.enter(last);
        self.state
    }
}
