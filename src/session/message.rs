use serde::{Deserialize, Serialize};

use crate::sorting::ProgressEvent;

/// Inbound request: one per playback session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRequest {
    /// Algorithm selector, e.g. `"quicksort"`.
    pub algo: String,
    /// Dataset selector.
    pub file: String,
    /// Speed tier selector.
    pub speed: String,
}

/// Outbound message. Each one is self-contained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Step(ProgressEvent),
    Rejected { reason: String },
}
