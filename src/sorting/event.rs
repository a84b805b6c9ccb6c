use serde::{Deserialize, Serialize};

/// One emitted step of a sorting run.
///
/// Every event carries a full snapshot of the array, so a client can render
/// it without having seen any earlier event. `focus` lists the positions the
/// operation moved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// 1-based position of this event in its sequence.
    pub step: u64,
    pub focus: Vec<usize>,
    pub values: Vec<f64>,
}

impl ProgressEvent {
    /// Replay a sequence and return the array state it leaves behind.
    ///
    /// With no events the array is unchanged, so `initial` is returned.
    pub fn replay<I>(initial: Vec<f64>, events: I) -> Vec<f64>
    where
        I: IntoIterator<Item = ProgressEvent>,
    {
        events
            .into_iter()
            .last()
            .map(|event| event.values)
            .unwrap_or(initial)
    }
}
