use std::cmp::Ordering;

use super::event::ProgressEvent;

/// Working array shared by every sorter.
///
/// All mutations go through [`swap`](Self::swap) or [`rotate`](Self::rotate),
/// which both keep the array a permutation of the input and return the
/// snapshot event for the move.
#[derive(Debug, Clone)]
pub(crate) struct Tape {
    values: Vec<f64>,
    step: u64,
}

impl Tape {
    pub(crate) fn new(values: Vec<f64>) -> Self {
        Self { values, step: 0 }
    }

    pub(crate) fn values(&self) -> &[f64] {
        &self.values
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    /// `values[a] > values[b]` under the IEEE total order.
    pub(crate) fn greater(&self, a: usize, b: usize) -> bool {
        self.values[a].total_cmp(&self.values[b]) == Ordering::Greater
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) -> ProgressEvent {
        self.values.swap(a, b);
        self.emit(vec![a, b])
    }

    /// Move the element at `from` down to `to`, shifting `to..from` right by one.
    pub(crate) fn rotate(&mut self, to: usize, from: usize) -> ProgressEvent {
        debug_assert!(to <= from);
        self.values[to..=from].rotate_right(1);
        self.emit(vec![to, from])
    }

    fn emit(&mut self, focus: Vec<usize>) -> ProgressEvent {
        self.step += 1;
        ProgressEvent {
            step: self.step,
            focus,
            values: self.values.clone(),
        }
    }
}
