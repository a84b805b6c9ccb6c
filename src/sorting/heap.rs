//! Heap sort over a max-heap laid out in the range.
//!
//! Phase one heapifies bottom-up, phase two repeatedly swaps the root with
//! the last unsorted slot and sifts the new root down. Every sift-down swap
//! and every extraction swap is one event.

use std::ops::Range;

use super::event::ProgressEvent;
use super::tape::Tape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Roots `0..remaining` still need sifting, highest first.
    Heapify { remaining: usize },
    /// Heap occupies `0..end`.
    Extract { end: usize },
    Done,
}

/// Sift-down in progress: `node` is being pushed down within `0..end`.
#[derive(Debug, Clone, Copy)]
struct Sift {
    node: usize,
    end: usize,
}

#[derive(Debug, Clone)]
pub struct HeapSteps {
    tape: Tape,
    lo: usize,
    len: usize,
    phase: Phase,
    sift: Option<Sift>,
}

impl HeapSteps {
    pub(crate) fn new(tape: Tape, range: Range<usize>) -> Self {
        let len = range.len();
        Self {
            tape,
            lo: range.start,
            len,
            phase: Phase::Heapify { remaining: len / 2 },
            sift: None,
        }
    }

    pub fn values(&self) -> &[f64] {
        self.tape.values()
    }

    /// Advance the current sift by one level. Returns the swap event, or
    /// `None` once the node has settled.
    fn sift_step(&mut self, sift: Sift) -> Option<ProgressEvent> {
        let lo = self.lo;
        let left = 2 * sift.node + 1;
        if left >= sift.end {
            return None;
        }
        let mut largest = sift.node;
        if self.tape.greater(lo + left, lo + largest) {
            largest = left;
        }
        let right = left + 1;
        if right < sift.end && self.tape.greater(lo + right, lo + largest) {
            largest = right;
        }
        if largest == sift.node {
            return None;
        }
        self.sift = Some(Sift {
            node: largest,
            end: sift.end,
        });
        Some(self.tape.swap(lo + sift.node, lo + largest))
    }
}

impl Iterator for HeapSteps {
    type Item = ProgressEvent;

    fn next(&mut self) -> Option<ProgressEvent> {
        loop {
            if let Some(sift) = self.sift.take() {
                if let Some(event) = self.sift_step(sift) {
                    return Some(event);
                }
                continue;
            }

            match self.phase {
                Phase::Heapify { remaining: 0 } => {
                    self.phase = Phase::Extract { end: self.len };
                }
                Phase::Heapify { remaining } => {
                    let root = remaining - 1;
                    self.phase = Phase::Heapify { remaining: root };
                    self.sift = Some(Sift {
                        node: root,
                        end: self.len,
                    });
                }
                Phase::Extract { end } if end <= 1 => {
                    self.phase = Phase::Done;
                }
                Phase::Extract { end } => {
                    let last = end - 1;
                    self.phase = Phase::Extract { end: last };
                    self.sift = Some(Sift { node: 0, end: last });
                    // Equal to the root means the slot already holds a maximum.
                    if self.tape.greater(self.lo, self.lo + last) {
                        return Some(self.tape.swap(self.lo, self.lo + last));
                    }
                }
                Phase::Done => return None,
            }
        }
    }
}
