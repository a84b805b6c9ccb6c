//! Insertion sort: each element sinks left by adjacent swaps, one event per swap.

use std::ops::Range;

use super::event::ProgressEvent;
use super::tape::Tape;

#[derive(Debug, Clone)]
pub struct InsertionSteps {
    tape: Tape,
    lo: usize,
    end: usize,
    /// Index of the element currently being inserted.
    next: usize,
    /// Where that element sits right now.
    hole: usize,
}

impl InsertionSteps {
    pub(crate) fn new(tape: Tape, range: Range<usize>) -> Self {
        Self {
            tape,
            lo: range.start,
            end: range.end,
            next: range.start + 1,
            hole: range.start + 1,
        }
    }

    pub fn values(&self) -> &[f64] {
        self.tape.values()
    }
}

impl Iterator for InsertionSteps {
    type Item = ProgressEvent;

    fn next(&mut self) -> Option<ProgressEvent> {
        loop {
            if self.next >= self.end {
                return None;
            }
            if self.hole > self.lo && self.tape.greater(self.hole - 1, self.hole) {
                let hole = self.hole;
                self.hole -= 1;
                return Some(self.tape.swap(hole - 1, hole));
            }
            self.next += 1;
            self.hole = self.next;
        }
    }
}
