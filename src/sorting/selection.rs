//! Selection sort: one event per minimum swapped into place.

use std::ops::Range;

use super::event::ProgressEvent;
use super::tape::Tape;

#[derive(Debug, Clone)]
pub struct SelectionSteps {
    tape: Tape,
    next: usize,
    end: usize,
}

impl SelectionSteps {
    pub(crate) fn new(tape: Tape, range: Range<usize>) -> Self {
        Self {
            tape,
            next: range.start,
            end: range.end,
        }
    }

    pub fn values(&self) -> &[f64] {
        self.tape.values()
    }
}

impl Iterator for SelectionSteps {
    type Item = ProgressEvent;

    fn next(&mut self) -> Option<ProgressEvent> {
        while self.next + 1 < self.end {
            let slot = self.next;
            self.next += 1;

            let mut min = slot;
            for k in slot + 1..self.end {
                if self.tape.greater(min, k) {
                    min = k;
                }
            }
            if min != slot {
                return Some(self.tape.swap(slot, min));
            }
        }
        None
    }
}
