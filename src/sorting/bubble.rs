//! Bubble sort: one event per adjacent swap.

use std::ops::Range;

use super::event::ProgressEvent;
use super::tape::Tape;

#[derive(Debug, Clone)]
pub struct BubbleSteps {
    tape: Tape,
    lo: usize,
    /// Exclusive end of the unsorted prefix; shrinks by one per pass.
    end: usize,
    cursor: usize,
    swapped: bool,
}

impl BubbleSteps {
    pub(crate) fn new(tape: Tape, range: Range<usize>) -> Self {
        Self {
            tape,
            lo: range.start,
            end: range.end,
            cursor: range.start,
            swapped: false,
        }
    }

    pub fn values(&self) -> &[f64] {
        self.tape.values()
    }
}

impl Iterator for BubbleSteps {
    type Item = ProgressEvent;

    fn next(&mut self) -> Option<ProgressEvent> {
        loop {
            if self.end <= self.lo + 1 {
                return None;
            }
            if self.cursor + 1 >= self.end {
                if !self.swapped {
                    // A clean pass means the rest is already in order.
                    self.end = self.lo;
                    return None;
                }
                self.end -= 1;
                self.cursor = self.lo;
                self.swapped = false;
                continue;
            }

            let j = self.cursor;
            self.cursor += 1;
            if self.tape.greater(j, j + 1) {
                self.swapped = true;
                return Some(self.tape.swap(j, j + 1));
            }
        }
    }
}
