//! Shell sort with the halving gap sequence `n/2, n/4, ..., 1`.
//!
//! Each gapped swap is one event. The final gap of 1 is a plain insertion
//! pass, which is what guarantees a sorted result.

use std::ops::Range;

use super::event::ProgressEvent;
use super::tape::Tape;

#[derive(Debug, Clone)]
pub struct ShellSteps {
    tape: Tape,
    lo: usize,
    end: usize,
    gap: usize,
    next: usize,
    hole: usize,
}

impl ShellSteps {
    pub(crate) fn new(tape: Tape, range: Range<usize>) -> Self {
        let gap = range.len() / 2;
        Self {
            tape,
            lo: range.start,
            end: range.end,
            gap,
            next: range.start + gap,
            hole: range.start + gap,
        }
    }

    pub fn values(&self) -> &[f64] {
        self.tape.values()
    }
}

impl Iterator for ShellSteps {
    type Item = ProgressEvent;

    fn next(&mut self) -> Option<ProgressEvent> {
        loop {
            if self.gap == 0 {
                return None;
            }
            if self.next >= self.end {
                self.gap /= 2;
                self.next = self.lo + self.gap;
                self.hole = self.next;
                continue;
            }

            let gap = self.gap;
            if self.hole >= self.lo + gap && self.tape.greater(self.hole - gap, self.hole) {
                let hole = self.hole;
                self.hole -= gap;
                return Some(self.tape.swap(hole - gap, hole));
            }
            self.next += 1;
            self.hole = self.next;
        }
    }
}
