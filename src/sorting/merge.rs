//! Top-down merge sort flattened onto an explicit frame stack.
//!
//! Frames are popped depth-first, left half before right half, and a range is
//! merged only after both halves are sorted. The merge is in place: when the
//! head of the right run is smaller than the head of the left run it is
//! rotated into position, which keeps every snapshot a permutation of the
//! input and keeps the sort stable. Each rotation is one event.

use std::ops::Range;

use super::event::ProgressEvent;
use super::tape::Tape;

#[derive(Debug, Clone, Copy)]
enum Frame {
    Sort { lo: usize, hi: usize },
    Merge { lo: usize, mid: usize, hi: usize },
}

/// Merge in progress: `left` is the head of the left run, `mid` the head of
/// the right run, `hi` the exclusive end.
#[derive(Debug, Clone, Copy)]
struct Merging {
    left: usize,
    mid: usize,
    hi: usize,
}

#[derive(Debug, Clone)]
pub struct MergeSteps {
    tape: Tape,
    frames: Vec<Frame>,
    merging: Option<Merging>,
}

impl MergeSteps {
    pub(crate) fn new(tape: Tape, range: Range<usize>) -> Self {
        let mut frames = Vec::new();
        if range.len() >= 2 {
            frames.push(Frame::Sort {
                lo: range.start,
                hi: range.end,
            });
        }
        Self {
            tape,
            frames,
            merging: None,
        }
    }

    pub fn values(&self) -> &[f64] {
        self.tape.values()
    }
}

impl Iterator for MergeSteps {
    type Item = ProgressEvent;

    fn next(&mut self) -> Option<ProgressEvent> {
        loop {
            if let Some(m) = &mut self.merging {
                if m.left >= m.mid || m.mid >= m.hi {
                    self.merging = None;
                    continue;
                }
                if self.tape.greater(m.left, m.mid) {
                    let (to, from) = (m.left, m.mid);
                    m.left += 1;
                    m.mid += 1;
                    return Some(self.tape.rotate(to, from));
                }
                m.left += 1;
                continue;
            }

            match self.frames.pop()? {
                Frame::Sort { lo, hi } => {
                    if hi - lo < 2 {
                        continue;
                    }
                    let mid = lo + (hi - lo) / 2;
                    self.frames.push(Frame::Merge { lo, mid, hi });
                    self.frames.push(Frame::Sort { lo: mid, hi });
                    self.frames.push(Frame::Sort { lo, hi: mid });
                }
                Frame::Merge { lo, mid, hi } => {
                    self.merging = Some(Merging { left: lo, mid, hi });
                }
            }
        }
    }
}
