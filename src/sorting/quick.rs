//! Quick sort with Lomuto partitioning; the pivot is always the last element
//! of the range being partitioned.
//!
//! Pending sub-ranges live on an explicit stack with the right part pushed
//! first, so the left part is always partitioned next. Every swap made by a
//! partition, including the final pivot placement, is one event.

use std::ops::Range;

use super::event::ProgressEvent;
use super::tape::Tape;

/// Partition of `lo..hi` in progress. The pivot sits at `hi - 1`;
/// `lo..store` holds elements known to be smaller than it and `scan` is the
/// next element to examine.
#[derive(Debug, Clone, Copy)]
struct Partition {
    lo: usize,
    hi: usize,
    store: usize,
    scan: usize,
}

#[derive(Debug, Clone)]
pub struct QuickSteps {
    tape: Tape,
    pending: Vec<Range<usize>>,
    partition: Option<Partition>,
}

impl QuickSteps {
    pub(crate) fn new(tape: Tape, range: Range<usize>) -> Self {
        let mut pending = Vec::new();
        if range.len() >= 2 {
            pending.push(range);
        }
        Self {
            tape,
            pending,
            partition: None,
        }
    }

    pub fn values(&self) -> &[f64] {
        self.tape.values()
    }
}

impl Iterator for QuickSteps {
    type Item = ProgressEvent;

    fn next(&mut self) -> Option<ProgressEvent> {
        loop {
            if let Some(p) = &mut self.partition {
                let pivot = p.hi - 1;
                if p.scan < pivot {
                    let scan = p.scan;
                    p.scan += 1;
                    if self.tape.greater(pivot, scan) {
                        let store = p.store;
                        p.store += 1;
                        if store != scan {
                            return Some(self.tape.swap(store, scan));
                        }
                    }
                    continue;
                }

                let Partition { lo, hi, store, .. } = *p;
                self.partition = None;
                if hi - (store + 1) >= 2 {
                    self.pending.push(store + 1..hi);
                }
                if store - lo >= 2 {
                    self.pending.push(lo..store);
                }
                // A store slot equal to the pivot already partitions the range.
                if store != pivot && self.tape.greater(store, pivot) {
                    return Some(self.tape.swap(store, pivot));
                }
                continue;
            }

            let range = self.pending.pop()?;
            self.partition = Some(Partition {
                lo: range.start,
                hi: range.end,
                store: range.start,
                scan: range.start,
            });
        }
    }
}
