//! Step-emitting sorters.
//!
//! Each algorithm is an explicit state machine implementing [`Iterator`]:
//! every call to `next` performs the work up to the next array mutation and
//! returns a [`ProgressEvent`] snapshot of the array after it. Nothing is
//! accumulated, so a consumer can stop pulling at any point and the sort
//! simply never finishes.
//!
//! | Algorithm | One event per |
//! |-----------|---------------|
//! | bubble | adjacent swap |
//! | insertion | adjacent swap while sinking an element |
//! | selection | minimum swapped into place |
//! | shell | gapped swap (`n/2, n/4, ..., 1`) |
//! | heap | sift-down swap and root extraction |
//! | merge | element rotated from the right run into the left run |
//! | quick | Lomuto partition swap (pivot = last element) |
//!
//! Empty and single-element ranges produce no events.

mod bubble;
mod event;
mod heap;
mod insertion;
mod merge;
mod quick;
mod selection;
mod shell;
mod tape;

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

pub use bubble::BubbleSteps;
pub use event::ProgressEvent;
pub use heap::HeapSteps;
pub use insertion::InsertionSteps;
pub use merge::MergeSteps;
pub use quick::QuickSteps;
pub use selection::SelectionSteps;
pub use shell::ShellSteps;

use tape::Tape;

/// The fixed catalog of sorting algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortAlgorithm {
    #[serde(rename = "bubblesort")]
    Bubble,
    #[serde(rename = "insertionsort")]
    Insertion,
    #[serde(rename = "selectionsort")]
    Selection,
    #[serde(rename = "mergesort")]
    Merge,
    #[serde(rename = "quicksort")]
    Quick,
    #[serde(rename = "shellsort")]
    Shell,
    #[serde(rename = "heapsort")]
    Heap,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 7] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Insertion,
        SortAlgorithm::Selection,
        SortAlgorithm::Merge,
        SortAlgorithm::Quick,
        SortAlgorithm::Shell,
        SortAlgorithm::Heap,
    ];

    /// Wire identifier, as sent by clients in the `algo` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "bubblesort",
            SortAlgorithm::Insertion => "insertionsort",
            SortAlgorithm::Selection => "selectionsort",
            SortAlgorithm::Merge => "mergesort",
            SortAlgorithm::Quick => "quicksort",
            SortAlgorithm::Shell => "shellsort",
            SortAlgorithm::Heap => "heapsort",
        }
    }

    /// Steps that sort the whole array.
    pub fn steps(self, values: Vec<f64>) -> SortSteps {
        let len = values.len();
        self.steps_in(values, 0..len)
    }

    /// Steps that sort only `range`; the rest of the array is left untouched
    /// but still appears in every snapshot.
    ///
    /// The range is clamped to the array, and an inverted range sorts nothing.
    pub fn steps_in(self, values: Vec<f64>, range: Range<usize>) -> SortSteps {
        let end = range.end.min(values.len());
        let start = range.start.min(end);
        let range = start..end;
        let tape = Tape::new(values);
        debug_assert!(range.end <= tape.len());

        match self {
            SortAlgorithm::Bubble => SortSteps::Bubble(BubbleSteps::new(tape, range)),
            SortAlgorithm::Insertion => SortSteps::Insertion(InsertionSteps::new(tape, range)),
            SortAlgorithm::Selection => SortSteps::Selection(SelectionSteps::new(tape, range)),
            SortAlgorithm::Merge => SortSteps::Merge(MergeSteps::new(tape, range)),
            SortAlgorithm::Quick => SortSteps::Quick(QuickSteps::new(tape, range)),
            SortAlgorithm::Shell => SortSteps::Shell(ShellSteps::new(tape, range)),
            SortAlgorithm::Heap => SortSteps::Heap(HeapSteps::new(tape, range)),
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortAlgorithm {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortAlgorithm::ALL
            .into_iter()
            .find(|algo| algo.as_str() == s)
            .ok_or_else(|| SessionError::UnknownAlgorithm(s.to_string()))
    }
}

/// Lazy event sequence for one sorting run.
#[derive(Debug, Clone)]
pub enum SortSteps {
    Bubble(BubbleSteps),
    Insertion(InsertionSteps),
    Selection(SelectionSteps),
    Merge(MergeSteps),
    Quick(QuickSteps),
    Shell(ShellSteps),
    Heap(HeapSteps),
}

impl SortSteps {
    /// Current array state: the input before the first pull, the sorted
    /// array once the sequence is exhausted.
    pub fn values(&self) -> &[f64] {
        match self {
            SortSteps::Bubble(s) => s.values(),
            SortSteps::Insertion(s) => s.values(),
            SortSteps::Selection(s) => s.values(),
            SortSteps::Merge(s) => s.values(),
            SortSteps::Quick(s) => s.values(),
            SortSteps::Shell(s) => s.values(),
            SortSteps::Heap(s) => s.values(),
        }
    }
}

impl Iterator for SortSteps {
    type Item = ProgressEvent;

    fn next(&mut self) -> Option<ProgressEvent> {
        match self {
            SortSteps::Bubble(s) => s.next(),
            SortSteps::Insertion(s) => s.next(),
            SortSteps::Selection(s) => s.next(),
            SortSteps::Merge(s) => s.next(),
            SortSteps::Quick(s) => s.next(),
            SortSteps::Shell(s) => s.next(),
            SortSteps::Heap(s) => s.next(),
        }
    }
}

#[cfg(test)]
#[path = "sorting_tests.rs"]
mod tests;
