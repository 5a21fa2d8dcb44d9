//! Instrumented sorting algorithms that record every comparison and swap as a
//! [`Frame`] so a visualiser can replay the run one step at a time.

use std::{fmt, ops::RangeInclusive, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{DemoError, Result};

/// Algorithms selectable from the visualiser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortAlgorithm {
    BubbleSort,
    /// Lomuto partition quick sort. Intermediate frames never mark indices as
    /// sorted, and the swap that moves the pivot into place is applied
    /// without emitting a frame.
    QuickSort,
    /// Offered by the demo UI but recorded with the bubble sort recorder.
    MergeSort,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 3] = [Self::BubbleSort, Self::QuickSort, Self::MergeSort];

    /// Short selector name used on the command line and in configuration.
    pub fn name(self) -> &'static str {
        match self {
            Self::BubbleSort => "bubble",
            Self::QuickSort => "quick",
            Self::MergeSort => "merge",
        }
    }

    /// Complexity figures as advertised next to the demo.
    pub fn complexity(self) -> Complexity {
        match self {
            Self::BubbleSort => Complexity {
                best: "O(n)",
                average: "O(n²)",
                worst: "O(n²)",
                space: "O(1)",
            },
            Self::QuickSort => Complexity {
                best: "O(n log n)",
                average: "O(n log n)",
                worst: "O(n²)",
                space: "O(log n)",
            },
            Self::MergeSort => Complexity {
                best: "O(n log n)",
                average: "O(n log n)",
                worst: "O(n log n)",
                space: "O(n)",
            },
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortAlgorithm {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bubble" | "bubble_sort" | "bubblesort" => Ok(Self::BubbleSort),
            "quick" | "quick_sort" | "quicksort" => Ok(Self::QuickSort),
            "merge" | "merge_sort" | "mergesort" => Ok(Self::MergeSort),
            other => Err(DemoError::invalid(format!(
                "unknown sort algorithm `{other}`"
            ))),
        }
    }
}

/// Big-O labels for an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Complexity {
    pub best: &'static str,
    pub average: &'static str,
    pub worst: &'static str,
    pub space: &'static str,
}

/// How a single bar should be highlighted in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarState {
    Unsorted,
    Comparing,
    Swapping,
    Sorted,
}

/// Immutable snapshot of the working array at one step of a recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub array: Vec<i64>,
    pub comparing: Vec<usize>,
    pub swapping: Vec<usize>,
    pub sorted: Vec<usize>,
}

impl Frame {
    /// Classifies a bar. A sorted index wins over a highlighted one, and a
    /// comparison wins over a swap.
    pub fn bar_state(&self, index: usize) -> BarState {
        if self.sorted.contains(&index) {
            BarState::Sorted
        } else if self.comparing.contains(&index) {
            BarState::Comparing
        } else if self.swapping.contains(&index) {
            BarState::Swapping
        } else {
            BarState::Unsorted
        }
    }

    /// Bar states for every index of the frame, in order.
    pub fn bar_states(&self) -> Vec<BarState> {
        (0..self.array.len()).map(|i| self.bar_state(i)).collect()
    }
}

/// Ordered list of frames produced by a single [`record`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recording {
    algorithm: SortAlgorithm,
    frames: Vec<Frame>,
}

impl Recording {
    pub fn algorithm(&self) -> SortAlgorithm {
        self.algorithm
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// The closing frame. Every recording has at least one.
    pub fn last(&self) -> &Frame {
        // `record` always pushes the closing frame.
        &self.frames[self.frames.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

impl<'a> IntoIterator for &'a Recording {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

/// Sorts a copy of `array` with the selected algorithm and returns every
/// intermediate frame, ending with a frame in which all indices are sorted.
pub fn record(array: &[i64], algorithm: SortAlgorithm) -> Recording {
    let mut recorder = StepRecorder::new(array);

    match algorithm {
        SortAlgorithm::BubbleSort | SortAlgorithm::MergeSort => recorder.bubble_sort(),
        SortAlgorithm::QuickSort => recorder.quick_sort(),
    }

    let frames = recorder.finish();
    tracing::debug!(
        %algorithm,
        elements = array.len(),
        frames = frames.len(),
        "recorded sort"
    );

    Recording { algorithm, frames }
}

/// Produces `len` values drawn uniformly from `range`.
pub fn random_array(rng: &mut fastrand::Rng, len: usize, range: RangeInclusive<i64>) -> Vec<i64> {
    (0..len).map(|_| rng.i64(range.clone())).collect()
}

struct StepRecorder {
    working: Vec<i64>,
    frames: Vec<Frame>,
}

impl StepRecorder {
    fn new(array: &[i64]) -> Self {
        Self {
            working: array.to_vec(),
            frames: Vec::new(),
        }
    }

    fn push(&mut self, comparing: Vec<usize>, swapping: Vec<usize>, sorted: Vec<usize>) {
        self.frames.push(Frame {
            array: self.working.clone(),
            comparing,
            swapping,
            sorted,
        });
    }

    fn bubble_sort(&mut self) {
        let n = self.working.len();
        for i in 0..n.saturating_sub(1) {
            // Positions fixed by earlier passes, highest first.
            let settled: Vec<usize> = (0..i).map(|k| n - 1 - k).collect();
            for j in 0..n - 1 - i {
                self.push(vec![j, j + 1], Vec::new(), settled.clone());

                if self.working[j] > self.working[j + 1] {
                    self.working.swap(j, j + 1);
                    self.push(Vec::new(), vec![j, j + 1], settled.clone());
                }
            }
        }
    }

    fn quick_sort(&mut self) {
        if self.working.len() > 1 {
            self.quick_sort_range(0, self.working.len() - 1);
        }
    }

    fn quick_sort_range(&mut self, low: usize, high: usize) {
        if low >= high {
            return;
        }

        let pivot_index = self.partition(low, high);
        if pivot_index > low {
            self.quick_sort_range(low, pivot_index - 1);
        }
        self.quick_sort_range(pivot_index + 1, high);
    }

    fn partition(&mut self, low: usize, high: usize) -> usize {
        let pivot = self.working[high];
        let mut store = low;

        for j in low..high {
            self.push(vec![j, high], Vec::new(), Vec::new());

            if self.working[j] < pivot {
                self.working.swap(store, j);
                self.push(Vec::new(), vec![store, j], Vec::new());
                store += 1;
            }
        }

        // No frame for the pivot placement.
        self.working.swap(store, high);
        store
    }

    fn finish(mut self) -> Vec<Frame> {
        let all = (0..self.working.len()).collect();
        self.push(Vec::new(), Vec::new(), all);
        self.frames
    }
}
