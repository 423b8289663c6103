//! Algorithm engine.
//!
//! Every algorithm is a pure function over a [`Tracer`]: it reads and mutates
//! the tracer's working copy of the values and, as a side effect, records the
//! [`StepEvent`]s a renderer needs to replay the run. Nothing here touches the
//! screen or sleeps, so correctness tests run at full speed.
//!
//! # Example
//!
//! ```rust
//! use sortviz::algorithms::{Algorithm, Outcome, SearchTarget};
//! use sortviz::engine::VizRng;
//!
//! let mut rng = VizRng::new(42);
//! let trace = Algorithm::Bubble.trace(&[5, 3, 4, 1, 2], SearchTarget::Random, &mut rng);
//! assert_eq!(trace.final_values, vec![1, 2, 3, 4, 5]);
//! assert_eq!(trace.outcome, Outcome::Sorted);
//! ```

mod searching;
mod sorting;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::{Pause, VizRng};
use crate::error::VizError;
use crate::model::{BarColor, Opacity};

/// Whether an algorithm rearranges or searches the array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmKind {
    /// Rearranges the values into non-decreasing order.
    Sort,
    /// Locates a target value.
    Search,
}

/// The algorithms that can be triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Bubble sort.
    Bubble,
    /// Selection sort.
    Selection,
    /// Insertion sort.
    Insertion,
    /// Quick sort, first element as pivot.
    Quick,
    /// Top-down merge sort.
    Merge,
    /// Left-to-right linear search.
    Linear,
    /// Binary search after a visualized quick sort.
    Binary,
}

impl Algorithm {
    /// Every algorithm in trigger order.
    pub const ALL: [Self; 7] = [
        Self::Bubble,
        Self::Selection,
        Self::Insertion,
        Self::Quick,
        Self::Merge,
        Self::Linear,
        Self::Binary,
    ];

    /// Trigger name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bubble => "Bubble",
            Self::Selection => "Selection",
            Self::Insertion => "Insertion",
            Self::Quick => "Quick",
            Self::Merge => "Merge",
            Self::Linear => "Linear",
            Self::Binary => "Binary",
        }
    }

    /// Human-readable title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Bubble => "Bubble Sort",
            Self::Selection => "Selection Sort",
            Self::Insertion => "Insertion Sort",
            Self::Quick => "Quick Sort",
            Self::Merge => "Merge Sort",
            Self::Linear => "Linear Search",
            Self::Binary => "Binary Search",
        }
    }

    /// Sort or search.
    #[must_use]
    pub const fn kind(self) -> AlgorithmKind {
        match self {
            Self::Linear | Self::Binary => AlgorithmKind::Search,
            _ => AlgorithmKind::Sort,
        }
    }

    /// Textbook time complexity (average case).
    #[must_use]
    pub const fn complexity(self) -> &'static str {
        match self {
            Self::Bubble | Self::Selection | Self::Insertion => "O(n^2)",
            Self::Quick | Self::Merge => "O(n log n)",
            Self::Linear => "O(n)",
            Self::Binary => "O(log n)",
        }
    }

    /// Run the algorithm over a copy of `values` and record its trace.
    #[must_use]
    pub fn trace(self, values: &[u32], target: SearchTarget, rng: &mut VizRng) -> Trace {
        let mut t = Tracer::new(values);
        let outcome = match self {
            Self::Bubble => sorting::bubble_sort(&mut t),
            Self::Selection => sorting::selection_sort(&mut t),
            Self::Insertion => sorting::insertion_sort(&mut t),
            Self::Quick => sorting::quick_sort(&mut t),
            Self::Merge => sorting::merge_sort(&mut t),
            Self::Linear => searching::linear_search(&mut t, target, rng),
            Self::Binary => searching::binary_search(&mut t, target, rng),
        };
        t.finish(self, outcome)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| VizError::unknown_algorithm(wanted))
    }
}

/// How a search chooses what to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchTarget {
    /// Sample one of the existing values uniformly; the search always hits.
    #[default]
    Random,
    /// Search for this value; it may be absent.
    Value(u32),
}

/// Blocking user-facing messages emitted around searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Announcement {
    /// Binary search is about to sort the array first.
    SortingFirst,
    /// The search target has been chosen.
    SearchTarget {
        /// Value being searched for.
        target: u32,
    },
    /// The target was located.
    Found {
        /// Value searched for.
        target: u32,
        /// Index where it was found.
        index: usize,
    },
    /// The target does not occur in the array.
    NotFound {
        /// Value searched for.
        target: u32,
    },
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SortingFirst => {
                f.write_str("Binary Search requires a sorted array. Sorting first...")
            }
            Self::SearchTarget { target } => write!(f, "Searching for target: {target}"),
            Self::Found { target, index } => write!(f, "Found {target} at index {index}!"),
            Self::NotFound { target } => write!(f, "{target} is not in the array."),
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    /// Sort completed; values are non-decreasing.
    Sorted,
    /// Search located `target` at `index`.
    Found {
        /// Value searched for.
        target: u32,
        /// Matching index.
        index: usize,
    },
    /// Search exhausted the range.
    NotFound {
        /// Value searched for.
        target: u32,
    },
    /// Search on an empty array; nothing to look for.
    Empty,
}

/// One visualization step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StepEvent {
    /// Color one bar.
    Mark {
        /// Bar index.
        index: usize,
        /// New color.
        color: BarColor,
    },
    /// Change one bar's opacity.
    Fade {
        /// Bar index.
        index: usize,
        /// New opacity.
        opacity: Opacity,
    },
    /// Exchange two values.
    Swap {
        /// First index.
        i: usize,
        /// Second index.
        j: usize,
    },
    /// Overwrite one value.
    Write {
        /// Bar index.
        index: usize,
        /// New value.
        value: u32,
    },
    /// Suspend before the next step.
    Wait {
        /// Kind of delay.
        pause: Pause,
    },
    /// Every color back to default; opacity untouched.
    ResetColors,
    /// Show a blocking message.
    Announce {
        /// The message.
        announcement: Announcement,
    },
    /// End of the run.
    Done {
        /// Final result.
        outcome: Outcome,
    },
}

/// Operation counts for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Value comparisons.
    pub comparisons: u64,
    /// Swaps of two distinct positions.
    pub swaps: u64,
    /// Single-position writes.
    pub writes: u64,
    /// Step pauses (visible animation frames).
    pub steps: u64,
}

/// Complete record of one algorithm run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    /// Algorithm that produced the trace.
    pub algorithm: Algorithm,
    /// Values before the run.
    pub initial_values: Vec<u32>,
    /// Values after the run.
    pub final_values: Vec<u32>,
    /// Ordered events, ending with [`StepEvent::Done`].
    pub events: Vec<StepEvent>,
    /// Operation counts.
    pub stats: RunStats,
    /// How the run ended.
    pub outcome: Outcome,
}

/// Working copy of the values plus the event log.
///
/// All mutations go through the tracer so the log can never drift from the
/// values the algorithm actually saw.
#[derive(Debug)]
pub struct Tracer {
    initial: Vec<u32>,
    values: Vec<u32>,
    events: Vec<StepEvent>,
    stats: RunStats,
}

impl Tracer {
    /// Start tracing over a copy of `values`.
    #[must_use]
    pub fn new(values: &[u32]) -> Self {
        Self {
            initial: values.to_vec(),
            values: values.to_vec(),
            events: Vec::new(),
            stats: RunStats::default(),
        }
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Current working values.
    #[must_use]
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Value at `index`.
    #[must_use]
    pub fn value(&self, index: usize) -> u32 {
        self.values[index]
    }

    /// Events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[StepEvent] {
        &self.events
    }

    /// Compare two positions: `values[a] < values[b]`.
    pub fn less(&mut self, a: usize, b: usize) -> bool {
        self.stats.comparisons += 1;
        self.values[a] < self.values[b]
    }

    /// Compare two plain values, counting the comparison.
    pub fn less_value(&mut self, a: u32, b: u32) -> bool {
        self.stats.comparisons += 1;
        a < b
    }

    /// Compare a position against a value for equality.
    pub fn equals(&mut self, index: usize, target: u32) -> bool {
        self.stats.comparisons += 1;
        self.values[index] == target
    }

    /// Record a color change.
    pub fn mark(&mut self, index: usize, color: BarColor) {
        self.events.push(StepEvent::Mark { index, color });
    }

    /// Color every position.
    pub fn mark_all(&mut self, color: BarColor) {
        for index in 0..self.values.len() {
            self.mark(index, color);
        }
    }

    /// Record an opacity change.
    pub fn fade(&mut self, index: usize, opacity: Opacity) {
        self.events.push(StepEvent::Fade { index, opacity });
    }

    /// Suspend for one step.
    pub fn wait(&mut self) {
        self.pause(Pause::Step);
    }

    /// Suspend with a specific pause kind.
    pub fn pause(&mut self, pause: Pause) {
        if pause == Pause::Step {
            self.stats.steps += 1;
        }
        self.events.push(StepEvent::Wait { pause });
    }

    /// Exchange two values, then suspend for one step.
    ///
    /// Swapping a position with itself changes nothing but still pauses, so
    /// the pacing of the animation does not depend on the data.
    pub fn swap(&mut self, i: usize, j: usize) {
        if i != j {
            self.values.swap(i, j);
            self.stats.swaps += 1;
            self.events.push(StepEvent::Swap { i, j });
        }
        self.wait();
    }

    /// Overwrite one value.
    pub fn write(&mut self, index: usize, value: u32) {
        self.values[index] = value;
        self.stats.writes += 1;
        self.events.push(StepEvent::Write { index, value });
    }

    /// Reset every color to default.
    pub fn reset_colors(&mut self) {
        self.events.push(StepEvent::ResetColors);
    }

    /// Show a blocking message.
    pub fn announce(&mut self, announcement: Announcement) {
        self.events.push(StepEvent::Announce { announcement });
    }

    fn finish(mut self, algorithm: Algorithm, outcome: Outcome) -> Trace {
        self.events.push(StepEvent::Done { outcome });
        Trace {
            algorithm,
            initial_values: self.initial,
            final_values: self.values,
            events: self.events,
            stats: self.stats,
            outcome,
        }
    }
}
