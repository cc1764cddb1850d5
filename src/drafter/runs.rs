//! Contiguous run detection along one grid axis.

use serde::{Deserialize, Serialize};

/// A maximal span of consecutive integer coordinates, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Run {
    pub start: i32,
    pub end: i32,
}

impl Run {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Number of cells covered.
    pub fn len(&self) -> u32 {
        self.end.abs_diff(self.start).saturating_add(1)
    }

    /// Center of the span in cell units, e.g. 1.5 for cells 0..=2.
    pub fn midpoint(&self) -> f32 {
        (self.start as f32 + self.end as f32 + 1.0) / 2.0
    }
}

/// Split an ascending sequence of distinct coordinates into maximal runs.
///
/// Runs of length 1 are returned too; callers that only label longer spans
/// filter them out. Empty input gives no runs.
pub fn detect_runs(coords: &[i32]) -> Vec<Run> {
    let mut runs = Vec::new();
    let Some((&first, rest)) = coords.split_first() else {
        return runs;
    };

    let mut current = Run::new(first, first);
    for &c in rest {
        debug_assert!(c > current.end, "coordinates must be ascending and distinct");
        if current.end.checked_add(1) == Some(c) {
            current.end = c;
        } else {
            runs.push(current);
            current = Run::new(c, c);
        }
    }
    runs.push(current);
    runs
}
