//! Contiguous run extraction over validity masks.
//!
//! ## Purpose
//!
//! Both mask-cleanup routines reason about maximal spans of `true` samples
//! ("valid runs") and the spans of `false` samples between them ("gaps").
//! This module turns a boolean mask into an ordered list of runs.
//!
//! ## Invariants
//!
//! * Runs are returned in increasing index order and never overlap.
//! * Consecutive runs are separated by at least one invalid sample.
//! * `start <= end` for every run (`end` is inclusive).

// ============================================================================
// Run
// ============================================================================

/// A maximal span of valid samples, `start..=end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// First valid index.
    pub start: usize,

    /// Last valid index (inclusive).
    pub end: usize,
}

impl Run {
    /// Index distance from first to last sample (0 for a single sample).
    #[inline]
    pub fn span(&self) -> usize {
        self.end - self.start
    }

    /// Index distance from the end of this run to the start of `next`.
    #[inline]
    pub fn distance_to(&self, next: &Run) -> usize {
        next.start.saturating_sub(self.end)
    }
}

// ============================================================================
// Extraction
// ============================================================================

/// Extract all maximal runs of `true` values.
pub fn valid_runs(mask: &[bool]) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut current: Option<usize> = None;

    for (i, &valid) in mask.iter().enumerate() {
        match (valid, current) {
            (true, None) => current = Some(i),
            (false, Some(start)) => {
                runs.push(Run { start, end: i - 1 });
                current = None;
            }
            _ => {}
        }
    }

    if let Some(start) = current {
        runs.push(Run {
            start,
            end: mask.len() - 1,
        });
    }

    runs
}

/// Indices of all valid samples.
pub fn valid_indices(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(i, &v)| v.then_some(i))
        .collect()
}
