//! Gap expansion around blink-sized holes in the validity mask.
//!
//! ## Purpose
//!
//! Samples adjacent to a blink or signal dropout are corrupted by eyelid
//! movement before the tracker loses the pupil and after it recovers it.
//! This module invalidates a padding window around every gap of plausible
//! blink duration.
//!
//! ## Key concepts
//!
//! * **Gap**: time between two consecutive valid samples.
//! * **Eligible gap**: `min_gap_ms < gap < max_gap_ms`. Shorter gaps are
//!   sensor jitter; longer ones are handled by other stages.
//! * **Window**: `[t_start − pad_back, t_end + pad_forward]`, inclusive.
//!   Both paddings are multiplied by `long_gap_factor` when the gap exceeds
//!   `long_gap_ms` (likely recording artifact rather than a blink).
//!
//! ## Invariants
//!
//! * Output only turns `true` into `false`.
//! * Overlapping windows are merged before application.
//! * Gaps are taken from the incoming mask, not from the partially expanded one.

// External dependencies
use num_traits::Float;
use tracing::debug;

// Internal dependencies
use crate::primitives::numeric::{count_valid, lit};
use crate::primitives::runs::valid_indices;

// ============================================================================
// Policy
// ============================================================================

/// Policy for padding invalidity around gaps.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GapPolicy<T> {
    /// Gaps at or below this duration (ms) are ignored.
    pub min_gap_ms: T,

    /// Gaps at or above this duration (ms) are ignored.
    pub max_gap_ms: T,

    /// Padding before the gap start (ms).
    pub pad_back_ms: T,

    /// Padding after the gap end (ms).
    pub pad_forward_ms: T,

    /// Gaps longer than this (ms) get widened padding.
    pub long_gap_ms: T,

    /// Padding multiplier for long gaps.
    pub long_gap_factor: T,
}

impl<T: Float> Default for GapPolicy<T> {
    fn default() -> Self {
        Self {
            min_gap_ms: lit(75.0),
            max_gap_ms: lit(2000.0),
            pad_back_ms: lit(100.0),
            pad_forward_ms: lit(150.0),
            long_gap_ms: lit(500.0),
            long_gap_factor: lit(2.0),
        }
    }
}

impl<T: Float> GapPolicy<T> {
    /// Padding `(back, forward)` for a gap of the given duration.
    pub fn padding_for(&self, gap_ms: T) -> (T, T) {
        if gap_ms > self.long_gap_ms {
            (
                self.pad_back_ms * self.long_gap_factor,
                self.pad_forward_ms * self.long_gap_factor,
            )
        } else {
            (self.pad_back_ms, self.pad_forward_ms)
        }
    }

    /// Whether a gap of this duration gets padded.
    #[inline]
    pub fn is_eligible(&self, gap_ms: T) -> bool {
        gap_ms > self.min_gap_ms && gap_ms < self.max_gap_ms
    }

    /// Exclusion windows `(from_ms, to_ms)` for the gaps in `mask`, merged and sorted.
    pub fn windows(&self, timestamps: &[T], mask: &[bool]) -> Vec<(T, T)> {
        let valid = valid_indices(mask);

        let mut windows: Vec<(T, T)> = valid
            .windows(2)
            .filter_map(|pair| {
                let (t_start, t_end) = (timestamps[pair[0]], timestamps[pair[1]]);
                let gap = t_end - t_start;
                self.is_eligible(gap).then(|| {
                    let (back, forward) = self.padding_for(gap);
                    (t_start - back, t_end + forward)
                })
            })
            .collect();

        windows.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(core::cmp::Ordering::Equal));

        let mut merged: Vec<(T, T)> = Vec::with_capacity(windows.len());
        for (from, to) in windows {
            match merged.last_mut() {
                Some(last) if from <= last.1 => last.1 = last.1.max(to),
                _ => merged.push((from, to)),
            }
        }
        merged
    }

    // ========================================================================
    // Expansion
    // ========================================================================

    /// Return a copy of `mask` with every sample inside an exclusion window set to `false`.
    pub fn apply(&self, timestamps: &[T], mask: &[bool]) -> Vec<bool> {
        let mut out = mask.to_vec();
        let windows = self.windows(timestamps, mask);
        if windows.is_empty() {
            return out;
        }

        // Timestamps are increasing, so one sweep covers all windows.
        let mut w = 0;
        for (i, &t) in timestamps.iter().enumerate() {
            while w < windows.len() && t > windows[w].1 {
                w += 1;
            }
            if w == windows.len() {
                break;
            }
            if t >= windows[w].0 {
                out[i] = false;
            }
        }

        debug!(
            windows = windows.len(),
            removed = count_valid(mask) - count_valid(&out),
            "gap expansion"
        );
        out
    }
}

/// Expand gaps in `mask` using `policy`.
pub fn expand_gaps<T: Float>(timestamps: &[T], mask: &[bool], policy: &GapPolicy<T>) -> Vec<bool> {
    policy.apply(timestamps, mask)
}
