//! Robust statistics: NaN-aware median, MAD, and MAD-derived thresholds.
//!
//! ## Purpose
//!
//! Every adaptive criterion in the pipeline (speed, baseline deviation) flags
//! samples whose statistic exceeds `median + k * MAD`. This module computes
//! those quantities while ignoring missing (NaN) entries.
//!
//! ## Key concepts
//!
//! * **MAD**: `median(|x - median(x)|)`, unscaled.
//! * **Zero-MAD fallback**: For degenerate (constant) data the threshold is
//!   `median + k`, treating the multiplier as an additive constant. This keeps
//!   the threshold from collapsing onto the median.
//!
//! ## Invariants
//!
//! * NaN values never participate in a median.
//! * Statistics over an all-NaN or empty input are `None`, never NaN.

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;
use tracing::debug;

// Internal dependencies
use crate::primitives::numeric::lit;

// ============================================================================
// Medians
// ============================================================================

/// Median of the non-NaN entries, or `None` if there are none.
pub fn nan_median<T: Float>(vals: &[T]) -> Option<T> {
    let mut finite: Vec<T> = vals.iter().copied().filter(|v| !v.is_nan()).collect();
    median_inplace(&mut finite)
}

/// Median absolute deviation of the non-NaN entries.
pub fn nan_mad<T: Float>(vals: &[T]) -> Option<T> {
    median_and_mad(vals).map(|(_, mad)| mad)
}

// Median and MAD of the non-NaN entries in one allocation.
fn median_and_mad<T: Float>(vals: &[T]) -> Option<(T, T)> {
    let mut finite: Vec<T> = vals.iter().copied().filter(|v| !v.is_nan()).collect();
    let median = median_inplace(&mut finite)?;
    for v in finite.iter_mut() {
        *v = (*v - median).abs();
    }
    let mad = median_inplace(&mut finite)?;
    Some((median, mad))
}

// Median via quickselect; reorders `vals`.
fn median_inplace<T: Float>(vals: &mut [T]) -> Option<T> {
    let n = vals.len();
    if n == 0 {
        return None;
    }

    let mid = n / 2;
    vals.select_nth_unstable_by(mid, |a, b| a.partial_cmp(b).unwrap_or(Equal));
    let upper = vals[mid];

    if n % 2 == 1 {
        return Some(upper);
    }

    // Even length: the lower middle is the maximum of the left partition.
    let lower = vals[..mid].iter().copied().fold(vals[0], T::max);
    Some((lower + upper) / lit(2.0))
}

// ============================================================================
// Threshold
// ============================================================================

/// Upper outlier threshold derived from the median and MAD of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MadThreshold<T> {
    /// Median of the non-NaN values.
    pub median: T,

    /// Median absolute deviation of the non-NaN values.
    pub mad: T,

    /// Multiplier `k`.
    pub multiplier: T,

    /// `median + k * mad`, or `median + k` when `mad == 0`.
    pub threshold: T,
}

impl<T: Float> MadThreshold<T> {
    /// Derive the threshold, or `None` if every value is NaN.
    pub fn from_values(vals: &[T], multiplier: T) -> Option<Self> {
        let (median, mad) = median_and_mad(vals)?;

        let threshold = if mad == T::zero() {
            debug!("MAD is 0, using median plus constant as threshold");
            median + multiplier
        } else {
            median + multiplier * mad
        };

        Some(Self {
            median,
            mad,
            multiplier,
            threshold,
        })
    }

    /// Whether the zero-MAD additive fallback was used.
    pub fn is_degenerate(&self) -> bool {
        self.mad == T::zero()
    }

    /// `true` if `value` reaches or exceeds the threshold. NaN never does.
    #[inline]
    pub fn exceeded_by(&self, value: T) -> bool {
        value >= self.threshold
    }
}
