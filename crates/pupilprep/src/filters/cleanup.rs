//! Shared mask cleanup applied after every filter criterion.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::gaps::GapPolicy;
use crate::algorithms::loners::LonerPolicy;

/// Short-run removal and gap expansion bound to one recording's sampling rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskCleaner<T> {
    /// Sampling rate of the recording (Hz).
    pub sampling_rate: T,

    /// Short-run removal policy.
    pub loners: LonerPolicy<T>,

    /// Gap expansion policy.
    pub gaps: GapPolicy<T>,
}

impl<T: Float> MaskCleaner<T> {
    /// Cleaner with default policies.
    pub fn new(sampling_rate: T) -> Self {
        Self {
            sampling_rate,
            loners: LonerPolicy::default(),
            gaps: GapPolicy::default(),
        }
    }

    /// Delete short isolated valid runs.
    pub fn remove_loners(&self, mask: &[bool]) -> Vec<bool> {
        self.loners.apply(mask, self.sampling_rate)
    }

    /// Pad invalidity around blink-sized gaps.
    pub fn expand_gaps(&self, timestamps: &[T], mask: &[bool]) -> Vec<bool> {
        self.gaps.apply(timestamps, mask)
    }
}
