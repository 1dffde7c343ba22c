//! Kinematic validity: reject implausible pupil-diameter change rates.
//!
//! ## Purpose
//!
//! Pupil diameter cannot change arbitrarily fast. Blinks, partial occlusion
//! and tracker glitches produce jumps whose rate of change is far beyond the
//! physiological range. This stage measures the dilation speed of every
//! valid sample and rejects samples whose speed reaches an adaptive MAD-based
//! threshold.
//!
//! ## Key concepts
//!
//! * **Speed**: `Δdiameter / Δt` between consecutive valid samples (units/ms).
//!   Pairs further apart than `max_gap_ms` yield no estimate.
//! * **Max speed**: The larger magnitude of a sample's backward and forward
//!   speed; NaN if neither exists.
//! * **Threshold**: `median + 16·MAD` of the max speeds (additive fallback if MAD is 0).
//! * **Cleanup**: short-run removal, gap expansion, short-run removal. Gap
//!   expansion can strand new short runs, hence the second removal.
//!
//! ## Invariants
//!
//! * Only samples valid in the incoming mask can be rejected by the criterion.
//! * Output mask length equals input length.

// External dependencies
use num_traits::Float;
use tracing::debug;

// Internal dependencies
use crate::filters::cleanup::MaskCleaner;
use crate::math::scaling::MadThreshold;
use crate::primitives::numeric::lit;
use crate::primitives::runs::valid_indices;

// ============================================================================
// Policy
// ============================================================================

/// Policy for the dilation-speed criterion.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeedPolicy<T> {
    /// MAD multiplier for the speed threshold.
    pub mad_multiplier: T,

    /// Speed estimates spanning more than this (ms) are discarded.
    pub max_gap_ms: T,
}

impl<T: Float> Default for SpeedPolicy<T> {
    fn default() -> Self {
        Self {
            mad_multiplier: lit(16.0),
            max_gap_ms: lit(200.0),
        }
    }
}

// ============================================================================
// Speed Filter
// ============================================================================

impl<T: Float> SpeedPolicy<T> {
    /// Max absolute dilation speed per sample; NaN for invalid samples.
    pub fn max_speeds(&self, timestamps: &[T], diameter: &[T], mask: &[bool]) -> Vec<T> {
        let valid = valid_indices(mask);
        let mut out = vec![T::nan(); mask.len()];

        // speeds[k] is between valid[k] and valid[k + 1]
        let speeds: Vec<T> = valid
            .windows(2)
            .map(|pair| {
                let dt = timestamps[pair[1]] - timestamps[pair[0]];
                if dt > self.max_gap_ms {
                    T::nan()
                } else {
                    ((diameter[pair[1]] - diameter[pair[0]]) / dt).abs()
                }
            })
            .collect();

        for (k, &idx) in valid.iter().enumerate() {
            let back = if k > 0 { speeds[k - 1] } else { T::nan() };
            let forward = speeds.get(k).copied().unwrap_or_else(T::nan);
            // Float::max ignores a NaN operand
            out[idx] = back.max(forward);
        }

        out
    }

    /// Reject samples whose max speed reaches the MAD threshold, then clean the mask.
    pub fn apply(
        &self,
        timestamps: &[T],
        diameter: &[T],
        mask: &[bool],
        cleaner: &MaskCleaner<T>,
    ) -> Vec<bool> {
        let max_speed = self.max_speeds(timestamps, diameter, mask);

        let mut out = mask.to_vec();
        match MadThreshold::from_values(&max_speed, self.mad_multiplier) {
            Some(threshold) => {
                debug!(
                    threshold = threshold.threshold.to_f64().unwrap_or(f64::NAN),
                    degenerate = threshold.is_degenerate(),
                    "dilation speed threshold"
                );
                for (valid, &speed) in out.iter_mut().zip(&max_speed) {
                    if *valid && threshold.exceeded_by(speed) {
                        *valid = false;
                    }
                }
            }
            None => debug!("no dilation speed estimate, speed criterion skipped"),
        }

        let out = cleaner.remove_loners(&out);
        let out = cleaner.expand_gaps(timestamps, &out);
        cleaner.remove_loners(&out)
    }
}
