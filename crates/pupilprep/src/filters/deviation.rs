//! Baseline-deviation validity: reject samples far from a smooth pupil trend.
//!
//! ## Purpose
//!
//! Isolated spikes that survive the speed criterion still stand out against
//! the slow pupil response. This stage fits a smooth baseline through the
//! valid samples and rejects samples whose absolute deviation from it
//! reaches an adaptive MAD-based threshold, refitting over a bounded number
//! of passes.
//!
//! ## Key concepts
//!
//! Each pass:
//! 1. Takes the diameter at samples valid in both the running and incoming mask.
//! 2. Interpolates them linearly onto a uniform grid at `interp_rate_hz`,
//!    filling the ends by nearest-value extrapolation.
//! 3. Smooths the grid with a zero-phase first-order Butterworth low-pass.
//! 4. Interpolates the smooth curve back to the original timestamps.
//! 5. Thresholds `|diameter − baseline|` at `median + 16·MAD` of the jointly valid residuals.
//! 6. Keeps samples of the incoming mask whose residual is at or below the
//!    threshold, then removes short runs and expands gaps.
//!
//! Samples rejected in one pass may be readmitted in the next once the
//! baseline is no longer pulled towards the outliers.
//!
//! ## Invariants
//!
//! * The running mask never admits a sample absent from the incoming mask.
//! * The loop stops after `max_passes` or as soon as a pass (after the first)
//!   leaves the mask it started with unchanged.

// External dependencies
use num_traits::Float;
use tracing::debug;

// Internal dependencies
use crate::algorithms::interpolation::{interp_linear, interp_linear_extrapolate, uniform_grid};
use crate::filters::cleanup::MaskCleaner;
use crate::math::filter::FirstOrderLowpass;
use crate::math::scaling::MadThreshold;
use crate::primitives::numeric::{count_valid, lit};

// ============================================================================
// Policy
// ============================================================================

/// Policy for the iterative baseline-deviation criterion.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviationPolicy<T> {
    /// MAD multiplier for the residual threshold.
    pub mad_multiplier: T,

    /// Rate of the uniform resampling grid (Hz).
    pub interp_rate_hz: T,

    /// Low-pass cutoff applied on the grid (Hz).
    pub lowpass_cutoff_hz: T,

    /// Upper bound on refitting passes.
    pub max_passes: usize,
}

impl<T: Float> Default for DeviationPolicy<T> {
    fn default() -> Self {
        Self {
            mad_multiplier: lit(16.0),
            interp_rate_hz: lit(100.0),
            lowpass_cutoff_hz: lit(16.0),
            max_passes: 4,
        }
    }
}

// ============================================================================
// Outputs
// ============================================================================

/// Residuals and baseline of one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Deviation<T> {
    /// `|diameter − baseline|` per sample; NaN where undefined.
    pub residuals: Vec<T>,

    /// Smooth baseline at the original timestamps.
    pub baseline: Vec<T>,
}

/// Final mask of the iterative filter and how it got there.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviationOutcome {
    /// Validity mask after the last pass.
    pub mask: Vec<bool>,

    /// Number of passes run.
    pub passes: usize,

    /// Whether the loop stopped because the mask stopped changing.
    pub converged: bool,
}

// ============================================================================
// Baseline
// ============================================================================

impl<T: Float> DeviationPolicy<T> {
    /// Baseline and residuals using the samples valid in `mask`.
    ///
    /// `grid` is the uniform resampling grid; `lowpass` is designed for its rate.
    pub fn deviation(
        &self,
        timestamps: &[T],
        diameter: &[T],
        mask: &[bool],
        grid: &[T],
        lowpass: &FirstOrderLowpass<T>,
    ) -> Deviation<T> {
        let (t_valid, d_valid): (Vec<T>, Vec<T>) = timestamps
            .iter()
            .zip(diameter)
            .zip(mask)
            .filter(|&((_, d), &valid)| valid && !d.is_nan())
            .map(|((&t, &d), _)| (t, d))
            .unzip();

        if t_valid.is_empty() {
            let n = timestamps.len();
            return Deviation {
                residuals: vec![T::nan(); n],
                baseline: vec![T::nan(); n],
            };
        }

        let uniform = interp_linear_extrapolate(&t_valid, &d_valid, grid);
        let smooth = lowpass.filtfilt(&uniform);
        let baseline = interp_linear(grid, &smooth, timestamps);

        let residuals = diameter
            .iter()
            .zip(&baseline)
            .map(|(&d, &b)| (d - b).abs())
            .collect();

        Deviation {
            residuals,
            baseline,
        }
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Run the refitting loop starting from `mask`.
    pub fn apply(
        &self,
        timestamps: &[T],
        diameter: &[T],
        mask: &[bool],
        cleaner: &MaskCleaner<T>,
    ) -> DeviationOutcome {
        let n = mask.len();
        if n == 0 {
            return DeviationOutcome {
                mask: Vec::new(),
                passes: 0,
                converged: true,
            };
        }

        let masked: Vec<T> = diameter
            .iter()
            .zip(mask)
            .map(|(&d, &valid)| if valid { d } else { T::nan() })
            .collect();

        let grid = uniform_grid(timestamps[0], timestamps[n - 1], self.interp_rate_hz);
        let lowpass = FirstOrderLowpass::new(self.lowpass_cutoff_hz, self.interp_rate_hz);

        let mut running = mask.to_vec();
        let mut passes = 0;
        let mut converged = false;

        for pass in 0..self.max_passes {
            passes = pass + 1;
            let start = running.clone();

            let joint: Vec<bool> = running.iter().zip(mask).map(|(&r, &m)| r && m).collect();
            let dev = self.deviation(timestamps, &masked, &joint, &grid, &lowpass);

            let joint_residuals: Vec<T> = dev
                .residuals
                .iter()
                .zip(&joint)
                .map(|(&r, &valid)| if valid { r } else { T::nan() })
                .collect();

            let threshold = MadThreshold::from_values(&joint_residuals, self.mad_multiplier);
            running = match threshold {
                Some(threshold) => dev
                    .residuals
                    .iter()
                    .zip(mask)
                    .map(|(&r, &valid)| valid && r <= threshold.threshold)
                    .collect(),
                None => vec![false; n],
            };
            running = cleaner.remove_loners(&running);
            running = cleaner.expand_gaps(timestamps, &running);

            debug!(
                pass,
                threshold = threshold
                    .and_then(|t| t.threshold.to_f64())
                    .unwrap_or(f64::NAN),
                degenerate = threshold.is_some_and(|t| t.is_degenerate()),
                valid = count_valid(&running),
                "baseline deviation pass"
            );

            if pass > 0 && running == start {
                converged = true;
                break;
            }
        }

        DeviationOutcome {
            mask: running,
            passes,
            converged,
        }
    }
}
