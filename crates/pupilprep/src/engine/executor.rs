//! Execution engine for the preprocessing pipeline.
//!
//! ## Purpose
//!
//! This module holds the validated configuration of a session and runs a
//! recording through the stages in order: geometric validity, dilation
//! speed, baseline deviation, then masking, detrending and degree
//! conversion of the channels.
//!
//! ## Design notes
//!
//! * Every stage borrows its inputs and returns a new mask; the engine keeps
//!   each intermediate mask for the diagnostics.
//! * Each stage is also exposed on its own, with the same input checks.
//! * Generic over `Float` types to support f32 and f64.
//!
//! ## Invariants
//!
//! * A `Preprocessor` only exists for a configuration that passed validation.
//! * All output vectors have the length of the input timestamps.
//!
//! ## Non-goals
//!
//! * This module does not read or write recording files.
//! * This module does not calibrate or centre raw tracker output; see
//!   `algorithms::calibration` for those steps.

// External dependencies
use num_traits::Float;
use tracing::info;

// Internal dependencies
use crate::algorithms::gaps::GapPolicy;
use crate::algorithms::interpolation::uniform_timestamps;
use crate::algorithms::loners::LonerPolicy;
use crate::algorithms::regression::remove_invalid_detrend;
use crate::engine::output::PrepResult;
use crate::engine::validator::Validator;
use crate::evaluation::diagnostics::{StageCounts, StageDiagnostics};
use crate::filters::bounds::BoundsFilter;
use crate::filters::cleanup::MaskCleaner;
use crate::filters::deviation::{DeviationOutcome, DeviationPolicy};
use crate::filters::speed::SpeedPolicy;
use crate::math::geometry::DisplayGeometry;
use crate::primitives::errors::PrepError;
use crate::primitives::numeric::lit;

// ============================================================================
// Configuration
// ============================================================================

/// Complete configuration of one preprocessing session.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrepConfig<T> {
    /// Sampling rate of the recording (Hz).
    pub sampling_rate: T,

    /// Display the gaze coordinates refer to.
    pub geometry: DisplayGeometry<T>,

    /// Short-run removal policy.
    pub loners: LonerPolicy<T>,

    /// Gap expansion policy.
    pub gaps: GapPolicy<T>,

    /// Dilation-speed criterion.
    pub speed: SpeedPolicy<T>,

    /// Baseline-deviation criterion.
    pub deviation: DeviationPolicy<T>,

    /// Subtract a linear trend from the cleaned channels.
    pub detrend: bool,
}

impl<T: Float> Default for PrepConfig<T> {
    fn default() -> Self {
        Self {
            sampling_rate: lit(1000.0),
            geometry: DisplayGeometry::default(),
            loners: LonerPolicy::default(),
            gaps: GapPolicy::default(),
            speed: SpeedPolicy::default(),
            deviation: DeviationPolicy::default(),
            detrend: true,
        }
    }
}

// ============================================================================
// Preprocessor
// ============================================================================

/// Validated pipeline, ready to run recordings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preprocessor<T> {
    config: PrepConfig<T>,
}

impl<T: Float> Preprocessor<T> {
    /// Validate `config` and build a preprocessor from it.
    pub fn from_config(config: PrepConfig<T>) -> Result<Self, PrepError> {
        Validator::validate_config(&config)?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &PrepConfig<T> {
        &self.config
    }

    /// Cleanup routines bound to this session's sampling rate.
    pub fn cleaner(&self) -> MaskCleaner<T> {
        MaskCleaner {
            sampling_rate: self.config.sampling_rate,
            loners: self.config.loners,
            gaps: self.config.gaps,
        }
    }

    // ========================================================================
    // Individual Stages
    // ========================================================================

    /// Geometric validity mask of centred gaze coordinates.
    pub fn bounds_mask(&self, timestamps: &[T], x: &[T], y: &[T]) -> Result<Vec<bool>, PrepError> {
        let n = timestamps.len();
        Validator::validate_length("x", x, n)?;
        Validator::validate_length("y", y, n)?;
        Validator::validate_timestamps(timestamps)?;

        let filter = BoundsFilter::new(self.config.geometry);
        Ok(filter.apply(timestamps, x, y, &self.cleaner()))
    }

    /// Dilation-speed mask, refining `mask`.
    pub fn speed_mask(
        &self,
        timestamps: &[T],
        pupil: &[T],
        mask: &[bool],
    ) -> Result<Vec<bool>, PrepError> {
        self.check_stage_inputs(timestamps, pupil, mask)?;
        Ok(self
            .config
            .speed
            .apply(timestamps, pupil, mask, &self.cleaner()))
    }

    /// Baseline-deviation mask, refining `mask`.
    pub fn deviation_mask(
        &self,
        timestamps: &[T],
        pupil: &[T],
        mask: &[bool],
    ) -> Result<DeviationOutcome, PrepError> {
        self.check_stage_inputs(timestamps, pupil, mask)?;
        Ok(self
            .config
            .deviation
            .apply(timestamps, pupil, mask, &self.cleaner()))
    }

    fn check_stage_inputs(
        &self,
        timestamps: &[T],
        pupil: &[T],
        mask: &[bool],
    ) -> Result<(), PrepError> {
        let n = timestamps.len();
        Validator::validate_length("pupil", pupil, n)?;
        Validator::validate_length("mask", mask, n)?;
        Validator::validate_timestamps(timestamps)
    }

    // ========================================================================
    // Pipeline
    // ========================================================================

    /// Run the full pipeline over one recording.
    ///
    /// `x` and `y` are gaze positions in pixels relative to the screen centre.
    pub fn run(
        &self,
        timestamps: &[T],
        x: &[T],
        y: &[T],
        pupil: &[T],
    ) -> Result<PrepResult<T>, PrepError> {
        Validator::validate_inputs(timestamps, x, y, pupil)?;

        let n = timestamps.len();
        if n == 0 {
            return Ok(PrepResult::empty());
        }

        let cleaner = self.cleaner();
        let all_valid = vec![true; n];

        let bounds = BoundsFilter::new(self.config.geometry).apply(timestamps, x, y, &cleaner);
        let speed = self.config.speed.apply(timestamps, pupil, &bounds, &cleaner);
        let outcome = self
            .config
            .deviation
            .apply(timestamps, pupil, &speed, &cleaner);

        let diagnostics = StageDiagnostics {
            total: n,
            bounds: StageCounts::between(&all_valid, &bounds),
            speed: StageCounts::between(&bounds, &speed),
            deviation: StageCounts::between(&speed, &outcome.mask),
            deviation_passes: outcome.passes,
            converged: outcome.converged,
        };

        let mask = outcome.mask;
        let detrend = self.config.detrend;
        let x_clean = remove_invalid_detrend(x, &mask, detrend);
        let y_clean = remove_invalid_detrend(y, &mask, detrend);
        let pupil_clean = remove_invalid_detrend(pupil, &mask, detrend);

        let geometry = &self.config.geometry;
        let x_deg = geometry.series_to_degrees(&x_clean);
        let y_deg = geometry.series_to_degrees(&y_clean);

        info!(
            samples = n,
            bounds_removed = diagnostics.bounds.removed(),
            speed_removed = diagnostics.speed.removed(),
            deviation_removed = diagnostics.deviation.removed(),
            passes = diagnostics.deviation_passes,
            converged = diagnostics.converged,
            "preprocessing complete"
        );

        Ok(PrepResult {
            timestamps: timestamps.to_vec(),
            mask,
            x: x_clean,
            y: y_clean,
            pupil: pupil_clean,
            x_deg,
            y_deg,
            diagnostics,
        })
    }

    /// Run the pipeline on channels sampled uniformly from t = 0.
    pub fn run_uniform(&self, x: &[T], y: &[T], pupil: &[T]) -> Result<PrepResult<T>, PrepError> {
        let timestamps = uniform_timestamps(x.len(), self.config.sampling_rate);
        self.run(&timestamps, x, y, pupil)
    }
}
