//! Input and configuration validation for the preprocessing pipeline.
//!
//! ## Purpose
//!
//! This module checks configuration once, when a `Preprocessor` is built,
//! and checks recordings every time one is run. A mask computed over
//! misaligned or unordered data would be silently wrong, so these are the
//! only conditions the pipeline treats as errors.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Cheap length checks run before per-sample scans.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Timestamps**: Finite and strictly increasing.
//! * **Channels**: Same length as the timestamps; NaN is allowed (missing data).
//! * **Policies**: Multipliers and durations positive, gap bounds ordered,
//!   low-pass cutoff below the Nyquist frequency of the resampling grid.
//!
//! ## Non-goals
//!
//! * This module does not repair invalid inputs.
//! * Zero-length recordings are not rejected; they yield an empty result.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::gaps::GapPolicy;
use crate::algorithms::loners::LonerPolicy;
use crate::engine::executor::PrepConfig;
use crate::filters::deviation::DeviationPolicy;
use crate::filters::speed::SpeedPolicy;
use crate::math::geometry::DisplayGeometry;
use crate::primitives::errors::PrepError;
use crate::primitives::numeric::lit;

#[inline]
fn as_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for pipeline configuration and recordings.
///
/// All methods return `Result<(), PrepError>` and fail fast upon identifying
/// the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Input Validation
    // ========================================================================

    /// Validate a recording: channel lengths, then timestamp ordering.
    pub fn validate_inputs<T: Float>(
        timestamps: &[T],
        x: &[T],
        y: &[T],
        pupil: &[T],
    ) -> Result<(), PrepError> {
        let n = timestamps.len();
        for (name, series) in [("x", x), ("y", y), ("pupil", pupil)] {
            Self::validate_length(name, series, n)?;
        }
        Self::validate_timestamps(timestamps)
    }

    /// Validate that a channel has `expected` samples.
    pub fn validate_length<T>(
        name: &'static str,
        series: &[T],
        expected: usize,
    ) -> Result<(), PrepError> {
        if series.len() != expected {
            return Err(PrepError::MismatchedLengths {
                name,
                expected,
                got: series.len(),
            });
        }
        Ok(())
    }

    /// Validate that timestamps are finite and strictly increasing.
    pub fn validate_timestamps<T: Float>(timestamps: &[T]) -> Result<(), PrepError> {
        if let Some((i, &t)) = timestamps.iter().enumerate().find(|(_, t)| !t.is_finite()) {
            return Err(PrepError::InvalidNumericValue(format!(
                "timestamps[{}]={}",
                i,
                as_f64(t)
            )));
        }

        if let Some(i) = timestamps.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(PrepError::NonMonotonicTimestamps { index: i + 1 });
        }

        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the sampling rate.
    pub fn validate_sampling_rate<T: Float>(rate: T) -> Result<(), PrepError> {
        if !rate.is_finite() || rate <= T::zero() {
            return Err(PrepError::InvalidSamplingRate(as_f64(rate)));
        }
        Ok(())
    }

    /// Validate a strictly positive, finite parameter.
    pub fn validate_positive<T: Float>(parameter: &'static str, value: T) -> Result<(), PrepError> {
        if !value.is_finite() || value <= T::zero() {
            return Err(PrepError::InvalidParameter {
                parameter,
                value: as_f64(value),
                reason: "must be > 0 and finite",
            });
        }
        Ok(())
    }

    /// Validate a non-negative, finite parameter.
    pub fn validate_non_negative<T: Float>(
        parameter: &'static str,
        value: T,
    ) -> Result<(), PrepError> {
        if !value.is_finite() || value < T::zero() {
            return Err(PrepError::InvalidParameter {
                parameter,
                value: as_f64(value),
                reason: "must be >= 0 and finite",
            });
        }
        Ok(())
    }

    /// Validate the short-run removal policy.
    pub fn validate_loners<T: Float>(policy: &LonerPolicy<T>) -> Result<(), PrepError> {
        Self::validate_positive("max_run_ms", policy.max_run_ms)?;
        Self::validate_non_negative("min_separation_ms", policy.min_separation_ms)
    }

    /// Validate the gap expansion policy.
    pub fn validate_gaps<T: Float>(policy: &GapPolicy<T>) -> Result<(), PrepError> {
        let (min, max) = (policy.min_gap_ms, policy.max_gap_ms);
        if !min.is_finite() || !max.is_finite() || min < T::zero() || min >= max {
            return Err(PrepError::InvalidGapBounds {
                min: as_f64(min),
                max: as_f64(max),
            });
        }
        Self::validate_non_negative("pad_back_ms", policy.pad_back_ms)?;
        Self::validate_non_negative("pad_forward_ms", policy.pad_forward_ms)?;
        Self::validate_non_negative("long_gap_ms", policy.long_gap_ms)?;
        Self::validate_positive("long_gap_factor", policy.long_gap_factor)
    }

    /// Validate the dilation-speed policy.
    pub fn validate_speed<T: Float>(policy: &SpeedPolicy<T>) -> Result<(), PrepError> {
        Self::validate_positive("speed_mad_multiplier", policy.mad_multiplier)?;
        Self::validate_positive("speed_max_gap_ms", policy.max_gap_ms)
    }

    /// Validate the baseline-deviation policy.
    pub fn validate_deviation<T: Float>(policy: &DeviationPolicy<T>) -> Result<(), PrepError> {
        Self::validate_positive("deviation_mad_multiplier", policy.mad_multiplier)?;
        Self::validate_positive("interp_rate_hz", policy.interp_rate_hz)?;

        let nyquist = policy.interp_rate_hz / lit(2.0);
        let cutoff = policy.lowpass_cutoff_hz;
        if !cutoff.is_finite() || cutoff <= T::zero() || cutoff >= nyquist {
            return Err(PrepError::InvalidCutoff {
                cutoff: as_f64(cutoff),
                nyquist: as_f64(nyquist),
            });
        }

        if policy.max_passes == 0 {
            return Err(PrepError::InvalidPasses(policy.max_passes));
        }
        Ok(())
    }

    /// Validate the display geometry.
    pub fn validate_geometry<T: Float>(geometry: &DisplayGeometry<T>) -> Result<(), PrepError> {
        Self::validate_positive("width_px", geometry.width_px)?;
        Self::validate_positive("height_px", geometry.height_px)?;
        Self::validate_positive("width_cm", geometry.width_cm)?;
        Self::validate_positive("distance_cm", geometry.distance_cm)
    }

    /// Validate a complete configuration.
    pub fn validate_config<T: Float>(config: &PrepConfig<T>) -> Result<(), PrepError> {
        Self::validate_sampling_rate(config.sampling_rate)?;
        Self::validate_geometry(&config.geometry)?;
        Self::validate_loners(&config.loners)?;
        Self::validate_gaps(&config.gaps)?;
        Self::validate_speed(&config.speed)?;
        Self::validate_deviation(&config.deviation)
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), PrepError> {
        if let Some(param) = duplicate_param {
            return Err(PrepError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
