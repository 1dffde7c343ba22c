//! High-level API for eye-tracking preprocessing.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements a
//! fluent builder for the session configuration (sampling rate, display,
//! rejection policies) that ends in a validated [`Preprocessor`].
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with defaults for every parameter.
//! * **Validated**: The configuration is validated when `.build()` is called.
//! * **Strict**: Setting a parameter twice is reported as an error at `.build()`.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`PreprocessBuilder`] via `Preprocess::new()`.
//! 2. Chain configuration methods (`.sampling_rate()`, `.display()`, etc.).
//! 3. Call `.build()` to get a [`Preprocessor`], then `.run(...)` per recording.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::algorithms::gaps::GapPolicy;
pub use crate::algorithms::loners::LonerPolicy;
pub use crate::engine::executor::{PrepConfig, Preprocessor};
pub use crate::engine::output::PrepResult;
pub use crate::evaluation::diagnostics::{StageCounts, StageDiagnostics};
pub use crate::filters::deviation::{DeviationOutcome, DeviationPolicy};
pub use crate::filters::speed::SpeedPolicy;
pub use crate::math::geometry::DisplayGeometry;
pub use crate::primitives::errors::PrepError;

/// Fluent builder for a preprocessing session.
#[derive(Debug, Clone)]
pub struct PreprocessBuilder<T> {
    /// Sampling rate of the recording (Hz).
    pub sampling_rate: Option<T>,

    /// Display geometry.
    pub geometry: Option<DisplayGeometry<T>>,

    /// Short-run removal policy.
    pub loners: Option<LonerPolicy<T>>,

    /// Gap expansion policy.
    pub gaps: Option<GapPolicy<T>>,

    /// Dilation-speed policy.
    pub speed: Option<SpeedPolicy<T>>,

    /// Baseline-deviation policy.
    pub deviation: Option<DeviationPolicy<T>>,

    /// MAD multiplier shared by the speed and deviation criteria.
    pub mad_multiplier: Option<T>,

    /// Baseline resampling rate (Hz).
    pub interp_rate: Option<T>,

    /// Baseline low-pass cutoff (Hz).
    pub lowpass_cutoff: Option<T>,

    /// Upper bound on baseline passes.
    pub max_passes: Option<usize>,

    /// Whether to detrend the cleaned channels.
    pub detrend: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for PreprocessBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> PreprocessBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            sampling_rate: None,
            geometry: None,
            loners: None,
            gaps: None,
            speed: None,
            deviation: None,
            mad_multiplier: None,
            interp_rate: None,
            lowpass_cutoff: None,
            max_passes: None,
            detrend: None,
            duplicate_param: None,
        }
    }

    /// Set the sampling rate of the recording (Hz).
    pub fn sampling_rate(mut self, rate: T) -> Self {
        if self.sampling_rate.is_some() {
            self.duplicate_param = Some("sampling_rate");
        }
        self.sampling_rate = Some(rate);
        self
    }

    /// Set the display geometry.
    pub fn geometry(mut self, geometry: DisplayGeometry<T>) -> Self {
        if self.geometry.is_some() {
            self.duplicate_param = Some("geometry");
        }
        self.geometry = Some(geometry);
        self
    }

    /// Set the display from resolution (px), physical width and viewing distance (cm).
    pub fn display(self, width_px: T, height_px: T, width_cm: T, distance_cm: T) -> Self {
        self.geometry(DisplayGeometry {
            width_px,
            height_px,
            width_cm,
            distance_cm,
        })
    }

    /// Set the short-run removal policy.
    pub fn loner_policy(mut self, policy: LonerPolicy<T>) -> Self {
        if self.loners.is_some() {
            self.duplicate_param = Some("loner_policy");
        }
        self.loners = Some(policy);
        self
    }

    /// Set the gap expansion policy.
    pub fn gap_policy(mut self, policy: GapPolicy<T>) -> Self {
        if self.gaps.is_some() {
            self.duplicate_param = Some("gap_policy");
        }
        self.gaps = Some(policy);
        self
    }

    /// Set the dilation-speed policy.
    pub fn speed_policy(mut self, policy: SpeedPolicy<T>) -> Self {
        if self.speed.is_some() {
            self.duplicate_param = Some("speed_policy");
        }
        self.speed = Some(policy);
        self
    }

    /// Set the baseline-deviation policy.
    pub fn deviation_policy(mut self, policy: DeviationPolicy<T>) -> Self {
        if self.deviation.is_some() {
            self.duplicate_param = Some("deviation_policy");
        }
        self.deviation = Some(policy);
        self
    }

    /// Set the MAD multiplier of both the speed and the deviation criterion.
    ///
    /// Overrides the multiplier of any policy set with `speed_policy` or
    /// `deviation_policy`.
    pub fn mad_multiplier(mut self, k: T) -> Self {
        if self.mad_multiplier.is_some() {
            self.duplicate_param = Some("mad_multiplier");
        }
        self.mad_multiplier = Some(k);
        self
    }

    /// Set the baseline resampling rate (Hz).
    pub fn interp_rate(mut self, rate: T) -> Self {
        if self.interp_rate.is_some() {
            self.duplicate_param = Some("interp_rate");
        }
        self.interp_rate = Some(rate);
        self
    }

    /// Set the baseline low-pass cutoff (Hz).
    pub fn lowpass_cutoff(mut self, cutoff: T) -> Self {
        if self.lowpass_cutoff.is_some() {
            self.duplicate_param = Some("lowpass_cutoff");
        }
        self.lowpass_cutoff = Some(cutoff);
        self
    }

    /// Set the maximum number of baseline passes.
    pub fn max_passes(mut self, passes: usize) -> Self {
        if self.max_passes.is_some() {
            self.duplicate_param = Some("max_passes");
        }
        self.max_passes = Some(passes);
        self
    }

    /// Enable or disable detrending of the cleaned channels (default: enabled).
    pub fn detrend(mut self, enabled: bool) -> Self {
        if self.detrend.is_some() {
            self.duplicate_param = Some("detrend");
        }
        self.detrend = Some(enabled);
        self
    }

    /// Resolve the configuration without validating it.
    pub fn config(&self) -> PrepConfig<T> {
        let defaults = PrepConfig::default();

        let mut speed = self.speed.unwrap_or(defaults.speed);
        let mut deviation = self.deviation.unwrap_or(defaults.deviation);
        if let Some(k) = self.mad_multiplier {
            speed.mad_multiplier = k;
            deviation.mad_multiplier = k;
        }
        if let Some(rate) = self.interp_rate {
            deviation.interp_rate_hz = rate;
        }
        if let Some(cutoff) = self.lowpass_cutoff {
            deviation.lowpass_cutoff_hz = cutoff;
        }
        if let Some(passes) = self.max_passes {
            deviation.max_passes = passes;
        }

        PrepConfig {
            sampling_rate: self.sampling_rate.unwrap_or(defaults.sampling_rate),
            geometry: self.geometry.unwrap_or(defaults.geometry),
            loners: self.loners.unwrap_or(defaults.loners),
            gaps: self.gaps.unwrap_or(defaults.gaps),
            speed,
            deviation,
            detrend: self.detrend.unwrap_or(defaults.detrend),
        }
    }

    /// Validate the configuration and build a preprocessor.
    pub fn build(self) -> Result<Preprocessor<T>, PrepError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;
        Preprocessor::from_config(self.config())
    }
}
