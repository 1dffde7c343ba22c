//! Error types for preprocessing operations.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while configuring
//! or running the preprocessing pipeline. Only domain-invalid configuration
//! and misaligned input are errors; degenerate data (empty masks, constant
//! signals, zero-length series) is handled by fallback policy instead.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include the offending values (lengths, indices, parameters).
//! * **Deferred**: Duplicate builder parameters are recorded and reported at `build()`.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error`.
//!
//! ## Invariants
//!
//! * All variants provide sufficient context for diagnosis.
//! * Numeric values are reported as `f64` regardless of the working float type.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery.

// External dependencies
use std::error::Error;
use std::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for preprocessing operations.
#[derive(Debug, Clone, PartialEq)]
pub enum PrepError {
    /// A channel does not have the same number of samples as the timestamps.
    MismatchedLengths {
        /// Name of the offending series.
        name: &'static str,
        /// Expected number of samples (timestamp count).
        expected: usize,
        /// Number of samples provided.
        got: usize,
    },

    /// Sampling rate must be positive and finite.
    InvalidSamplingRate(f64),

    /// Timestamps must be finite and strictly increasing.
    NonMonotonicTimestamps {
        /// First index whose timestamp is not greater than its predecessor.
        index: usize,
    },

    /// Generic non-finite value where a finite one is required.
    InvalidNumericValue(String),

    /// A policy constant is outside its admissible range.
    InvalidParameter {
        /// Name of the parameter.
        parameter: &'static str,
        /// The value provided.
        value: f64,
        /// Human-readable constraint.
        reason: &'static str,
    },

    /// Gap bounds must satisfy `0 <= min < max`.
    InvalidGapBounds {
        /// Lower bound in milliseconds.
        min: f64,
        /// Upper bound in milliseconds.
        max: f64,
    },

    /// Low-pass cutoff must lie strictly between 0 and the Nyquist frequency.
    InvalidCutoff {
        /// Requested cutoff in Hz.
        cutoff: f64,
        /// Nyquist frequency of the resampling grid in Hz.
        nyquist: f64,
    },

    /// The baseline filter needs at least one pass.
    InvalidPasses(usize),

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for PrepError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::MismatchedLengths {
                name,
                expected,
                got,
            } => {
                write!(
                    f,
                    "Length mismatch: {name} has {got} samples, timestamps have {expected}"
                )
            }
            Self::InvalidSamplingRate(rate) => {
                write!(f, "Invalid sampling rate: {rate} Hz (must be > 0 and finite)")
            }
            Self::NonMonotonicTimestamps { index } => {
                write!(
                    f,
                    "Timestamps must be finite and strictly increasing (violated at index {index})"
                )
            }
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid {parameter}: {value} ({reason})")
            }
            Self::InvalidGapBounds { min, max } => {
                write!(
                    f,
                    "Invalid gap bounds: [{min}, {max}] ms (must satisfy 0 <= min < max)"
                )
            }
            Self::InvalidCutoff { cutoff, nyquist } => {
                write!(
                    f,
                    "Invalid low-pass cutoff: {cutoff} Hz (must be > 0 and < Nyquist {nyquist} Hz)"
                )
            }
            Self::InvalidPasses(passes) => {
                write!(f, "Invalid number of passes: {passes} (must be at least 1)")
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

impl Error for PrepError {}
