//! Float literal conversion and time-unit helpers.
//!
//! Policy constants are written in `f64` and converted to the working float
//! type at use sites. Sample counts and milliseconds are related through the
//! sampling rate only.

// External dependencies
use num_traits::Float;

/// Convert an `f64` literal into the working float type (NaN if unrepresentable).
#[inline]
pub fn lit<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

/// Convert a sample count (or index distance) into milliseconds.
#[inline]
pub fn samples_to_ms<T: Float>(samples: usize, sampling_rate: T) -> T {
    let n: T = T::from(samples).unwrap_or_else(T::nan);
    n / sampling_rate * lit(1000.0)
}

/// Count `true` entries of a mask.
#[inline]
pub fn count_valid(mask: &[bool]) -> usize {
    mask.iter().filter(|&&v| v).count()
}
