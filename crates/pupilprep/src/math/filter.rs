//! First-order Butterworth low-pass filter with zero-phase application.
//!
//! ## Purpose
//!
//! The baseline-deviation filter smooths a uniformly resampled pupil trace
//! with a first-order Butterworth low-pass, run forward and backward so the
//! baseline has no phase lag relative to the samples it is compared with.
//!
//! ## Design notes
//!
//! * **Design**: Bilinear transform with frequency pre-warping,
//!   `ω = tan(π·Wn/2)` where `Wn` is the cutoff normalised to Nyquist.
//! * **Structure**: Transposed direct form II, one state variable.
//! * **Edges**: Odd extension of `3·max(len(a), len(b))` samples and
//!   steady-state initial conditions scaled by the first sample of each pass,
//!   so a constant input passes through exactly.
//!
//! ## Invariants
//!
//! * DC gain is exactly 1.
//! * Output length equals input length.

// External dependencies
use core::f64::consts::PI;
use num_traits::Float;

// Internal dependencies
use crate::math::boundary::odd_extension;
use crate::primitives::numeric::lit;

// ============================================================================
// Filter Design
// ============================================================================

/// First-order Butterworth low-pass filter coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirstOrderLowpass<T> {
    /// Numerator coefficients `[b0, b1]`.
    pub b: [T; 2],

    /// Denominator coefficients `[1, a1]`.
    pub a: [T; 2],
}

impl<T: Float> FirstOrderLowpass<T> {
    /// Design the filter for a cutoff (Hz) at a sampling rate (Hz).
    ///
    /// The caller guarantees `0 < cutoff_hz < sample_rate_hz / 2`.
    pub fn new(cutoff_hz: T, sample_rate_hz: T) -> Self {
        let wn = cutoff_hz / (sample_rate_hz / lit(2.0));
        let omega = (lit::<T>(PI) * wn / lit(2.0)).tan();
        let one = T::one();

        let k = omega / (one + omega);
        Self {
            b: [k, k],
            a: [one, (omega - one) / (omega + one)],
        }
    }

    /// Pad length used by [`filtfilt`](Self::filtfilt).
    pub const PAD: usize = 6;

    // State that makes a unit step input a fixed point.
    fn steady_state(&self) -> T {
        let [b0, b1] = self.b;
        let a1 = self.a[1];
        (b1 - a1 * b0) / (T::one() + a1)
    }

    // ========================================================================
    // Application
    // ========================================================================

    /// Run the filter once over `x` with initial state `z0`.
    pub fn lfilter(&self, x: &[T], z0: T) -> Vec<T> {
        let [b0, b1] = self.b;
        let a1 = self.a[1];
        let mut z = z0;

        x.iter()
            .map(|&xn| {
                let yn = b0 * xn + z;
                z = b1 * xn - a1 * yn;
                yn
            })
            .collect()
    }

    /// Zero-phase forward-backward filtering.
    pub fn filtfilt(&self, x: &[T]) -> Vec<T> {
        if x.len() < 2 {
            return x.to_vec();
        }

        let (ext, pad) = odd_extension(x, Self::PAD);
        let zi = self.steady_state();

        let mut y = self.lfilter(&ext, zi * ext[0]);
        y.reverse();
        let mut y = self.lfilter(&y, zi * y[0]);
        y.reverse();

        y[pad..pad + x.len()].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_passes_through_exactly() {
        let filter = FirstOrderLowpass::new(16.0f64, 100.0);
        let out = filter.filtfilt(&[1000.0; 50]);
        for v in out {
            assert!((v - 1000.0).abs() < 1e-9);
        }
    }

    #[test]
    fn coefficients_match_bilinear_design() {
        // Wn = 0.32 -> omega = tan(0.16 * pi)
        let filter = FirstOrderLowpass::new(16.0f64, 100.0);
        let omega = (0.16 * PI).tan();
        assert!((filter.b[0] - omega / (1.0 + omega)).abs() < 1e-12);
        assert!((filter.a[1] - (omega - 1.0) / (omega + 1.0)).abs() < 1e-12);
        // Unit DC gain
        let dc = (filter.b[0] + filter.b[1]) / (filter.a[0] + filter.a[1]);
        assert!((dc - 1.0).abs() < 1e-12);
    }
}
