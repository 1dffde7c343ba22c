//! Resampling grids and one-dimensional interpolation.
//!
//! ## Purpose
//!
//! The baseline filter moves the valid pupil samples onto a uniform grid,
//! smooths them there, and brings the smooth curve back to the original
//! timestamps. This module provides the grid and the two interpolants used
//! for that round trip.
//!
//! ## Design notes
//!
//! * **Linear**: Defined only on `[xp[0], xp[n−1]]`; NaN outside.
//! * **Nearest**: Defined everywhere; extrapolates with the closest end value.
//!   Ties at a midpoint resolve to the lower neighbour.
//! * **Lookup**: Binary search (`partition_point`), so query points need not be sorted.
//!
//! ## Invariants
//!
//! * `xp` must be sorted in strictly increasing order.
//! * Output length equals the number of query points.
//!
//! ## Non-goals
//!
//! * This module does not sort its inputs.
//! * This module does not provide higher-order interpolation.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::numeric::{lit, samples_to_ms};

// ============================================================================
// Grid
// ============================================================================

/// Uniform time grid (ms) from `start` covering `end`, at `rate_hz`.
///
/// The last grid point is the first one at or beyond `end`, so the grid
/// spans the full timestamp range.
pub fn uniform_grid<T: Float>(start: T, end: T, rate_hz: T) -> Vec<T> {
    let step = lit::<T>(1000.0) / rate_hz;
    if !(end >= start) || !step.is_finite() || step <= T::zero() {
        return vec![start];
    }

    let at = |k: usize| start + T::from(k).unwrap_or_else(T::nan) * step;
    let steps = ((end - start) / step).ceil().to_usize().unwrap_or(0);
    let mut grid: Vec<T> = (0..=steps).map(&at).collect();

    // `start + steps·step` can round to just below `end`
    if matches!(grid.last(), Some(&last) if last < end) {
        grid.push(at(steps + 1));
    }
    grid
}

/// Timestamps (ms) of `n` samples taken at `sampling_rate`, starting at 0.
pub fn uniform_timestamps<T: Float>(n: usize, sampling_rate: T) -> Vec<T> {
    (0..n).map(|i| samples_to_ms(i, sampling_rate)).collect()
}

// ============================================================================
// Interpolants
// ============================================================================

/// Piecewise-linear interpolation; NaN outside the range of `xp`.
pub fn interp_linear<T: Float>(xp: &[T], fp: &[T], x: &[T]) -> Vec<T> {
    x.iter().map(|&xi| linear_at(xp, fp, xi)).collect()
}

/// Nearest-neighbour interpolation with constant extrapolation.
pub fn interp_nearest<T: Float>(xp: &[T], fp: &[T], x: &[T]) -> Vec<T> {
    x.iter().map(|&xi| nearest_at(xp, fp, xi)).collect()
}

/// Linear interpolation, with points outside the range filled by nearest extrapolation.
pub fn interp_linear_extrapolate<T: Float>(xp: &[T], fp: &[T], x: &[T]) -> Vec<T> {
    x.iter()
        .map(|&xi| {
            let v = linear_at(xp, fp, xi);
            if v.is_nan() {
                nearest_at(xp, fp, xi)
            } else {
                v
            }
        })
        .collect()
}

fn linear_at<T: Float>(xp: &[T], fp: &[T], xi: T) -> T {
    let n = xp.len();
    if n == 0 || xi.is_nan() || xi < xp[0] || xi > xp[n - 1] {
        return T::nan();
    }

    // First index with xp[j] >= xi
    let j = xp.partition_point(|&v| v < xi);
    if xp[j] == xi {
        return fp[j];
    }

    let (x0, x1) = (xp[j - 1], xp[j]);
    let (y0, y1) = (fp[j - 1], fp[j]);
    y0 + (xi - x0) * (y1 - y0) / (x1 - x0)
}

fn nearest_at<T: Float>(xp: &[T], fp: &[T], xi: T) -> T {
    let n = xp.len();
    if n == 0 || xi.is_nan() {
        return T::nan();
    }

    let j = xp.partition_point(|&v| v < xi);
    if j == 0 {
        return fp[0];
    }
    if j == n {
        return fp[n - 1];
    }

    if xi - xp[j - 1] <= xp[j] - xi {
        fp[j - 1]
    } else {
        fp[j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_is_exact_on_knots() {
        let xp = [0.0f64, 10.0, 20.0];
        let fp = [1.0, 3.0, 2.0];
        assert_eq!(interp_linear(&xp, &fp, &[0.0, 10.0, 20.0]), vec![1.0, 3.0, 2.0]);
    }
}
