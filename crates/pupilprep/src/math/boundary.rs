//! Boundary extension for zero-phase filtering.
//!
//! ## Purpose
//!
//! A recursive filter run from rest produces a transient at each end of the
//! signal. Extending the signal by an odd-symmetric reflection about its end
//! points before filtering moves that transient into padding that is
//! discarded afterwards.
//!
//! ## Key concepts
//!
//! * **Odd extension**: `x[-k] = 2·x[0] − x[k]` and `x[n−1+k] = 2·x[n−1] − x[n−1−k]`.
//!   Slope and level are continuous across the boundary.
//!
//! ## Invariants
//!
//! * Padding length is limited to `n − 1`.
//! * Original data is preserved in the middle of the padded range.
//!
//! ## Non-goals
//!
//! * This module does not perform in-place modification of input data.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::numeric::lit;

// ============================================================================
// Odd Extension
// ============================================================================

/// Extend `x` by an odd reflection of `pad` samples at each end.
///
/// Returns the padded signal and the pad length actually applied (clamped to
/// `n − 1`).
pub fn odd_extension<T: Float>(x: &[T], pad: usize) -> (Vec<T>, usize) {
    let n = x.len();
    if n < 2 {
        return (x.to_vec(), 0);
    }

    let pad = pad.min(n - 1);
    let two = lit::<T>(2.0);
    let first = x[0];
    let last = x[n - 1];

    let mut out = Vec::with_capacity(n + 2 * pad);

    // Leading: 2·x[0] − x[pad], ..., 2·x[0] − x[1]
    for k in (1..=pad).rev() {
        out.push(two * first - x[k]);
    }

    out.extend_from_slice(x);

    // Trailing: 2·x[n−1] − x[n−2], ..., 2·x[n−1] − x[n−1−pad]
    for k in 1..=pad {
        out.push(two * last - x[n - 1 - k]);
    }

    (out, pad)
}
