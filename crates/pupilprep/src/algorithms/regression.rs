//! Linear trend estimation and removal.
//!
//! ## Purpose
//!
//! The final cleaned channels are detrended: an ordinary least-squares line
//! `value = slope·index + intercept` is fitted to the valid samples and
//! subtracted from every index.
//!
//! ## Invariants
//!
//! * Only samples that are valid in the mask and finite enter the fit.
//! * Invalid samples are NaN in the output whether or not detrending runs.
//! * Output length equals input length.

// External dependencies
use num_traits::Float;
use tracing::warn;

// ============================================================================
// LinearFit
// ============================================================================

/// Linear regression fit result (slope and intercept).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit<T> {
    /// Slope (beta_1)
    pub slope: T,

    /// Intercept (beta_0)
    pub intercept: T,
}

impl<T: Float> LinearFit<T> {
    /// Predict the value at `x`.
    #[inline]
    pub fn predict(&self, x: T) -> T {
        self.intercept + self.slope * x
    }

    /// Fit OLS over the `(x, y)` pairs; `None` with fewer than two distinct x-values.
    pub fn fit_ols<I>(pairs: I) -> Option<Self>
    where
        I: IntoIterator<Item = (T, T)> + Clone,
    {
        let mut n = T::zero();
        let mut sum_x = T::zero();
        let mut sum_y = T::zero();
        for (x, y) in pairs.clone() {
            n = n + T::one();
            sum_x = sum_x + x;
            sum_y = sum_y + y;
        }
        if n < T::one() + T::one() {
            return None;
        }

        let x_mean = sum_x / n;
        let y_mean = sum_y / n;

        // Centred sums for numerical stability
        let mut sxx = T::zero();
        let mut sxy = T::zero();
        for (x, y) in pairs {
            let dx = x - x_mean;
            sxx = sxx + dx * dx;
            sxy = sxy + dx * (y - y_mean);
        }
        if sxx <= T::zero() {
            return None;
        }

        let slope = sxy / sxx;
        Some(Self {
            slope,
            intercept: y_mean - slope * x_mean,
        })
    }
}

// ============================================================================
// Detrending
// ============================================================================

/// Set invalid samples to NaN and, if requested, subtract the OLS trend over sample index.
pub fn remove_invalid_detrend<T: Float>(series: &[T], mask: &[bool], detrend: bool) -> Vec<T> {
    let masked: Vec<T> = series
        .iter()
        .zip(mask)
        .map(|(&v, &valid)| if valid { v } else { T::nan() })
        .collect();

    if !detrend {
        return masked;
    }

    let points = masked
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, &v)| (T::from(i).unwrap_or_else(T::nan), v));

    let Some(fit) = LinearFit::fit_ols(points) else {
        warn!("fewer than two valid samples, skipping detrend");
        return masked;
    };

    masked
        .iter()
        .enumerate()
        .map(|(i, &v)| v - fit.predict(T::from(i).unwrap_or_else(T::nan)))
        .collect()
}
