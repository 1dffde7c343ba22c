//! Geometric validity: reject gaze samples that fall off the display.
//!
//! ## Purpose
//!
//! The first stage of the pipeline. A sample is trustworthy only if its
//! centred gaze position lies strictly inside the display rectangle. Missing
//! (NaN) coordinates are off-screen.
//!
//! ## Design notes
//!
//! * When no sample survives, the all-invalid mask is still passed through
//!   short-run removal and gap expansion. Neither can add validity, so this
//!   normalisation is a no-op kept for parity with the other stages.

// External dependencies
use num_traits::Float;
use tracing::warn;

// Internal dependencies
use crate::filters::cleanup::MaskCleaner;
use crate::math::geometry::DisplayGeometry;

/// Stage that keeps on-screen gaze samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsFilter<T> {
    /// Display the gaze coordinates refer to.
    pub geometry: DisplayGeometry<T>,
}

impl<T: Float> BoundsFilter<T> {
    /// Create a filter for the given display.
    pub fn new(geometry: DisplayGeometry<T>) -> Self {
        Self { geometry }
    }

    /// Validity mask of on-screen samples.
    pub fn apply(&self, timestamps: &[T], x: &[T], y: &[T], cleaner: &MaskCleaner<T>) -> Vec<bool> {
        let mask: Vec<bool> = x
            .iter()
            .zip(y)
            .map(|(&xi, &yi)| self.geometry.contains(xi, yi))
            .collect();

        if mask.iter().any(|&v| v) {
            return mask;
        }

        if !mask.is_empty() {
            warn!(samples = mask.len(), "no gaze sample falls on the display");
        }
        let mask = cleaner.remove_loners(&mask);
        cleaner.expand_gaps(timestamps, &mask)
    }
}
