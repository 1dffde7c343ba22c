//! Display geometry and visual-angle conversion.
//!
//! ## Purpose
//!
//! Gaze samples are recorded in screen pixels with the origin at the screen
//! centre. This module describes the display (pixel resolution, physical
//! width, viewing distance), decides whether a gaze sample lies on the
//! display, and converts pixel extents into degrees of visual angle.
//!
//! ## Key concepts
//!
//! * **On-screen**: `|x| < width/2` and `|y| < height/2` (strict).
//! * **Visual angle**: `2·atan(size_cm / (2·distance_cm))`, in degrees, with
//!   `size_cm = size_px · width_cm / width_px`.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::numeric::lit;

// ============================================================================
// Display Geometry
// ============================================================================

/// Physical and pixel geometry of the stimulus display.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayGeometry<T> {
    /// Horizontal resolution in pixels.
    pub width_px: T,

    /// Vertical resolution in pixels.
    pub height_px: T,

    /// Physical screen width in centimetres.
    pub width_cm: T,

    /// Eye-to-screen distance in centimetres.
    pub distance_cm: T,
}

impl<T: Float> Default for DisplayGeometry<T> {
    fn default() -> Self {
        Self {
            width_px: lit(1024.0),
            height_px: lit(768.0),
            width_cm: lit(42.0),
            distance_cm: lit(75.0),
        }
    }
}

impl<T: Float> DisplayGeometry<T> {
    /// Whether a centred gaze position falls strictly inside the display.
    ///
    /// NaN coordinates are never inside.
    #[inline]
    pub fn contains(&self, x: T, y: T) -> bool {
        let two = lit::<T>(2.0);
        x.abs() < self.width_px / two && y.abs() < self.height_px / two
    }

    /// Pixels per centimetre along the horizontal axis.
    #[inline]
    pub fn pixels_per_cm(&self) -> T {
        self.width_px / self.width_cm
    }

    /// Convert a pixel extent to degrees of visual angle.
    pub fn pixels_to_degrees(&self, size_px: T) -> T {
        let size_cm = size_px / self.pixels_per_cm();
        let two = lit::<T>(2.0);
        (two * (size_cm / (two * self.distance_cm)).atan()).to_degrees()
    }

    /// Convert every value of a series; NaN stays NaN.
    pub fn series_to_degrees(&self, series: &[T]) -> Vec<T> {
        series.iter().map(|&v| self.pixels_to_degrees(v)).collect()
    }
}
