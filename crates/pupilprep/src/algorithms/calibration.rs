//! Analog calibration and recording hygiene before masking.
//!
//! ## Purpose
//!
//! Eye trackers that feed an acquisition system through analog lines deliver
//! gaze as voltages and write zeros after an aborted run. This module turns
//! voltages into centred screen pixels and locates the point where a run was
//! terminated, so the masking pipeline receives pixel-space channels of the
//! true recording length.
//!
//! ## Key concepts
//!
//! * **Voltage mapping**: `s = (v − v_min)/(v_max − v_min)·(r_max − r_min) + r_min`,
//!   then `px = s·(far − near + 1) + near` per axis.
//! * **Centering**: Move the origin to the screen centre, then subtract the
//!   median of each channel to reduce drift over the session.
//! * **Termination**: The first stretch of `run_len` exact zeros in the pupil
//!   channel marks an aborted recording.
//!
//! ## Non-goals
//!
//! * This module does not read device formats or select channels.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::geometry::DisplayGeometry;
use crate::math::scaling::nan_median;
use crate::primitives::numeric::lit;

// ============================================================================
// Voltage Calibration
// ============================================================================

/// Linear voltage-to-pixel mapping of the analog gaze outputs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoltageCalibration<T> {
    /// Voltage at the bottom of the output range.
    pub min_voltage: T,

    /// Voltage at the top of the output range.
    pub max_voltage: T,

    /// Normalised screen coordinate at `min_voltage`.
    pub min_range: T,

    /// Normalised screen coordinate at `max_voltage`.
    pub max_range: T,

    /// Pixel column of the left screen edge.
    pub screen_left: T,

    /// Pixel column of the right screen edge.
    pub screen_right: T,

    /// Pixel row of the top screen edge.
    pub screen_top: T,

    /// Pixel row of the bottom screen edge.
    pub screen_bottom: T,
}

impl<T: Float> Default for VoltageCalibration<T> {
    fn default() -> Self {
        Self {
            min_voltage: lit(-5.0),
            max_voltage: lit(5.0),
            min_range: lit(-0.2),
            max_range: lit(1.2),
            screen_left: T::zero(),
            screen_right: lit(1023.0),
            screen_top: T::zero(),
            screen_bottom: lit(767.0),
        }
    }
}

impl<T: Float> VoltageCalibration<T> {
    fn normalise(&self, v: T) -> T {
        (v - self.min_voltage) / (self.max_voltage - self.min_voltage)
            * (self.max_range - self.min_range)
            + self.min_range
    }

    /// Horizontal pixel position for a voltage.
    pub fn x_pixels(&self, volts: T) -> T {
        self.normalise(volts) * (self.screen_right - self.screen_left + T::one()) + self.screen_left
    }

    /// Vertical pixel position for a voltage.
    pub fn y_pixels(&self, volts: T) -> T {
        self.normalise(volts) * (self.screen_bottom - self.screen_top + T::one()) + self.screen_top
    }

    /// Convert both gaze channels from volts to screen pixels.
    pub fn to_pixels(&self, x_volts: &[T], y_volts: &[T]) -> (Vec<T>, Vec<T>) {
        (
            x_volts.iter().map(|&v| self.x_pixels(v)).collect(),
            y_volts.iter().map(|&v| self.y_pixels(v)).collect(),
        )
    }
}

// ============================================================================
// Centering
// ============================================================================

/// Subtract the NaN-ignoring median of the series.
pub fn center_on_median<T: Float>(series: &[T]) -> Vec<T> {
    let median = nan_median(series).unwrap_or_else(T::zero);
    series.iter().map(|&v| v - median).collect()
}

/// Move the origin to the screen centre, then median-centre each axis.
pub fn center_gaze<T: Float>(x: &[T], y: &[T], geometry: &DisplayGeometry<T>) -> (Vec<T>, Vec<T>) {
    let two = lit::<T>(2.0);
    let x_shift: Vec<T> = x.iter().map(|&v| v - geometry.width_px / two).collect();
    let y_shift: Vec<T> = y.iter().map(|&v| v - geometry.height_px / two).collect();
    (center_on_median(&x_shift), center_on_median(&y_shift))
}

// ============================================================================
// Termination
// ============================================================================

/// Default number of consecutive zero pupil samples marking an abort.
pub const TERMINATION_RUN: usize = 20;

/// First index where `run_len` consecutive exact-zero pupil samples begin.
pub fn find_termination<T: Float>(pupil: &[T], run_len: usize) -> Option<usize> {
    if run_len == 0 {
        return None;
    }

    let mut streak = 0;
    for (i, &v) in pupil.iter().enumerate() {
        if v == T::zero() {
            streak += 1;
            if streak == run_len {
                return Some(i + 1 - run_len);
            }
        } else {
            streak = 0;
        }
    }
    None
}

/// Truncate every channel at the termination point, if one exists.
pub fn crop_at_termination<T: Float>(
    channels: &[&[T]],
    pupil: &[T],
    run_len: usize,
) -> Vec<Vec<T>> {
    let end = find_termination(pupil, run_len).unwrap_or(pupil.len());
    channels
        .iter()
        .map(|c| c[..end.min(c.len())].to_vec())
        .collect()
}
