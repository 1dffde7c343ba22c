//! Output type of a preprocessing run.
//!
//! ## Purpose
//!
//! This module defines `PrepResult`, which carries the final validity mask,
//! the cleaned channels, their visual-angle versions, and the per-stage
//! diagnostics.
//!
//! ## Invariants
//!
//! * All vectors have the same length as the input timestamps.
//! * Channels are NaN wherever `mask` is false.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations; it only stores results.

// External dependencies
use core::fmt::{Display, Formatter, Result};
use num_traits::Float;

// Internal dependencies
use crate::evaluation::diagnostics::StageDiagnostics;

// ============================================================================
// Result Structure
// ============================================================================

/// Cleaned recording and its validity mask.
#[derive(Debug, Clone, PartialEq)]
pub struct PrepResult<T> {
    /// Sample timestamps (ms).
    pub timestamps: Vec<T>,

    /// Final validity mask.
    pub mask: Vec<bool>,

    /// Cleaned horizontal gaze (pixels).
    pub x: Vec<T>,

    /// Cleaned vertical gaze (pixels).
    pub y: Vec<T>,

    /// Cleaned pupil diameter.
    pub pupil: Vec<T>,

    /// Horizontal gaze in degrees of visual angle.
    pub x_deg: Vec<T>,

    /// Vertical gaze in degrees of visual angle.
    pub y_deg: Vec<T>,

    /// Per-stage counts.
    pub diagnostics: StageDiagnostics,
}

impl<T: Float> PrepResult<T> {
    /// Result of a zero-length recording.
    pub fn empty() -> Self {
        Self {
            timestamps: Vec::new(),
            mask: Vec::new(),
            x: Vec::new(),
            y: Vec::new(),
            pupil: Vec::new(),
            x_deg: Vec::new(),
            y_deg: Vec::new(),
            diagnostics: StageDiagnostics {
                converged: true,
                ..StageDiagnostics::default()
            },
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether the recording was empty.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Number of valid samples.
    pub fn valid_count(&self) -> usize {
        self.diagnostics.valid()
    }

    /// Indices of rejected samples.
    pub fn rejected_indices(&self) -> Vec<usize> {
        self.mask
            .iter()
            .enumerate()
            .filter(|&(_, &valid)| !valid)
            .map(|(i, _)| i)
            .collect()
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display> Display for PrepResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Samples:  {}", self.len())?;
        writeln!(f, "  Valid:    {}", self.valid_count())?;
        writeln!(f)?;
        writeln!(f, "{}", self.diagnostics)?;

        writeln!(f, "Cleaned Data:")?;
        writeln!(
            f,
            "{:>10} {:>6} {:>10} {:>10} {:>12} {:>9} {:>9}",
            "Time_ms", "Valid", "X", "Y", "Pupil", "X_deg", "Y_deg"
        )?;
        writeln!(f, "{:-<72}", "")?;

        // First 10 and last 10 rows when longer than 20
        let n = self.len();
        let rows: Vec<usize> = if n <= 20 {
            (0..n).collect()
        } else {
            (0..10).chain(n - 10..n).collect()
        };

        let mut prev = 0;
        for (i, &idx) in rows.iter().enumerate() {
            if i > 0 && idx != prev + 1 {
                writeln!(f, "{:>10}", "...")?;
            }
            prev = idx;

            writeln!(
                f,
                "{:>10.2} {:>6} {:>10.3} {:>10.3} {:>12.4} {:>9.4} {:>9.4}",
                self.timestamps[idx],
                if self.mask[idx] { "yes" } else { "no" },
                self.x[idx],
                self.y[idx],
                self.pupil[idx],
                self.x_deg[idx],
                self.y_deg[idx]
            )?;
        }

        Ok(())
    }
}
