//! Per-stage bookkeeping for a pipeline run.
//!
//! ## Purpose
//!
//! Records how many samples each validity criterion removed, how many
//! baseline passes ran, and whether the baseline loop converged. The counts
//! are a side channel for logging and reporting; nothing downstream depends
//! on them for correctness.
//!
//! ## Invariants
//!
//! * Valid counts never increase from one stage to the next.
//! * `total` is the number of samples in the recording.
//!
//! ## Non-goals
//!
//! * This module does not decide validity.
//! * This module does not track which individual samples were removed.

// External dependencies
use core::fmt::{Display, Formatter, Result};

// Internal dependencies
use crate::primitives::numeric::count_valid;

// ============================================================================
// Stage Counts
// ============================================================================

/// Valid-sample counts entering and leaving one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageCounts {
    /// Valid samples in the incoming mask.
    pub before: usize,

    /// Valid samples in the outgoing mask.
    pub after: usize,
}

impl StageCounts {
    /// Counts from the masks on either side of a stage.
    pub fn between(before: &[bool], after: &[bool]) -> Self {
        Self {
            before: count_valid(before),
            after: count_valid(after),
        }
    }

    /// Number of samples the stage invalidated.
    #[inline]
    pub fn removed(&self) -> usize {
        self.before.saturating_sub(self.after)
    }
}

// ============================================================================
// Diagnostics Structure
// ============================================================================

/// Summary of one preprocessing run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageDiagnostics {
    /// Number of samples in the recording.
    pub total: usize,

    /// Geometric (on-screen) stage. `before` is the sample count.
    pub bounds: StageCounts,

    /// Dilation-speed stage.
    pub speed: StageCounts,

    /// Baseline-deviation stage.
    pub deviation: StageCounts,

    /// Baseline passes run.
    pub deviation_passes: usize,

    /// Whether the baseline loop stopped on an unchanged mask.
    pub converged: bool,
}

impl StageDiagnostics {
    /// Samples valid after the last stage.
    pub fn valid(&self) -> usize {
        self.deviation.after
    }

    /// Samples rejected by any stage.
    pub fn rejected(&self) -> usize {
        self.total.saturating_sub(self.valid())
    }

    /// Fraction of samples kept, or 0 for an empty recording.
    pub fn valid_fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.valid() as f64 / self.total as f64
        }
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for StageDiagnostics {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Stage Diagnostics:")?;
        writeln!(f, "  {:<10} {:>10} {:>10} {:>10}", "Stage", "Before", "After", "Removed")?;
        for (name, counts) in [
            ("Bounds", &self.bounds),
            ("Speed", &self.speed),
            ("Deviation", &self.deviation),
        ] {
            writeln!(
                f,
                "  {:<10} {:>10} {:>10} {:>10}",
                name,
                counts.before,
                counts.after,
                counts.removed()
            )?;
        }
        writeln!(
            f,
            "  Baseline passes: {} ({})",
            self.deviation_passes,
            if self.converged { "converged" } else { "pass budget exhausted" }
        )?;
        writeln!(
            f,
            "  Valid:           {} / {} ({:.1}%)",
            self.valid(),
            self.total,
            self.valid_fraction() * 100.0
        )
    }
}
