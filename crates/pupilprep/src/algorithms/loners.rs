//! Short-run removal ("loners").
//!
//! ## Purpose
//!
//! After a criterion invalidates samples, short islands of valid data often
//! remain stranded between gaps. Such islands are too brief to be trusted on
//! their own. This module deletes valid runs that are both short and isolated
//! from the preceding valid data by a wide gap.
//!
//! ## Key concepts
//!
//! * **Run duration**: `(last − first) / rate · 1000` ms.
//! * **Separation**: index distance from the end of the last surviving run to
//!   the start of this run, in ms.
//! * **Deletion**: duration `< max_run_ms` AND separation `> min_separation_ms`.
//!
//! ## Invariants
//!
//! * The first valid run is never deleted.
//! * Output only turns `true` into `false`.
//! * Separation is measured from the last surviving run, so the result is a
//!   fixed point: applying the routine again removes nothing.
//!
//! ## Non-goals
//!
//! * This module does not look at timestamps; the series is assumed to be
//!   uniformly sampled at the given rate.

// External dependencies
use num_traits::Float;
use tracing::debug;

// Internal dependencies
use crate::primitives::numeric::{count_valid, lit, samples_to_ms};
use crate::primitives::runs::valid_runs;

// ============================================================================
// Policy
// ============================================================================

/// Policy for deleting short isolated valid runs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LonerPolicy<T> {
    /// Runs shorter than this (ms) are candidates for deletion.
    pub max_run_ms: T,

    /// Candidates separated from preceding data by more than this (ms) are deleted.
    pub min_separation_ms: T,
}

impl<T: Float> Default for LonerPolicy<T> {
    fn default() -> Self {
        Self {
            max_run_ms: lit(100.0),
            min_separation_ms: lit(40.0),
        }
    }
}

// ============================================================================
// Removal
// ============================================================================

impl<T: Float> LonerPolicy<T> {
    /// Return a copy of `mask` with short isolated runs set to `false`.
    pub fn apply(&self, mask: &[bool], sampling_rate: T) -> Vec<bool> {
        let mut out = mask.to_vec();
        let runs = valid_runs(mask);

        let Some((first, rest)) = runs.split_first() else {
            return out;
        };

        let mut last_kept = *first;
        for run in rest {
            let duration = samples_to_ms(run.span(), sampling_rate);
            let separation = samples_to_ms(last_kept.distance_to(run), sampling_rate);

            if duration < self.max_run_ms && separation > self.min_separation_ms {
                out[run.start..=run.end].fill(false);
            } else {
                last_kept = *run;
            }
        }

        debug!(
            removed = count_valid(mask) - count_valid(&out),
            "short-run removal"
        );
        out
    }
}

/// Delete short isolated runs using `policy`.
pub fn remove_loners<T: Float>(
    mask: &[bool],
    sampling_rate: T,
    policy: &LonerPolicy<T>,
) -> Vec<bool> {
    policy.apply(mask, sampling_rate)
}
