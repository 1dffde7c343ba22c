//! Tests for short-run removal.
//!
//! These tests verify that short valid runs separated from the preceding
//! retained data are deleted, and that the routine behaves as a projection:
//! - It never adds validity
//! - Applying it twice equals applying it once
//!
//! ## Test Organization
//!
//! 1. **Deletion Rules** - Duration and separation criteria
//! 2. **Degenerate Masks** - Empty, all-invalid, single run
//! 3. **Properties** - Monotonicity and idempotence over pseudo-random masks

use pupilprep::internals::algorithms::loners::{remove_loners, LonerPolicy};

const RATE: f64 = 1000.0;

/// Mask of length `n` that is valid on the given inclusive ranges.
fn mask_from_runs(n: usize, runs: &[(usize, usize)]) -> Vec<bool> {
    let mut mask = vec![false; n];
    for &(start, end) in runs {
        mask[start..=end].fill(true);
    }
    mask
}

/// Deterministic pseudo-random masks with runs of varying length.
fn random_mask(seed: u64, n: usize) -> Vec<bool> {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as usize
    };

    let mut mask = Vec::with_capacity(n);
    let mut valid = next() % 2 == 0;
    while mask.len() < n {
        let len = 1 + next() % 150;
        mask.extend(std::iter::repeat(valid).take(len));
        valid = !valid;
    }
    mask.truncate(n);
    mask
}

// ============================================================================
// Deletion Rule Tests
// ============================================================================

/// Test that a short run far from the preceding run is deleted.
///
/// Run B spans 49 ms and starts 61 ms after run A ends.
#[test]
fn test_short_isolated_run_removed() {
    let mask = mask_from_runs(1000, &[(0, 299), (360, 409), (470, 999)]);
    let out = LonerPolicy::default().apply(&mask, RATE);

    assert_eq!(out, mask_from_runs(1000, &[(0, 299), (470, 999)]));
}

/// Test that a short run close to the preceding run is kept.
#[test]
fn test_short_close_run_kept() {
    let mask = mask_from_runs(1000, &[(0, 299), (320, 349), (600, 999)]);
    let out = LonerPolicy::default().apply(&mask, RATE);

    assert_eq!(out, mask);
}

/// Test that a long run is kept regardless of separation.
#[test]
fn test_long_run_kept() {
    let mask = mask_from_runs(2000, &[(0, 99), (800, 1000)]);
    let out = LonerPolicy::default().apply(&mask, RATE);

    assert_eq!(out, mask);
}

/// Test that the first run is never deleted, however short.
#[test]
fn test_first_run_never_removed() {
    let mask = mask_from_runs(1000, &[(0, 4), (500, 999)]);
    let out = LonerPolicy::default().apply(&mask, RATE);

    assert_eq!(out, mask);
}

/// Test that separation is measured from the last retained run.
///
/// B is deleted; C is 30 ms after B but 90 ms after A, so it goes too.
#[test]
fn test_separation_from_last_kept_run() {
    let mask = mask_from_runs(1000, &[(0, 299), (350, 359), (390, 399), (700, 999)]);
    let out = LonerPolicy::default().apply(&mask, RATE);

    assert_eq!(out, mask_from_runs(1000, &[(0, 299), (700, 999)]));
}

/// Test that durations scale with the sampling rate.
///
/// At 100 Hz the 10-sample run spans 90 ms (deleted); at 50 Hz it spans 180 ms (kept).
#[test]
fn test_rate_dependence() {
    let mask = mask_from_runs(100, &[(0, 29), (40, 49), (80, 99)]);

    let fast = remove_loners(&mask, 100.0, &LonerPolicy::default());
    assert!(fast[40..50].iter().all(|&v| !v));

    let slow = remove_loners(&mask, 50.0, &LonerPolicy::default());
    assert_eq!(slow, mask);
}

// ============================================================================
// Degenerate Mask Tests
// ============================================================================

/// Test empty, all-invalid and single-run masks.
#[test]
fn test_degenerate_masks() {
    let policy = LonerPolicy::<f64>::default();

    assert!(policy.apply(&[], RATE).is_empty());
    assert_eq!(policy.apply(&[false; 50], RATE), vec![false; 50]);
    assert_eq!(policy.apply(&[true; 3], RATE), vec![true; 3]);

    let single = mask_from_runs(100, &[(40, 45)]);
    assert_eq!(policy.apply(&single, RATE), single);
}

/// Test that the input mask is not modified.
#[test]
fn test_input_untouched() {
    let mask = mask_from_runs(1000, &[(0, 299), (360, 409), (470, 999)]);
    let copy = mask.clone();
    let _ = LonerPolicy::default().apply(&mask, RATE);

    assert_eq!(mask, copy);
}

// ============================================================================
// Property Tests
// ============================================================================

/// Test that removal never increases the valid count or adds validity.
#[test]
fn test_monotone_over_random_masks() {
    let policy = LonerPolicy::default();
    for seed in 0..64 {
        let mask = random_mask(seed, 3000);
        let out = policy.apply(&mask, RATE);

        assert_eq!(out.len(), mask.len());
        for (o, m) in out.iter().zip(&mask) {
            assert!(!o || *m, "seed {seed}: validity added");
        }
    }
}

/// Test that applying removal twice equals applying it once.
#[test]
fn test_idempotent_over_random_masks() {
    let policy = LonerPolicy::default();
    for seed in 0..64 {
        for rate in [250.0, 500.0, 1000.0, 1200.0] {
            let once = policy.apply(&random_mask(seed, 3000), rate);
            let twice = policy.apply(&once, rate);
            assert_eq!(once, twice, "seed {seed}, rate {rate}");
        }
    }
}
