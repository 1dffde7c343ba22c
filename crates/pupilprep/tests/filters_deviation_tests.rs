//! Tests for the iterative baseline-deviation criterion.
//!
//! These tests verify:
//! - Baseline estimation through resampling and zero-phase smoothing
//! - Rejection of outliers against the baseline
//! - Readmission of samples once outliers stop distorting the baseline
//! - Convergence and the pass budget
//!
//! ## Test Organization
//!
//! 1. **Baseline** - Residuals of clean signals
//! 2. **Outliers** - Sinusoid with sparse large outliers
//! 3. **Iteration** - Convergence and pass limits
//! 4. **Degenerate Input** - Empty, constant and all-invalid

use approx::assert_abs_diff_eq;

use pupilprep::internals::algorithms::interpolation::uniform_grid;
use pupilprep::internals::filters::cleanup::MaskCleaner;
use pupilprep::internals::filters::deviation::DeviationPolicy;
use pupilprep::internals::math::filter::FirstOrderLowpass;

/// Uniform noise in [-amplitude, amplitude) from a fixed seed.
fn noise(seed: u64, n: usize, amplitude: f64) -> Vec<f64> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let u = (state >> 11) as f64 / (1u64 << 53) as f64;
            (u - 0.5) * 2.0 * amplitude
        })
        .collect()
}

/// 20 s at 100 Hz: a 0.5 Hz sinusoid with small noise and +500 outliers
/// on every 20th sample, away from the last 200 ms.
fn sinusoid_with_outliers(seed: u64) -> (Vec<f64>, Vec<f64>, Vec<usize>) {
    let n = 2000;
    let t: Vec<f64> = (0..n).map(|i| i as f64 * 10.0).collect();
    let jitter = noise(seed, n, 2.0);
    let mut d: Vec<f64> = t
        .iter()
        .zip(&jitter)
        .map(|(&ti, &e)| 1000.0 + 50.0 * (2.0 * std::f64::consts::PI * 0.5 * ti / 1000.0).sin() + e)
        .collect();

    let outliers: Vec<usize> = (10..1980).step_by(20).collect();
    for &i in &outliers {
        d[i] += 500.0;
    }
    (t, d, outliers)
}

// ============================================================================
// Baseline Tests
// ============================================================================

/// Test that a slow clean signal has near-zero residuals.
#[test]
fn test_clean_signal_residuals_small() {
    let n = 1000;
    let t: Vec<f64> = (0..n).map(|i| i as f64 * 10.0).collect();
    let d: Vec<f64> = t.iter().map(|&ti| 500.0 + 20.0 * (ti / 2000.0).sin()).collect();

    let policy = DeviationPolicy::default();
    let grid = uniform_grid(t[0], t[n - 1], policy.interp_rate_hz);
    let lowpass = FirstOrderLowpass::new(policy.lowpass_cutoff_hz, policy.interp_rate_hz);
    let dev = policy.deviation(&t, &d, &vec![true; n], &grid, &lowpass);

    for i in 0..n {
        assert_abs_diff_eq!(dev.residuals[i], 0.0, epsilon = 0.05);
        assert_abs_diff_eq!(dev.baseline[i], d[i], epsilon = 0.05);
    }
}

/// Test that masked samples do not enter the baseline.
#[test]
fn test_baseline_ignores_masked_samples() {
    let n = 500;
    let t: Vec<f64> = (0..n).map(|i| i as f64 * 10.0).collect();
    let mut d = vec![100.0; n];
    let mut mask = vec![true; n];
    for i in 200..210 {
        d[i] = 10_000.0;
        mask[i] = false;
    }

    let policy = DeviationPolicy::default();
    let grid = uniform_grid(t[0], t[n - 1], policy.interp_rate_hz);
    let lowpass = FirstOrderLowpass::new(policy.lowpass_cutoff_hz, policy.interp_rate_hz);
    let dev = policy.deviation(&t, &d, &mask, &grid, &lowpass);

    for &b in &dev.baseline {
        assert_abs_diff_eq!(b, 100.0, epsilon = 1e-9);
    }
    assert_abs_diff_eq!(dev.residuals[205], 9900.0, epsilon = 1e-6);
}

// ============================================================================
// Outlier Tests
// ============================================================================

/// Test that outliers are excluded and every other sample retained.
#[test]
fn test_sinusoid_outliers_rejected() {
    let (t, d, outliers) = sinusoid_with_outliers(42);
    let n = t.len();

    let cleaner = MaskCleaner::new(100.0);
    let outcome = DeviationPolicy::default().apply(&t, &d, &vec![true; n], &cleaner);

    assert!(outcome.converged);
    assert!(outcome.passes <= 4);
    for i in 0..n {
        assert_eq!(outcome.mask[i], !outliers.contains(&i), "sample {i}");
    }
}

/// Test that the result does not depend on the particular noise draw.
#[test]
fn test_sinusoid_outliers_other_seeds() {
    for seed in [1, 7, 99, 1234] {
        let (t, d, outliers) = sinusoid_with_outliers(seed);
        let cleaner = MaskCleaner::new(100.0);
        let outcome = DeviationPolicy::default().apply(&t, &d, &vec![true; t.len()], &cleaner);

        let rejected: Vec<usize> = (0..t.len()).filter(|&i| !outcome.mask[i]).collect();
        assert_eq!(rejected, outliers, "seed {seed}");
    }
}

/// Test that neighbours rejected in the first pass are readmitted later.
#[test]
fn test_first_pass_overshoots_then_recovers() {
    let (t, d, outliers) = sinusoid_with_outliers(42);
    let n = t.len();
    let cleaner = MaskCleaner::new(100.0);

    let one_pass = DeviationPolicy {
        max_passes: 1,
        ..DeviationPolicy::default()
    };
    let first = one_pass.apply(&t, &d, &vec![true; n], &cleaner);
    let rejected_first = first.mask.iter().filter(|&&v| !v).count();
    assert!(rejected_first > outliers.len());
    assert!(!first.converged);

    let full = DeviationPolicy::default().apply(&t, &d, &vec![true; n], &cleaner);
    assert_eq!(full.mask.iter().filter(|&&v| !v).count(), outliers.len());
}

// ============================================================================
// Iteration Tests
// ============================================================================

/// Test that a clean constant signal converges on the second pass.
#[test]
fn test_constant_converges_on_second_pass() {
    let n = 1000;
    let t: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let d = vec![1000.0; n];

    let cleaner = MaskCleaner::new(1000.0);
    let outcome = DeviationPolicy::default().apply(&t, &d, &vec![true; n], &cleaner);

    assert_eq!(outcome.passes, 2);
    assert!(outcome.converged);
    assert!(outcome.mask.iter().all(|&v| v));
}

/// Test that the final sample keeps a baseline at a non-default resampling rate.
#[test]
fn test_last_sample_kept_at_custom_rate() {
    let policy = DeviationPolicy {
        interp_rate_hz: 90.0,
        ..DeviationPolicy::default()
    };
    let n = 281;
    let t: Vec<f64> = (0..n).map(|i| i as f64 / 1200.0 * 1000.0).collect();
    let d = vec![1000.0; n];

    let outcome = policy.apply(&t, &d, &vec![true; n], &MaskCleaner::new(1200.0));

    assert!(outcome.converged);
    assert!(outcome.mask.iter().all(|&v| v));
}

/// Test the final sample in single precision.
#[test]
fn test_last_sample_kept_f32() {
    let policy = DeviationPolicy {
        interp_rate_hz: 90.0f32,
        ..DeviationPolicy::default()
    };
    let n = 1201;
    let t: Vec<f32> = (0..n).map(|i| i as f32 / 1200.0 * 1000.0).collect();
    let d = vec![1000.0f32; n];

    let outcome = policy.apply(&t, &d, &vec![true; n], &MaskCleaner::new(1200.0));

    assert!(outcome.mask[n - 1]);
}

/// Test that the incoming mask bounds the result.
#[test]
fn test_never_adds_validity() {
    let n = 1000;
    let t: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let d = vec![1000.0; n];
    let mut mask = vec![true; n];
    mask[400..402].fill(false);

    let outcome = DeviationPolicy::default().apply(&t, &d, &mask, &MaskCleaner::new(1000.0));

    assert!(!outcome.mask[400] && !outcome.mask[401]);
    assert_eq!(outcome.mask.iter().filter(|&&v| v).count(), n - 2);
}

// ============================================================================
// Degenerate Input Tests
// ============================================================================

/// Test empty and all-invalid input.
#[test]
fn test_degenerate() {
    let policy = DeviationPolicy::<f64>::default();
    let cleaner = MaskCleaner::new(1000.0);

    let empty = policy.apply(&[], &[], &[], &cleaner);
    assert!(empty.mask.is_empty());
    assert_eq!(empty.passes, 0);

    let t: Vec<f64> = (0..100).map(|i| i as f64).collect();
    let outcome = policy.apply(&t, &[1.0; 100], &[false; 100], &cleaner);
    assert_eq!(outcome.mask, vec![false; 100]);
    assert!(outcome.converged);
}

/// Test that NaN diameters are rejected.
#[test]
fn test_nan_diameter_rejected() {
    let n = 1000;
    let t: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let mut d = vec![1000.0; n];
    d[500] = f64::NAN;

    let cleaner = MaskCleaner::new(1000.0);
    let outcome = DeviationPolicy::default().apply(&t, &d, &vec![true; n], &cleaner);

    assert!(!outcome.mask[500]);
    assert_eq!(outcome.mask.iter().filter(|&&v| !v).count(), 1);
}
