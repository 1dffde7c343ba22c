//! Tests for median, MAD and MAD-derived thresholds.
//!
//! These tests verify the robust statistics shared by the speed and
//! baseline-deviation criteria:
//! - NaN-ignoring median and MAD
//! - Threshold derivation `median + k·MAD`
//! - The additive fallback for zero MAD
//!
//! ## Test Organization
//!
//! 1. **Median and MAD** - Basic computation and NaN handling
//! 2. **Thresholds** - Regular and degenerate thresholds
//! 3. **Edge Cases** - Empty and all-NaN input

use approx::assert_relative_eq;

use pupilprep::internals::math::scaling::{nan_mad, nan_median, MadThreshold};

// ============================================================================
// Median and MAD Tests
// ============================================================================

/// Test median of odd- and even-length input.
#[test]
fn test_median_odd_and_even() {
    assert_eq!(nan_median(&[3.0f64, 1.0, 2.0]), Some(2.0));
    assert_eq!(nan_median(&[4.0f64, 1.0, 3.0, 2.0]), Some(2.5));
}

/// Test that NaN entries are ignored.
#[test]
fn test_median_ignores_nan() {
    let vals = [f64::NAN, 5.0, 1.0, f64::NAN, 3.0];
    assert_eq!(nan_median(&vals), Some(3.0));
}

/// Test MAD of a small sample.
///
/// Median = 3, deviations = [2, 1, 0, 1, 97], MAD = 1.
#[test]
fn test_mad_basic() {
    let vals = [1.0f64, 2.0, 3.0, 4.0, 100.0];
    assert_relative_eq!(nan_mad(&vals).unwrap(), 1.0);
}

/// Test that MAD is unaffected by NaN.
#[test]
fn test_mad_ignores_nan() {
    let with_nan = [1.0f64, f64::NAN, 2.0, 3.0, 4.0, 100.0, f64::NAN];
    let without = [1.0f64, 2.0, 3.0, 4.0, 100.0];
    assert_eq!(nan_mad(&with_nan), nan_mad(&without));
}

// ============================================================================
// Threshold Tests
// ============================================================================

/// Test the regular threshold `median + k·MAD`.
#[test]
fn test_threshold_regular() {
    let vals = [1.0f64, 2.0, 3.0, 4.0, 100.0];
    let t = MadThreshold::from_values(&vals, 16.0).unwrap();

    assert_relative_eq!(t.median, 3.0);
    assert_relative_eq!(t.mad, 1.0);
    assert_relative_eq!(t.threshold, 19.0);
    assert!(!t.is_degenerate());
}

/// Test that a constant array falls back to `value + multiplier` exactly.
#[test]
fn test_threshold_constant_uses_additive_fallback() {
    let vals = [7.25f64; 40];
    let t = MadThreshold::from_values(&vals, 16.0).unwrap();

    assert!(t.is_degenerate());
    assert_eq!(t.threshold, 7.25 + 16.0);
}

/// Test the fallback when more than half the values coincide.
#[test]
fn test_threshold_majority_constant() {
    let vals = [0.0f64, 0.0, 0.0, 0.0, 0.0, 9.0, 12.0];
    let t = MadThreshold::from_values(&vals, 16.0).unwrap();

    assert_eq!(t.mad, 0.0);
    assert_eq!(t.threshold, 16.0);
}

/// Test that reaching the threshold counts as exceeding it.
#[test]
fn test_threshold_is_inclusive() {
    let t = MadThreshold::from_values(&[1.0f64; 5], 2.0).unwrap();
    assert!(t.exceeded_by(3.0));
    assert!(!t.exceeded_by(2.999));
    assert!(!t.exceeded_by(f64::NAN));
}

/// Test f32 support.
#[test]
fn test_threshold_f32() {
    let vals = [1.0f32, 2.0, 3.0, 4.0, 100.0];
    let t = MadThreshold::from_values(&vals, 16.0f32).unwrap();
    assert_relative_eq!(t.threshold, 19.0f32);
}

// ============================================================================
// Edge Case Tests
// ============================================================================

/// Test empty and all-NaN input.
#[test]
fn test_empty_and_all_nan() {
    let empty: [f64; 0] = [];
    assert_eq!(nan_median(&empty), None);
    assert_eq!(nan_mad(&[f64::NAN, f64::NAN]), None);
    assert!(MadThreshold::from_values(&[f64::NAN; 3], 16.0).is_none());
}

/// Test a single value.
#[test]
fn test_single_value() {
    let t = MadThreshold::from_values(&[42.0f64], 16.0).unwrap();
    assert_eq!(t.median, 42.0);
    assert_eq!(t.mad, 0.0);
    assert_eq!(t.threshold, 58.0);
}
