//! Tests for odd extension and zero-phase low-pass filtering.
//!
//! ## Test Organization
//!
//! 1. **Extension** - Odd-symmetric padding and clamping
//! 2. **Filtering** - Passthrough, linear trends, attenuation, phase

use approx::assert_relative_eq;

use pupilprep::internals::math::boundary::odd_extension;
use pupilprep::internals::math::filter::FirstOrderLowpass;

// ============================================================================
// Extension Tests
// ============================================================================

/// Test odd extension values around both ends.
///
/// Left: 2·x0 − x[i], right: 2·x_{n−1} − x[n−1−i].
#[test]
fn test_odd_extension_values() {
    let x = [5.0f64, 6.0, 8.0, 8.0, 9.0];
    let (ext, pad) = odd_extension(&x, 3);

    assert_eq!(pad, 3);
    assert_eq!(
        ext,
        vec![2.0, 2.0, 4.0, 5.0, 6.0, 8.0, 8.0, 9.0, 10.0, 10.0, 12.0]
    );
}

/// Test that the pad is clamped for short series.
#[test]
fn test_odd_extension_clamps_pad() {
    let x = [1.0f64, 3.0, 2.0];
    let (ext, pad) = odd_extension(&x, 6);

    assert_eq!(pad, 2);
    assert_eq!(ext.len(), 7);
    assert_eq!(&ext[2..5], &x);
}

// ============================================================================
// Filtering Tests
// ============================================================================

/// Test that a constant series is unchanged.
#[test]
fn test_constant_passthrough() {
    let filter = FirstOrderLowpass::new(16.0f64, 100.0);
    for v in filter.filtfilt(&[3.5; 200]) {
        assert_relative_eq!(v, 3.5, epsilon = 1e-9);
    }
}

/// Test that a linear ramp is preserved.
///
/// Odd extension keeps the ramp linear beyond both ends, and a unit-DC-gain
/// symmetric filter maps a line onto itself.
#[test]
fn test_linear_ramp_preserved() {
    let filter = FirstOrderLowpass::new(16.0f64, 100.0);
    let x: Vec<f64> = (0..300).map(|i| 0.5 * i as f64 + 10.0).collect();
    let y = filter.filtfilt(&x);

    for i in 20..280 {
        assert_relative_eq!(y[i], x[i], epsilon = 1e-6);
    }
}

/// Test that high frequencies are attenuated.
#[test]
fn test_nyquist_attenuated() {
    let filter = FirstOrderLowpass::new(5.0f64, 100.0);
    let x: Vec<f64> = (0..400)
        .map(|i| if i % 2 == 0 { 1.0 } else { -1.0 })
        .collect();
    let y = filter.filtfilt(&x);

    for &v in &y[50..350] {
        assert!(v.abs() < 0.05, "alternating input leaked through: {v}");
    }
}

/// Test zero phase: a symmetric pulse stays centred.
#[test]
fn test_zero_phase_symmetry() {
    let filter = FirstOrderLowpass::new(10.0f64, 100.0);
    let mut x = vec![0.0f64; 201];
    x[100] = 1.0;
    let y = filter.filtfilt(&x);

    let peak = y
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
        .map(|(i, _)| i)
        .unwrap();
    assert_eq!(peak, 100);
    assert_relative_eq!(y[90], y[110], epsilon = 1e-9);
}

/// Test short inputs.
#[test]
fn test_short_inputs() {
    let filter = FirstOrderLowpass::new(16.0f64, 100.0);
    assert!(filter.filtfilt(&[]).is_empty());
    assert_eq!(filter.filtfilt(&[5.0]), vec![5.0]);
    for v in filter.filtfilt(&[2.0, 2.0]) {
        assert_relative_eq!(v, 2.0, epsilon = 1e-12);
    }
}
