//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used throughout the
//! pipeline:
//! - Robust statistics (median, MAD, MAD thresholds)
//! - Signal extension and low-pass filtering
//! - Display geometry and visual-angle conversion
//!
//! These are reusable building blocks with no mask-specific logic.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Engine
//!   ↓
//! Layer 5: Evaluation
//!   ↓
//! Layer 4: Filters
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Robust statistics (median/MAD).
pub mod scaling;

/// Boundary extension utilities.
pub mod boundary;

/// Butterworth low-pass filtering.
pub mod filter;

/// Display geometry and visual angle.
pub mod geometry;
