//! Layer 4: Filters
//!
//! # Purpose
//!
//! The three validity criteria of the pipeline, in the order they run:
//! geometric (on-screen), kinematic (dilation speed), and baseline deviation.
//! Each takes the previous mask by reference and returns a new one, cleaned
//! by the shared short-run removal and gap expansion.
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
//! Layer 4: Filters ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Cleanup context shared by the stages.
pub mod cleanup;

/// Geometric validity.
pub mod bounds;

/// Dilation-speed validity.
pub mod speed;

/// Baseline-deviation validity.
pub mod deviation;
