//! Layer 5: Evaluation
//!
//! # Purpose
//!
//! This layer summarises a pipeline run: per-stage valid counts and the
//! convergence state of the baseline loop.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Engine
//!   ↓
//! Layer 5: Evaluation ← You are here
//!   ↓
//! Layer 4: Filters
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Per-stage removal counts.
pub mod diagnostics;
