//! Layer 6: Engine
//!
//! # Purpose
//!
//! This layer validates configuration and recordings, runs the filter
//! stages in order, and assembles the cleaned result.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Engine ← You are here
//!   ↓
//! Layer 5: Evaluation
//!   ↓
//! Layer 4: Filters
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Pipeline configuration and execution.
pub mod executor;

/// Validation utilities.
pub mod validator;

/// Output types.
pub mod output;
