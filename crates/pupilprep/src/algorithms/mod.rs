//! Layer 3: Algorithms
//!
//! This layer implements the mask-cleanup routines shared by every filter
//! stage (short-run removal, gap expansion), the interpolation used for
//! baseline estimation, linear detrending, and analog calibration. The
//! filter stages compose them; the engine orchestrates the stages.

// Resampling grids and interpolation.
pub mod interpolation;

// Short-run removal.
pub mod loners;

// Gap expansion.
pub mod gaps;

// Linear trend fit and removal.
pub mod regression;

// Voltage calibration, centering, termination detection.
pub mod calibration;
