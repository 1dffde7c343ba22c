//! # pupilprep: artifact rejection for eye-tracking recordings
//!
//! Robust, deterministic validity masking for gaze position and pupil
//! diameter time series. Each sample of a recording is marked valid or
//! invalid by three criteria applied in order, and the surviving channels
//! are cleaned, detrended and converted to degrees of visual angle.
//!
//! ## The pipeline
//!
//! 1. **Geometric**: the gaze must lie strictly inside the display.
//! 2. **Dilation speed**: the rate of pupil-diameter change must stay below
//!    `median + 16·MAD` of the per-sample maximum speed.
//! 3. **Baseline deviation**: the diameter must stay within `median + 16·MAD`
//!    of its distance to a smooth baseline, refitted over up to four passes.
//!
//! After every criterion, short isolated runs of valid samples are removed
//! and invalidity is padded around blink-sized gaps.
//!
//! ## Quick Start
//!
//! ```rust
//! use pupilprep::prelude::*;
//!
//! // 2 s at 500 Hz, gaze at the screen centre, constant pupil.
//! let n = 1000;
//! let x = vec![0.0; n];
//! let y = vec![0.0; n];
//! let mut pupil = vec![1000.0; n];
//! pupil[500] = 5000.0;
//!
//! let prep = Preprocess::new()
//!     .sampling_rate(500.0)
//!     .display(1024.0, 768.0, 42.0, 75.0)
//!     .build()?;
//!
//! let result = prep.run_uniform(&x, &y, &pupil)?;
//!
//! assert!(!result.mask[500]);
//! println!("{}", result);
//! # Result::<(), PrepError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! `run` returns `Result<PrepResult<T>, PrepError>`. Errors are reserved for
//! configuration and input that cannot be masked meaningfully: mismatched
//! channel lengths, non-increasing timestamps, non-positive rates. Degenerate
//! data (constant signals, nothing on screen, empty recordings) is handled
//! by fallback policy and never fails.
//!
//! ## Logging
//!
//! The crate emits `tracing` events (`debug!` per cleanup step and threshold,
//! `info!` per run). It never installs a subscriber.

// Layer 1: Primitives - errors, runs, numeric helpers.
mod primitives;

// Layer 2: Math - robust statistics, filtering, geometry.
mod math;

// Layer 3: Algorithms - mask cleanup, interpolation, detrending, calibration.
mod algorithms;

// Layer 4: Filters - the validity criteria.
mod filters;

// Layer 5: Evaluation - per-stage diagnostics.
mod evaluation;

// Layer 6: Engine - validation and orchestration.
mod engine;

// High-level fluent API.
mod api;

pub use crate::algorithms::calibration::{
    center_gaze, center_on_median, crop_at_termination, find_termination, VoltageCalibration,
    TERMINATION_RUN,
};

// Standard prelude.
pub mod prelude {
    pub use crate::api::{
        DeviationOutcome, DeviationPolicy, DisplayGeometry, GapPolicy, LonerPolicy, PrepConfig,
        PrepError, PrepResult, PreprocessBuilder as Preprocess, Preprocessor, SpeedPolicy,
        StageCounts, StageDiagnostics,
    };
}

// Internal modules for testing.
//
// This module re-exports every layer so integration tests can reach the
// building blocks directly.
#[doc(hidden)]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod filters {
        pub use crate::filters::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
