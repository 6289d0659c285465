//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - curve data (`Curve`, `CurveSet`, `Branch`, `CurveKind`)
//! - stage configuration (`FilterSpec`, `ResampleConfig`, `SmoothingConfig`,
//!   `LossConfig`, `AnalysisConfig`)
//! - stage outputs and feature records (`FilteredSet`, `ResampledSet`,
//!   `CharacteristicPoints`, `LossReport`, ...)

pub mod types;

pub use types::*;
