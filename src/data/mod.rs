//! Data sources: synthetic loop generation.
//!
//! Measured data enters through [`crate::io`]; this module only produces
//! deterministic synthetic loops for demos and end-to-end tests.

pub mod sample;

pub use sample::{SampleConfig, generate_sample};
