//! Input/output at the tabular boundary.
//!
//! - measurement CSV ingest (`ingest`)
//! - conditioned-curve and feature exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
