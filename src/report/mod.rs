//! Run-summary formatting.

pub mod format;

pub use format::*;
