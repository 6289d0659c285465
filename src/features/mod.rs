//! Feature extraction on conditioned curves.
//!
//! Everything here consumes branches that already went through gap filling,
//! filtering and resampling; no stage re-sorts or re-smooths beyond what its
//! own algorithm requires.

pub mod derived;
pub mod loss;
pub mod points;

pub use derived::{derive_branch, permeability};
pub use loss::compute_loss;
pub use points::extract;
