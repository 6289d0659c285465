//! Error kinds shared across the pipeline.
//!
//! Three things are genuine errors here:
//!
//! - a bad configuration value (`InvalidParameter`)
//! - too few samples for the requested operation (`InsufficientData`)
//! - numerically degenerate input, e.g. a zero interpolation denominator
//!   (`NumericDegenerate`)
//!
//! A missing zero crossing or intersection is *not* an error: it is a valid
//! outcome represented as `None` in the result records, and downstream
//! computations carry it through as a partial result.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// Non-numeric or out-of-range configuration, with the offending
    /// parameter named.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The requested operation needs more samples than the input provides.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// Interpolation abscissae not strictly increasing, a zero denominator,
    /// or a non-finite value where the math requires a finite one.
    #[error("degenerate numeric input: {0}")]
    NumericDegenerate(String),

    /// File or serialization failure at the tabular boundary.
    #[error("{0}")]
    Io(String),
}

impl AppError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        AppError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Process exit code for the binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::InvalidParameter { .. } | AppError::Io(_) => 2,
            AppError::InsufficientData(_) => 3,
            AppError::NumericDegenerate(_) => 4,
        }
    }
}
